//! Dependent option lists for the selectors.
//!
//! The canton and activity selectors constrain each other: picking an
//! activity narrows the canton list to cantons where it occurs, picking a
//! canton narrows the activity list to what happens there. [`reconcile`]
//! rebuilds both lists after any change that can affect them and forces
//! the filter back onto the surviving options.

use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

use crate::filter::FilterState;
use crate::model::{Canton, GeoMode};
use crate::store::RecordStore;

/// Valid choices for every selector, derived from the store and the
/// current filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Contiguous year axis of the dataset.
    pub years: Vec<i32>,

    /// Insurance branches, alphabetical.
    pub branches: Vec<String>,

    /// Age groups, ordered by leading age number.
    pub age_groups: Vec<String>,

    /// Gender labels, alphabetical.
    pub genders: Vec<String>,

    /// Activities occurring under the selected canton, alphabetical.
    pub activities: Vec<String>,

    /// Cantons where the selected activity occurs, ordered by German name.
    pub cantons: Vec<Canton>,
}

/// Cantons observed among records matching `activity` (all records when
/// `None`), keyed by the active geographic mode, ordered by German name.
pub fn canton_options(
    store: &RecordStore,
    activity: Option<&str>,
    mode: GeoMode,
) -> Vec<Canton> {
    let mut seen: IndexSet<Canton> = IndexSet::new();
    for record in store.records() {
        if activity.is_some_and(|a| record.activity != a) {
            continue;
        }
        if let Some(canton) = record.active_canton(mode) {
            seen.insert(canton);
        }
    }
    let mut cantons: Vec<Canton> = seen.into_iter().collect();
    cantons.sort_by_key(|c| c.name());
    cantons
}

/// Activities observed among records in `canton` (all records when
/// `None`), alphabetical.
pub fn activity_options(
    store: &RecordStore,
    canton: Option<Canton>,
    mode: GeoMode,
) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for record in store.records() {
        if canton.is_some_and(|c| record.active_canton(mode) != Some(c)) {
            continue;
        }
        seen.insert(record.activity.as_str());
    }
    let mut activities: Vec<String> = seen.into_iter().map(str::to_owned).collect();
    activities.sort();
    activities
}

/// Rebuild every option list and force the filter onto the valid options.
///
/// The canton selection outranks the activity filter: an activity that
/// does not occur in the selected canton resets to "all", and only then is
/// the canton itself validated (it can still drop out after a geographic
/// mode switch). A forced reset counts as a hard filter change, so it
/// clears the click highlights like any other.
pub fn reconcile(store: &RecordStore, filter: &mut FilterState) -> FilterOptions {
    let mode = filter.geo_mode();

    let mut activities = activity_options(store, filter.selected_canton(), mode);
    let activity_dropped = filter
        .activity()
        .is_some_and(|current| !activities.iter().any(|a| a == current));
    if activity_dropped {
        debug!("activity filter no longer valid, resetting to all");
        filter.set_activity(None);
    }

    let mut cantons = canton_options(store, filter.activity(), mode);
    let canton_dropped = filter
        .selected_canton()
        .is_some_and(|selected| !cantons.contains(&selected));
    if canton_dropped {
        debug!("canton selection no longer valid, resetting to all");
        filter.set_selected_canton(None);
        activities = activity_options(store, None, mode);
        cantons = canton_options(store, filter.activity(), mode);
    }

    FilterOptions {
        years: store.available_years(),
        branches: store.branches().to_vec(),
        age_groups: store.age_groups().to_vec(),
        genders: store.genders().to_vec(),
        activities,
        cantons,
    }
}
