//! The interaction router: one event in, one consistent render cycle out.
//!
//! The dashboard owns the filter state and the option lists. Views never
//! mutate state directly; they translate gestures into
//! [`InteractionEvent`]s, hand them to [`Dashboard::handle`] and receive a
//! fresh [`RenderFrame`] with the other views.

use std::sync::{Arc, Weak};

use anyhow::Result;
use tracing::{debug, error};
use uuid::Uuid;

use crate::aggregate::{self, Projections};
use crate::events::{InteractionEvent, Origin};
use crate::filter::{FilterState, YearSpan};
use crate::options::{self, FilterOptions};
use crate::population::PopulationTable;
use crate::store::RecordStore;

/// Identifier handed out when a view subscribes.
pub type ViewId = Uuid;

/// A view fed by the dashboard.
///
/// Implementations report failures instead of panicking; a failing view is
/// logged and skipped, never allowed to block the others.
pub trait ViewSubscriber: Send + Sync {
    /// Short name used in logs.
    fn label(&self) -> &str;

    /// Receive the data for one render cycle.
    fn on_frame(&self, frame: &RenderFrame<'_>) -> Result<()>;
}

/// Everything a view needs for one render cycle, borrowed from the
/// dashboard for the duration of the notification.
pub struct RenderFrame<'a> {
    /// Per-view record selections.
    pub projections: Projections<'a>,

    /// Filter state after the triggering event was applied.
    pub filter: &'a FilterState,

    /// Option lists after reconciliation.
    pub options: &'a FilterOptions,

    /// Population table for rate computation.
    pub population: &'a PopulationTable,

    /// Whether a user gesture or a programmatic refresh caused the cycle.
    /// Views use this to suppress echo events from their own widgets.
    pub origin: Origin,
}

/// Central coordinator between the record store, the filter state and the
/// subscribed views.
pub struct Dashboard {
    store: Arc<RecordStore>,
    population: PopulationTable,
    filter: FilterState,
    options: FilterOptions,
    subscribers: Vec<(ViewId, Weak<dyn ViewSubscriber>)>,
}

impl Dashboard {
    /// Build the dashboard over a loaded store. An empty store yields an
    /// inert dashboard that renders "no data" frames.
    pub fn new(store: Arc<RecordStore>, population: PopulationTable) -> Self {
        let years = match store.year_bounds() {
            Some((min, max)) => YearSpan::full(min, max),
            None => YearSpan::full(0, 0),
        };
        let mut filter = FilterState::new(years);
        let options = options::reconcile(&store, &mut filter);
        Self {
            store,
            population,
            filter,
            options,
            subscribers: Vec::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn population(&self) -> &PopulationTable {
        &self.population
    }

    /// Register a view. The dashboard holds only a weak reference; a
    /// dropped view is pruned on the next cycle.
    pub fn subscribe(&mut self, view: Arc<dyn ViewSubscriber>) -> ViewId {
        let id = Uuid::new_v4();
        debug!("view '{}' subscribed as {}", view.label(), id);
        self.subscribers.push((id, Arc::downgrade(&view)));
        id
    }

    pub fn unsubscribe(&mut self, id: ViewId) {
        self.subscribers.retain(|(vid, _)| *vid != id);
    }

    /// Run one cycle without a triggering gesture, for the initial render.
    pub fn refresh(&mut self) {
        self.broadcast(Origin::ProgrammaticSync);
    }

    /// Route one event: mutate the filter, reconcile the option lists,
    /// recompute every projection and notify all views.
    pub fn handle(&mut self, event: InteractionEvent) {
        use InteractionEvent::*;

        debug!("handling {:?}", event);
        let reconcile_needed = match event {
            BranchSelected(branch) => self.filter.set_branch(branch),
            AgeGroupSelected(age_group) => self.filter.set_age_group(age_group),
            GenderSelected(gender) => self.filter.set_gender(gender),
            ActivitySelected(activity) => self.filter.set_activity(activity),
            CantonSelected(canton) => self.filter.set_selected_canton(canton),
            GeoModeSelected(mode) => self.filter.set_geo_mode(mode),
            YearWindowChanged {
                origin: Origin::ProgrammaticSync,
                ..
            } => {
                // Echo of our own widget sync; reacting would loop forever.
                debug!("ignoring programmatic year window echo");
                return;
            }
            YearWindowChanged { from, to, .. } => self.filter.set_year_window(from, to),
            YearClicked(year) => self.filter.set_year_window(year, year),
            CantonClicked(canton) => self.filter.toggle_canton(canton),
            ActivityClicked(activity) => {
                self.filter.toggle_clicked_activity(&activity);
                false
            }
            GenderClicked(gender) => {
                self.filter.toggle_clicked_gender(&gender);
                false
            }
            Reset => {
                self.filter.reset();
                true
            }
        };

        if reconcile_needed {
            self.options = options::reconcile(&self.store, &mut self.filter);
        }
        self.broadcast(Origin::UserInput);
    }

    fn broadcast(&mut self, origin: Origin) {
        self.subscribers.retain(|(_, weak)| weak.strong_count() > 0);

        let frame = RenderFrame {
            projections: aggregate::project(&self.store, &self.filter),
            filter: &self.filter,
            options: &self.options,
            population: &self.population,
            origin,
        };
        for (id, weak) in &self.subscribers {
            if let Some(view) = weak.upgrade() {
                if let Err(err) = view.on_frame(&frame) {
                    error!("view '{}' ({}) failed to render: {:#}", view.label(), id, err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccidentRecord, Canton, GeoMode};
    use parking_lot::Mutex;

    fn row(year: i32, canton: Canton, activity: &str, gender: &str, count: u32) -> AccidentRecord {
        AccidentRecord {
            year,
            canton_of_accident: Some(canton),
            canton_of_residence: Some(canton),
            branch: "NBUV".to_string(),
            age_group: "25-34".to_string(),
            gender: gender.to_string(),
            activity: activity.to_string(),
            count,
        }
    }

    fn dashboard() -> Dashboard {
        let store = Arc::new(RecordStore::from_records(vec![
            row(2019, Canton::ZH, "Fussball", "maenner", 10),
            row(2020, Canton::BE, "Skifahren", "frauen", 4),
            row(2021, Canton::GE, "Fussball", "frauen", 6),
        ]));
        Dashboard::new(store, PopulationTable::new())
    }

    /// Counts frames and remembers the last map total.
    struct Probe {
        frames: Mutex<Vec<(Origin, u64)>>,
        fail: bool,
    }

    impl Probe {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                frames: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                frames: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn frame_count(&self) -> usize {
            self.frames.lock().len()
        }

        fn last_map_total(&self) -> Option<u64> {
            self.frames.lock().last().map(|(_, total)| *total)
        }
    }

    impl ViewSubscriber for Probe {
        fn label(&self) -> &str {
            "probe"
        }

        fn on_frame(&self, frame: &RenderFrame<'_>) -> Result<()> {
            self.frames
                .lock()
                .push((frame.origin, aggregate::total(&frame.projections.map)));
            if self.fail {
                anyhow::bail!("probe failure");
            }
            Ok(())
        }
    }

    #[test]
    fn test_event_drives_full_cycle() {
        let mut dash = dashboard();
        let probe = Probe::new();
        dash.subscribe(probe.clone() as Arc<dyn ViewSubscriber>);

        dash.handle(InteractionEvent::YearWindowChanged {
            from: 2020,
            to: 2020,
            origin: Origin::UserInput,
        });
        assert_eq!(probe.frame_count(), 1);
        assert_eq!(probe.last_map_total(), Some(4));
    }

    #[test]
    fn test_canton_selection_narrows_map_and_activity_options() {
        let store = Arc::new(RecordStore::from_records(vec![
            AccidentRecord {
                year: 2020,
                canton_of_accident: Some(Canton::ZH),
                canton_of_residence: None,
                branch: "BU".to_string(),
                age_group: "18-24".to_string(),
                gender: "m".to_string(),
                activity: "Sport".to_string(),
                count: 10,
            },
            AccidentRecord {
                year: 2020,
                canton_of_accident: Some(Canton::BE),
                canton_of_residence: None,
                branch: "BU".to_string(),
                age_group: "25-34".to_string(),
                gender: "f".to_string(),
                activity: "Haushalt".to_string(),
                count: 5,
            },
        ]));
        let mut dash = Dashboard::new(store, PopulationTable::new());
        let probe = Probe::new();
        dash.subscribe(probe.clone() as Arc<dyn ViewSubscriber>);

        dash.refresh();
        assert_eq!(probe.last_map_total(), Some(15));

        dash.handle(InteractionEvent::CantonSelected(Some(Canton::ZH)));
        assert_eq!(probe.last_map_total(), Some(10));
        assert_eq!(dash.options().activities, vec!["Sport".to_string()]);
    }

    #[test]
    fn test_programmatic_echo_is_swallowed() {
        let mut dash = dashboard();
        let probe = Probe::new();
        dash.subscribe(probe.clone() as Arc<dyn ViewSubscriber>);

        dash.handle(InteractionEvent::YearWindowChanged {
            from: 2020,
            to: 2020,
            origin: Origin::ProgrammaticSync,
        });
        assert_eq!(probe.frame_count(), 0);
        assert!(dash.filter().years().is_full());
    }

    #[test]
    fn test_canton_click_toggles_and_reconciles() {
        let mut dash = dashboard();
        dash.handle(InteractionEvent::CantonClicked(Canton::GE));
        assert_eq!(dash.filter().selected_canton(), Some(Canton::GE));
        assert_eq!(dash.options().activities, vec!["Fussball"]);

        dash.handle(InteractionEvent::CantonClicked(Canton::GE));
        assert_eq!(dash.filter().selected_canton(), None);
        assert_eq!(dash.options().activities, vec!["Fussball", "Skifahren"]);
    }

    #[test]
    fn test_hard_filter_clears_highlight() {
        let mut dash = dashboard();
        dash.handle(InteractionEvent::ActivityClicked("Fussball".to_string()));
        assert_eq!(dash.filter().clicked_activity(), Some("Fussball"));

        dash.handle(InteractionEvent::AgeGroupSelected(Some("25-34".to_string())));
        assert_eq!(dash.filter().clicked_activity(), None);
    }

    #[test]
    fn test_geo_mode_switch_reconciles_options() {
        let mut dash = dashboard();
        dash.handle(InteractionEvent::GeoModeSelected(GeoMode::Residence));
        assert_eq!(
            dash.options().cantons,
            vec![Canton::BE, Canton::GE, Canton::ZH]
        );
    }

    #[test]
    fn test_failing_view_does_not_block_others() {
        let mut dash = dashboard();
        let failing = Probe::failing();
        let healthy = Probe::new();
        dash.subscribe(failing.clone() as Arc<dyn ViewSubscriber>);
        dash.subscribe(healthy.clone() as Arc<dyn ViewSubscriber>);

        dash.handle(InteractionEvent::GenderClicked("frauen".to_string()));
        assert_eq!(failing.frame_count(), 1);
        assert_eq!(healthy.frame_count(), 1);
    }

    #[test]
    fn test_dropped_view_is_pruned() {
        let mut dash = dashboard();
        let probe = Probe::new();
        dash.subscribe(probe.clone() as Arc<dyn ViewSubscriber>);
        drop(probe);
        // Must not panic or leak; the weak entry goes away on the next cycle.
        dash.handle(InteractionEvent::Reset);
        assert!(dash.subscribers.is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_frames() {
        let mut dash = dashboard();
        let probe = Probe::new();
        let id = dash.subscribe(probe.clone() as Arc<dyn ViewSubscriber>);
        dash.unsubscribe(id);
        dash.handle(InteractionEvent::Reset);
        assert_eq!(probe.frame_count(), 0);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut dash = dashboard();
        dash.handle(InteractionEvent::CantonClicked(Canton::GE));
        dash.handle(InteractionEvent::YearWindowChanged {
            from: 2020,
            to: 2021,
            origin: Origin::UserInput,
        });
        dash.handle(InteractionEvent::Reset);
        assert_eq!(dash.filter().selected_canton(), None);
        assert!(dash.filter().years().is_full());
        assert_eq!(dash.options().cantons.len(), 3);
    }

    #[test]
    fn test_year_click_collapses_window() {
        let mut dash = dashboard();
        dash.handle(InteractionEvent::YearClicked(2020));
        let years = dash.filter().years();
        assert_eq!((years.from, years.to), (2020, 2020));
    }

    #[test]
    fn test_empty_store_is_inert() {
        let mut dash = Dashboard::new(
            Arc::new(RecordStore::from_records(Vec::new())),
            PopulationTable::new(),
        );
        let probe = Probe::new();
        dash.subscribe(probe.clone() as Arc<dyn ViewSubscriber>);
        dash.handle(InteractionEvent::CantonClicked(Canton::ZH));
        assert_eq!(probe.frame_count(), 1);
        assert_eq!(probe.last_map_total(), Some(0));
    }
}
