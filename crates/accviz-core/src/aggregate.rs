//! Aggregation pipeline: per-view record projections and grouping.
//!
//! Every render cycle recomputes four projections from scratch. The views
//! deliberately see different filter subsets: a chart must never be
//! filtered by the dimension it displays, or clicking one of its elements
//! would collapse it to that single element.

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::filter::FilterState;
use crate::model::{AccidentRecord, Canton, GeoMode};
use crate::store::RecordStore;

/// The four view-specific record selections for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Projections<'a> {
    /// Choropleth map: all hard filters plus both click highlights.
    pub map: Vec<&'a AccidentRecord>,

    /// Activity ranking: all hard filters plus the gender click. The
    /// activity click does not apply here.
    pub trend: Vec<&'a AccidentRecord>,

    /// Gender proportions: all hard filters plus the activity click. The
    /// gender click does not apply here.
    pub proportion: Vec<&'a AccidentRecord>,

    /// Year series: every filter except the year window, so the brush
    /// always shows the full time axis.
    pub timeline: Vec<&'a AccidentRecord>,
}

/// Compute all four projections in a single pass over the store.
pub fn project<'a>(store: &'a RecordStore, filter: &FilterState) -> Projections<'a> {
    let clicked_activity = filter.clicked_activity();
    let clicked_gender = filter.clicked_gender();
    let years = filter.years();

    let mut map = Vec::new();
    let mut trend = Vec::new();
    let mut proportion = Vec::new();
    let mut timeline = Vec::new();

    for record in store.records() {
        if !matches_dimensions(record, filter) {
            continue;
        }
        let activity_hit = clicked_activity.is_none_or(|a| record.activity == a);
        let gender_hit = clicked_gender.is_none_or(|g| record.gender == g);

        if activity_hit && gender_hit {
            timeline.push(record);
        }
        if years.contains(record.year) {
            if activity_hit && gender_hit {
                map.push(record);
            }
            if gender_hit {
                trend.push(record);
            }
            if activity_hit {
                proportion.push(record);
            }
        }
    }

    Projections {
        map,
        trend,
        proportion,
        timeline,
    }
}

/// Records satisfying every hard filter, click highlights not applied.
pub fn hard_filtered<'a>(store: &'a RecordStore, filter: &FilterState) -> Vec<&'a AccidentRecord> {
    store
        .records()
        .iter()
        .filter(|r| matches_dimensions(r, filter) && filter.years().contains(r.year))
        .collect()
}

/// Every hard filter except the year window.
fn matches_dimensions(record: &AccidentRecord, filter: &FilterState) -> bool {
    if filter.branch().is_some_and(|b| record.branch != b) {
        return false;
    }
    if filter.age_group().is_some_and(|a| record.age_group != a) {
        return false;
    }
    if filter.gender().is_some_and(|g| record.gender != g) {
        return false;
    }
    if filter.activity().is_some_and(|a| record.activity != a) {
        return false;
    }
    if let Some(canton) = filter.selected_canton() {
        if record.active_canton(filter.geo_mode()) != Some(canton) {
            return false;
        }
    }
    true
}

/// Sum of accident counts over a selection.
pub fn total(records: &[&AccidentRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.count)).sum()
}

/// Accident totals per year.
pub fn sum_by_year(records: &[&AccidentRecord]) -> AHashMap<i32, u64> {
    let mut totals = AHashMap::new();
    for record in records {
        *totals.entry(record.year).or_insert(0u64) += u64::from(record.count);
    }
    totals
}

/// Accident totals per canton under the given mode. Records without a
/// canton in that mode are left out.
pub fn sum_by_canton(records: &[&AccidentRecord], mode: GeoMode) -> AHashMap<Canton, u64> {
    let mut totals = AHashMap::new();
    for record in records {
        if let Some(canton) = record.active_canton(mode) {
            *totals.entry(canton).or_insert(0u64) += u64::from(record.count);
        }
    }
    totals
}

/// Accident totals per activity, keyed in first-occurrence order.
pub fn sum_by_activity(records: &[&AccidentRecord]) -> IndexMap<String, u64> {
    let mut totals = IndexMap::new();
    for record in records {
        *totals.entry(record.activity.clone()).or_insert(0u64) += u64::from(record.count);
    }
    totals
}

/// Accident totals per gender, keyed in first-occurrence order.
pub fn sum_by_gender(records: &[&AccidentRecord]) -> IndexMap<String, u64> {
    let mut totals = IndexMap::new();
    for record in records {
        *totals.entry(record.gender.clone()).or_insert(0u64) += u64::from(record.count);
    }
    totals
}

/// Top `n` groups by descending total. The sort is stable, so groups with
/// equal totals keep their first-occurrence order.
pub fn rank_descending(totals: IndexMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = totals.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

/// Accident totals for every year in `[min, max]`, zero for years the
/// selection does not reach.
pub fn yearly_series(records: &[&AccidentRecord], min: i32, max: i32) -> Vec<(i32, u64)> {
    let by_year = sum_by_year(records);
    (min..=max)
        .map(|year| (year, by_year.get(&year).copied().unwrap_or(0)))
        .collect()
}

/// Distinct years present in a selection, ascending.
pub fn distinct_years(records: &[&AccidentRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}
