//! Activity ranking view model: the ten most frequent activities.

use accviz_core::aggregate;
use accviz_core::dashboard::RenderFrame;
use accviz_core::model::AccidentRecord;
use serde::Serialize;

/// How many activities the ranking shows.
pub const TOP_ACTIVITIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityBar {
    pub activity: String,
    pub total: u64,

    /// Whether this bar carries the click highlight.
    pub highlighted: bool,
}

/// Data behind the activity ranking for one render cycle.
///
/// Built from the projection that leaves the activity click out, so the
/// ranking keeps showing all activities while the other views narrow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendViewModel {
    /// Top activities, descending by total. Ties keep the order in which
    /// the activities first occur in the data.
    pub bars: Vec<ActivityBar>,

    /// Currently clicked activity, if any.
    pub clicked: Option<String>,
}

impl TrendViewModel {
    pub fn new(records: &[&AccidentRecord], clicked: Option<&str>) -> Self {
        let totals = aggregate::sum_by_activity(records);
        let bars = aggregate::rank_descending(totals, TOP_ACTIVITIES)
            .into_iter()
            .map(|(activity, total)| {
                let highlighted = clicked == Some(activity.as_str());
                ActivityBar {
                    activity,
                    total,
                    highlighted,
                }
            })
            .collect();
        Self {
            bars,
            clicked: clicked.map(str::to_owned),
        }
    }

    pub fn from_frame(frame: &RenderFrame<'_>) -> Self {
        Self::new(&frame.projections.trend, frame.filter.clicked_activity())
    }
}
