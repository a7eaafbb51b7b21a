//! Timeline view model: yearly totals over the full data range.

use accviz_core::aggregate;
use accviz_core::dashboard::RenderFrame;
use accviz_core::filter::YearSpan;
use accviz_core::model::AccidentRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearPoint {
    pub year: i32,
    pub total: u64,

    /// Whether the year lies inside the brushed window.
    pub in_window: bool,
}

/// Data behind the timeline for one render cycle.
///
/// Covers every year from the first to the last in the dataset with zeros
/// where the selection has no records: the time axis and the brush overlay
/// must stay put while other filters change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineViewModel {
    pub points: Vec<YearPoint>,
    pub years: YearSpan,
}

impl TimelineViewModel {
    pub fn new(records: &[&AccidentRecord], years: YearSpan) -> Self {
        let points = aggregate::yearly_series(records, years.min, years.max)
            .into_iter()
            .map(|(year, total)| YearPoint {
                year,
                total,
                in_window: years.contains(year),
            })
            .collect();
        Self { points, years }
    }

    pub fn from_frame(frame: &RenderFrame<'_>) -> Self {
        if frame.options.years.is_empty() {
            return Self {
                points: Vec::new(),
                years: frame.filter.years(),
            };
        }
        Self::new(&frame.projections.timeline, frame.filter.years())
    }
}
