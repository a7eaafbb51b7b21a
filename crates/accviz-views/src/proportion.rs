//! Gender proportion view model.

use accviz_core::aggregate;
use accviz_core::dashboard::RenderFrame;
use accviz_core::model::AccidentRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderSlice {
    pub gender: String,
    pub total: u64,

    /// Share of the selection total, in `[0, 1]`.
    pub share: f64,

    /// Whether this slice carries the click highlight.
    pub highlighted: bool,
}

/// Data behind the gender proportion chart for one render cycle.
///
/// Built from the projection that leaves the gender click out, so both
/// genders stay visible while the other views narrow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionViewModel {
    /// Slices, descending by total, ties in first-occurrence order.
    pub slices: Vec<GenderSlice>,

    /// Selection total over all genders.
    pub total: u64,
}

impl ProportionViewModel {
    pub fn new(records: &[&AccidentRecord], clicked: Option<&str>) -> Self {
        let totals = aggregate::sum_by_gender(records);
        let total: u64 = totals.values().sum();
        let slices = aggregate::rank_descending(totals, usize::MAX)
            .into_iter()
            .map(|(gender, gender_total)| {
                let share = if total > 0 {
                    gender_total as f64 / total as f64
                } else {
                    0.0
                };
                let highlighted = clicked == Some(gender.as_str());
                GenderSlice {
                    gender,
                    total: gender_total,
                    share,
                    highlighted,
                }
            })
            .collect();
        Self { slices, total }
    }

    pub fn from_frame(frame: &RenderFrame<'_>) -> Self {
        Self::new(&frame.projections.proportion, frame.filter.clicked_gender())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(gender: &str, count: u32) -> AccidentRecord {
        AccidentRecord {
            year: 2020,
            canton_of_accident: None,
            canton_of_residence: None,
            branch: "NBUV".to_string(),
            age_group: "25-34".to_string(),
            gender: gender.to_string(),
            activity: "Fussball".to_string(),
            count,
        }
    }

    #[test]
    fn test_shares_sum_to_one() {
        let records = vec![row("maenner", 30), row("frauen", 10)];
        let refs: Vec<&AccidentRecord> = records.iter().collect();
        let model = ProportionViewModel::new(&refs, None);
        assert_eq!(model.total, 40);
        assert_eq!(model.slices[0].gender, "maenner");
        assert_eq!(model.slices[0].share, 0.75);
        assert_eq!(model.slices[1].share, 0.25);
        let sum: f64 = model.slices.iter().map(|s| s.share).sum();
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_selection_has_no_slices() {
        let model = ProportionViewModel::new(&[], None);
        assert_eq!(model.total, 0);
        assert!(model.slices.is_empty());
    }

    #[test]
    fn test_highlight_marks_clicked_gender() {
        let records = vec![row("maenner", 30), row("frauen", 10)];
        let refs: Vec<&AccidentRecord> = records.iter().collect();
        let model = ProportionViewModel::new(&refs, Some("frauen"));
        assert!(model.slices.iter().any(|s| s.gender == "frauen" && s.highlighted));
        assert!(model.slices.iter().any(|s| s.gender == "maenner" && !s.highlighted));
    }
}
