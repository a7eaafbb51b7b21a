//! Cross-filter state shared by all four views.

use serde::Serialize;

use crate::model::{Canton, GeoMode};

/// Year bounds of the loaded data plus the selected window within them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    /// Earliest year in the dataset.
    pub min: i32,
    /// Latest year in the dataset.
    pub max: i32,
    /// Start of the selected window, inclusive.
    pub from: i32,
    /// End of the selected window, inclusive.
    pub to: i32,
}

impl YearSpan {
    /// A span with the window covering all of `[min, max]`.
    pub fn full(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            from: min,
            to: max,
        }
    }

    /// Move the window, clamping both ends to the data bounds. A start
    /// past the end collapses the window onto the end year.
    pub fn set_window(&mut self, from: i32, to: i32) {
        let from = from.clamp(self.min, self.max);
        let to = to.clamp(self.min, self.max);
        self.from = if from > to { to } else { from };
        self.to = to;
    }

    pub fn reset(&mut self) {
        self.from = self.min;
        self.to = self.max;
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.from && year <= self.to
    }

    /// Whether the window covers the whole dataset.
    pub fn is_full(&self) -> bool {
        self.from == self.min && self.to == self.max
    }
}

/// The current value of every filter dimension.
///
/// Hard filters (year window, the four dropdowns, canton selection,
/// geographic mode) constrain every view. The two click fields are soft
/// highlights toggled from chart elements; any hard filter change clears
/// them, a year window change does not. Mutation goes through the
/// dashboard so reconciliation and re-aggregation always follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    years: YearSpan,
    branch: Option<String>,
    age_group: Option<String>,
    gender: Option<String>,
    activity: Option<String>,
    selected_canton: Option<Canton>,
    geo_mode: GeoMode,
    clicked_activity: Option<String>,
    clicked_gender: Option<String>,
}

impl FilterState {
    /// Default state: full year window, every dropdown on "all", no canton
    /// selected, accident-location mode, no highlights.
    pub fn new(years: YearSpan) -> Self {
        Self {
            years,
            branch: None,
            age_group: None,
            gender: None,
            activity: None,
            selected_canton: None,
            geo_mode: GeoMode::default(),
            clicked_activity: None,
            clicked_gender: None,
        }
    }

    pub fn years(&self) -> YearSpan {
        self.years
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn age_group(&self) -> Option<&str> {
        self.age_group.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn activity(&self) -> Option<&str> {
        self.activity.as_deref()
    }

    pub fn selected_canton(&self) -> Option<Canton> {
        self.selected_canton
    }

    pub fn geo_mode(&self) -> GeoMode {
        self.geo_mode
    }

    pub fn clicked_activity(&self) -> Option<&str> {
        self.clicked_activity.as_deref()
    }

    pub fn clicked_gender(&self) -> Option<&str> {
        self.clicked_gender.as_deref()
    }

    /// Move the year window. Keeps the click highlights; brushing through
    /// time must not drop an emphasis the user just set.
    ///
    /// Setters return `true` when the change can invalidate the dependent
    /// canton or activity option lists.
    pub fn set_year_window(&mut self, from: i32, to: i32) -> bool {
        self.years.set_window(from, to);
        false
    }

    pub fn set_branch(&mut self, branch: Option<String>) -> bool {
        self.clear_clicks();
        self.branch = branch;
        false
    }

    pub fn set_age_group(&mut self, age_group: Option<String>) -> bool {
        self.clear_clicks();
        self.age_group = age_group;
        false
    }

    pub fn set_gender(&mut self, gender: Option<String>) -> bool {
        self.clear_clicks();
        self.gender = gender;
        false
    }

    pub fn set_activity(&mut self, activity: Option<String>) -> bool {
        self.clear_clicks();
        self.activity = activity;
        true
    }

    pub fn set_selected_canton(&mut self, canton: Option<Canton>) -> bool {
        self.clear_clicks();
        self.selected_canton = canton;
        true
    }

    pub fn set_geo_mode(&mut self, mode: GeoMode) -> bool {
        self.clear_clicks();
        self.geo_mode = mode;
        true
    }

    /// Map click: clicking the selected canton deselects it, clicking any
    /// other canton makes it the sole selection.
    pub fn toggle_canton(&mut self, canton: Canton) -> bool {
        let next = if self.selected_canton == Some(canton) {
            None
        } else {
            Some(canton)
        };
        self.set_selected_canton(next)
    }

    /// Bar click: toggle the activity highlight.
    pub fn toggle_clicked_activity(&mut self, activity: &str) {
        if self.clicked_activity.as_deref() == Some(activity) {
            self.clicked_activity = None;
        } else {
            self.clicked_activity = Some(activity.to_string());
        }
    }

    /// Proportion click: toggle the gender highlight.
    pub fn toggle_clicked_gender(&mut self, gender: &str) {
        if self.clicked_gender.as_deref() == Some(gender) {
            self.clicked_gender = None;
        } else {
            self.clicked_gender = Some(gender.to_string());
        }
    }

    /// Restore every dimension to its default, keeping the data bounds.
    pub fn reset(&mut self) {
        *self = Self::new(YearSpan::full(self.years.min, self.years.max));
    }

    fn clear_clicks(&mut self) {
        self.clicked_activity = None;
        self.clicked_gender = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FilterState {
        FilterState::new(YearSpan::full(2011, 2023))
    }

    #[test]
    fn test_window_clamps_to_bounds() {
        let mut span = YearSpan::full(2011, 2023);
        span.set_window(2005, 2019);
        assert_eq!((span.from, span.to), (2011, 2019));
        span.set_window(2015, 2040);
        assert_eq!((span.from, span.to), (2015, 2023));
    }

    #[test]
    fn test_window_collapses_when_inverted() {
        let mut span = YearSpan::full(2011, 2023);
        span.set_window(2020, 2015);
        assert_eq!((span.from, span.to), (2015, 2015));
    }

    #[test]
    fn test_hard_filter_clears_clicks() {
        let mut f = state();
        f.toggle_clicked_activity("Fussball");
        f.toggle_clicked_gender("frauen");
        f.set_age_group(Some("25-34".to_string()));
        assert_eq!(f.clicked_activity(), None);
        assert_eq!(f.clicked_gender(), None);
    }

    #[test]
    fn test_year_window_keeps_clicks() {
        let mut f = state();
        f.toggle_clicked_activity("Fussball");
        f.set_year_window(2015, 2018);
        assert_eq!(f.clicked_activity(), Some("Fussball"));
    }

    #[test]
    fn test_click_toggles_off_on_repeat() {
        let mut f = state();
        f.toggle_clicked_activity("Fussball");
        assert_eq!(f.clicked_activity(), Some("Fussball"));
        f.toggle_clicked_activity("Fussball");
        assert_eq!(f.clicked_activity(), None);
    }

    #[test]
    fn test_click_switches_to_new_value() {
        let mut f = state();
        f.toggle_clicked_activity("Fussball");
        f.toggle_clicked_activity("Skifahren");
        assert_eq!(f.clicked_activity(), Some("Skifahren"));
    }

    #[test]
    fn test_clicks_are_independent() {
        let mut f = state();
        f.toggle_clicked_activity("Fussball");
        f.toggle_clicked_gender("frauen");
        f.toggle_clicked_activity("Fussball");
        assert_eq!(f.clicked_gender(), Some("frauen"));
    }

    #[test]
    fn test_canton_toggle() {
        use crate::model::Canton;
        let mut f = state();
        assert!(f.toggle_canton(Canton::GE));
        assert_eq!(f.selected_canton(), Some(Canton::GE));
        f.toggle_canton(Canton::VD);
        assert_eq!(f.selected_canton(), Some(Canton::VD));
        f.toggle_canton(Canton::VD);
        assert_eq!(f.selected_canton(), None);
    }

    #[test]
    fn test_reset_restores_defaults() {
        use crate::model::{Canton, GeoMode};
        let mut f = state();
        f.set_year_window(2015, 2016);
        f.set_branch(Some("BUV".to_string()));
        f.set_geo_mode(GeoMode::Residence);
        f.toggle_canton(Canton::ZH);
        f.reset();
        assert_eq!(f, state());
        assert!(f.years().is_full());
    }
}
