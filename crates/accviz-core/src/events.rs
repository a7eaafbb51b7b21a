//! Interaction events routed through the dashboard.

use crate::model::{Canton, GeoMode};

/// Who initiated a change.
///
/// When state changes, widgets are updated to match; those programmatic
/// updates fire change notifications of their own and must be told apart
/// from real user gestures, or a brush sync would feed back into itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A person moved a widget.
    UserInput,
    /// The dashboard moved a widget to mirror state.
    ProgrammaticSync,
}

/// External events the dashboard consumes. Each drives one full
/// mutate, reconcile, aggregate, notify cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// Insurance branch dropdown changed, `None` meaning all branches.
    BranchSelected(Option<String>),

    /// Age group dropdown changed.
    AgeGroupSelected(Option<String>),

    /// Gender dropdown changed.
    GenderSelected(Option<String>),

    /// Activity dropdown changed.
    ActivitySelected(Option<String>),

    /// Canton dropdown changed, `None` meaning all cantons.
    CantonSelected(Option<Canton>),

    /// Switched between accident-location and residence aggregation.
    GeoModeSelected(GeoMode),

    /// Year window moved, via dropdowns or the timeline brush.
    YearWindowChanged {
        from: i32,
        to: i32,
        origin: Origin,
    },

    /// A canton was clicked on the map: single-select toggle.
    CantonClicked(Canton),

    /// An activity bar was clicked: soft highlight toggle.
    ActivityClicked(String),

    /// A gender segment was clicked: soft highlight toggle.
    GenderClicked(String),

    /// A year tick was clicked: collapse the window to that year.
    YearClicked(i32),

    /// Restore every filter to its default.
    Reset,
}
