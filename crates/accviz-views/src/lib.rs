//! View models for the four coordinated dashboard views.
//!
//! Each model turns one projection of a [`RenderFrame`] into the exact
//! numbers a renderer draws: canton rates for the map, the activity
//! ranking, gender shares and the yearly series. Renderers stay outside
//! this workspace and consume these types plus [`DashboardSnapshot`].
//!
//! [`RenderFrame`]: accviz_core::dashboard::RenderFrame

pub mod export;
pub mod map;
pub mod proportion;
pub mod timeline;
pub mod trend;

pub use export::DashboardSnapshot;
pub use map::{CantonStat, MapViewModel};
pub use proportion::{GenderSlice, ProportionViewModel};
pub use timeline::{TimelineViewModel, YearPoint};
pub use trend::{ActivityBar, TrendViewModel, TOP_ACTIVITIES};
