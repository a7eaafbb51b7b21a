//! Core state machine for the Swiss accident statistics dashboard.
//!
//! This crate owns the record model, the cross-filter state, the dependent
//! option lists and the aggregation pipeline feeding four coordinated
//! views. Rendering lives elsewhere; views subscribe to the [`Dashboard`]
//! and receive a [`RenderFrame`] per cycle.

pub mod aggregate;
pub mod dashboard;
pub mod events;
pub mod filter;
pub mod model;
pub mod options;
pub mod population;
pub mod source;
pub mod store;

pub use dashboard::{Dashboard, RenderFrame, ViewId, ViewSubscriber};
pub use events::{InteractionEvent, Origin};
pub use filter::{FilterState, YearSpan};
pub use model::{AccidentRecord, Canton, GeoMode};
pub use options::FilterOptions;
pub use population::PopulationTable;
pub use source::{AccidentSource, PopulationSource};
pub use store::RecordStore;
