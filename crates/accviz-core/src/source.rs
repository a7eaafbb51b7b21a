//! Source traits for the one-shot data load.

use async_trait::async_trait;

use crate::model::AccidentRecord;
use crate::population::PopulationTable;

/// Produces the accident rows.
///
/// Implementations parse files or synthesize demo data. Loading happens
/// once at startup; the store never refreshes afterwards.
#[async_trait]
pub trait AccidentSource: Send + Sync {
    /// Load and parse every row. Rows the source cannot salvage are
    /// dropped by the implementation, not surfaced as errors.
    async fn load(&self) -> anyhow::Result<Vec<AccidentRecord>>;

    /// Name used in logs.
    fn source_name(&self) -> &str;
}

/// Produces the population reference table used for map rates.
#[async_trait]
pub trait PopulationSource: Send + Sync {
    async fn load(&self) -> anyhow::Result<PopulationTable>;

    /// Name used in logs.
    fn source_name(&self) -> &str;
}
