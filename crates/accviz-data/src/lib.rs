//! Data loading for the accident dashboard: DSV parsing and the one-shot
//! load cache.

pub mod loader;
pub mod sources;

pub use loader::{DashboardLoader, LoadedData};
pub use sources::{DsvAccidentSource, DsvConfig, DsvPopulationSource};

use thiserror::Error;

/// Errors from the data layer.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DSV parse error: {0}")]
    Dsv(String),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
