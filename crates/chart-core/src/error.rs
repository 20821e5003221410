// File: crates/chart-core/src/error.rs
// Summary: Library error type shared by every pipeline stage.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Container too small / malformed layout parameters.
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    #[error("failed to load {source_name}: {reason}")]
    Load { source_name: String, reason: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' is not a number: '{value}'")]
    ParseNumber { row: usize, column: String, value: String },

    #[error("total of categories must be positive, got {0}")]
    NonPositiveTotal(f64),

    #[error("no data: {0}")]
    EmptyData(String),

    #[error("topology has no object named '{0}'")]
    UnknownObject(String),

    #[error("malformed topology: {0}")]
    Topology(String),

    #[error("config error: {0}")]
    Config(String),
}
