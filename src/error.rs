//! Error types for the biomarker-discovery library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum BiomarkerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No subtype named '{0}'")]
    SubtypeNotFound(String),

    #[error("No condition named '{condition}' in subtype '{subtype}'")]
    ConditionNotFound { subtype: String, condition: String },

    #[error("Invalid comparison: {0}")]
    InvalidComparison(String),

    #[error("Missing column '{0}' in measurement file")]
    MissingColumn(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, BiomarkerError>;
