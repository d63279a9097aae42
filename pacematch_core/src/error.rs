//! Error types for the pacematch_core library.
//!
//! The matching engine itself never fails; these errors come from the
//! file-facing helpers (loaders, report log, export, config).

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pacematch_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plan failed structural validation
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// Activity data could not be used
    #[error("Activity error: {0}")]
    Activity(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
