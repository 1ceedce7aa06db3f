//! Error types for the operations layer.

use thiserror::Error;

/// Errors from the operations layer.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Error from loading rules or strict classification.
    #[error(transparent)]
    Rules(#[from] cardio_rules::RuleError),

    /// Error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
