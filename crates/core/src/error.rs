//! Shared error model.

use thiserror::Error;

/// Result type used across the core crates.
pub type CoreResult<T> = Result<T, CoreError>;

/// Deterministic, pre-flight failures.
///
/// Keep this focused on conditions discovered before any work starts
/// (configuration and validation). Per-unit generation or parse failures are
/// counted and skipped by the pipelines, never surfaced through this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A configuration value is unusable (e.g. empty range, zero count).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
