//! Cross-cutting error types for Lodestar.
//!
//! Stage-specific errors (`SourceError`, `StoreError`, `ExtractionError`)
//! live in their own crates. The controller converts every failure into a
//! response status, so no unified error type exists.

use thiserror::Error;

/// Errors that can be raised by any Lodestar crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A name did not match any variant of a closed enum.
    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
