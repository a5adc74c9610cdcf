//! Controller error types.

use thiserror::Error;

/// Errors from building or running the controller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The source adapters could not be built.
    #[error("Source setup failed: {0}")]
    Source(#[from] lode_sources::SourceError),

    /// A knowledge store operation failed.
    #[error("Knowledge store error: {0}")]
    Store(#[from] lode_store::StoreError),

    /// A cached payload no longer decodes as a response.
    #[error("Cached payload is unreadable: {0}")]
    CachePayload(#[from] serde_json::Error),

    /// A pipeline stage panicked.
    #[error("Pipeline panicked: {0}")]
    Panicked(String),
}
