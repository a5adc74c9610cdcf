//! Knowledge store error types.

use thiserror::Error;

/// Errors from knowledge store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A stored value could not be read back.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A JSON column or payload failed to encode or decode.
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// The database file or its directory could not be accessed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
