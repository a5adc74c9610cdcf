//! Source adapter error types.

use lode_core::enums::SourceKind;
use thiserror::Error;

/// Errors that can occur when querying a search provider.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The local request budget for this source is spent.
    #[error("{kind} request budget exhausted")]
    Throttled { kind: SourceKind },

    /// The provider needs credentials that are not configured.
    #[error("{0} is not configured")]
    NotConfigured(SourceKind),
}
