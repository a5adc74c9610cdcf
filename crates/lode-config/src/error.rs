//! Errors raised while loading or checking Lodestar configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider layer (defaults, TOML file, `LODE_*` environment) failed
    /// to merge or extract.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A search provider was requested without its credentials.
    #[error("{provider} credentials are not configured")]
    MissingCredentials { provider: &'static str },

    /// A threshold that must lie in the unit interval does not.
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// A count or cap that must be positive is zero.
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },

    /// A single adapter may not be given longer than the whole search.
    #[error(
        "search.adapter_timeout_secs ({adapter_timeout_secs}) exceeds search.deadline_secs ({deadline_secs})"
    )]
    TimeoutExceedsDeadline {
        adapter_timeout_secs: u64,
        deadline_secs: u64,
    },
}
