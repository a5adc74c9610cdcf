//! Search fan-out configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_max_results() -> usize {
    10
}

/// Overall deadline for one fan-out, in seconds.
const fn default_deadline_secs() -> u64 {
    30
}

/// Per-adapter share of the deadline, in seconds.
const fn default_adapter_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("lodestar/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Results kept after ranking.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    #[serde(default = "default_adapter_timeout_secs")]
    pub adapter_timeout_secs: u64,

    /// User-Agent header sent to every provider.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Source names to leave out even when available (e.g. `["duckduckgo"]`).
    #[serde(default)]
    pub disabled_sources: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            deadline_secs: default_deadline_secs(),
            adapter_timeout_secs: default_adapter_timeout_secs(),
            user_agent: default_user_agent(),
            disabled_sources: Vec::new(),
        }
    }
}

impl SearchConfig {
    pub fn is_disabled(&self, source: &str) -> bool {
        self.disabled_sources
            .iter()
            .any(|s| s.eq_ignore_ascii_case(source))
    }

    /// At least one result, a non-zero deadline, and no adapter timeout
    /// longer than the deadline.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::Zero {
                field: "search.max_results",
            });
        }
        if self.deadline_secs == 0 {
            return Err(ConfigError::Zero {
                field: "search.deadline_secs",
            });
        }
        if self.adapter_timeout_secs > self.deadline_secs {
            return Err(ConfigError::TimeoutExceedsDeadline {
                adapter_timeout_secs: self.adapter_timeout_secs,
                deadline_secs: self.deadline_secs,
            });
        }
        Ok(())
    }
}
