//! Per-source request caps.

use lode_core::enums::SourceKind;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_enabled() -> bool {
    true
}

const fn default_google() -> u32 {
    10
}

const fn default_newsapi() -> u32 {
    100
}

const fn default_open_source() -> u32 {
    1000
}

/// Requests per minute allowed for each source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_google")]
    pub google: u32,

    #[serde(default = "default_newsapi")]
    pub newsapi: u32,

    #[serde(default = "default_open_source")]
    pub duckduckgo: u32,

    #[serde(default = "default_open_source")]
    pub wikipedia: u32,

    #[serde(default = "default_open_source")]
    pub arxiv: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            google: default_google(),
            newsapi: default_newsapi(),
            duckduckgo: default_open_source(),
            wikipedia: default_open_source(),
            arxiv: default_open_source(),
        }
    }
}

impl RateLimitConfig {
    /// Cap for one source, or `None` when limiting is switched off.
    pub const fn per_minute(&self, source: SourceKind) -> Option<u32> {
        if !self.enabled {
            return None;
        }
        Some(match source {
            SourceKind::Google => self.google,
            SourceKind::NewsApi => self.newsapi,
            SourceKind::DuckDuckGo => self.duckduckgo,
            SourceKind::Wikipedia => self.wikipedia,
            SourceKind::Arxiv => self.arxiv,
        })
    }

    /// A zero cap would starve its source; switch limiting off instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        for (field, cap) in [
            ("rate_limit.google", self.google),
            ("rate_limit.newsapi", self.newsapi),
            ("rate_limit.duckduckgo", self.duckduckgo),
            ("rate_limit.wikipedia", self.wikipedia),
            ("rate_limit.arxiv", self.arxiv),
        ] {
            if cap == 0 {
                return Err(ConfigError::Zero { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_provider_quotas() {
        let config = RateLimitConfig::default();
        assert_eq!(config.per_minute(SourceKind::Google), Some(10));
        assert_eq!(config.per_minute(SourceKind::NewsApi), Some(100));
        assert_eq!(config.per_minute(SourceKind::Arxiv), Some(1000));
    }

    #[test]
    fn disabled_means_unlimited() {
        let config = RateLimitConfig {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(config.per_minute(SourceKind::Google), None);
    }

    #[test]
    fn zero_cap_is_rejected_only_while_enabled() {
        let mut config = RateLimitConfig {
            wikipedia: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Zero {
                field: "rate_limit.wikipedia"
            })
        ));
        config.enabled = false;
        assert!(config.validate().is_ok());
    }
}
