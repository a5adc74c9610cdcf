//! NewsAPI configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewsApiConfig {
    /// API key from newsapi.org.
    #[serde(default)]
    pub api_key: String,
}

impl NewsApiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        if self.is_configured() {
            Ok(&self.api_key)
        } else {
            Err(ConfigError::MissingCredentials { provider: "newsapi" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!NewsApiConfig::default().is_configured());
        assert!(NewsApiConfig::default().api_key().is_err());
    }

    #[test]
    fn configured_with_key() {
        let config = NewsApiConfig {
            api_key: "news-key".into(),
        };
        assert_eq!(config.api_key().unwrap(), "news-key");
    }
}
