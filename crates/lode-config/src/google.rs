//! Google Custom Search configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// API key from the Google Cloud console.
    #[serde(default)]
    pub api_key: String,

    /// Programmable Search Engine id (`cx`).
    #[serde(default)]
    pub cse_id: String,
}

/// Borrowed Google credentials, present only when both fields are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoogleCredentials<'a> {
    pub api_key: &'a str,
    pub cse_id: &'a str,
}

impl GoogleConfig {
    /// The adapter needs both the key and the engine id.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.cse_id.is_empty()
    }

    /// Both credentials, or `NotConfigured` when either is missing.
    pub fn credentials(&self) -> Result<GoogleCredentials<'_>, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::MissingCredentials { provider: "google" });
        }
        Ok(GoogleCredentials {
            api_key: &self.api_key,
            cse_id: &self.cse_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = GoogleConfig::default();
        assert!(!config.is_configured());
        assert!(matches!(
            config.credentials(),
            Err(ConfigError::MissingCredentials { provider: "google" })
        ));
    }

    #[test]
    fn key_alone_is_not_enough() {
        let config = GoogleConfig {
            api_key: "AIza-test".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn configured_when_both_set() {
        let config = GoogleConfig {
            api_key: "AIza-test".into(),
            cse_id: "cx-123".into(),
        };
        let creds = config.credentials().expect("configured");
        assert_eq!(creds.api_key, "AIza-test");
        assert_eq!(creds.cse_id, "cx-123");
    }
}
