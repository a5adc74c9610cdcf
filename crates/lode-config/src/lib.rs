//! # lode-config
//!
//! Layered configuration loading for Lodestar using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LODE_*` prefix, `__` as separator)
//! 2. Project-level `.lode/config.toml`
//! 3. User-level `~/.config/lodestar/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LODE_GOOGLE__API_KEY` -> `google.api_key`,
//! `LODE_PIPELINE__STYLE_SEED` -> `pipeline.style_seed`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lode_config::LodeConfig;
//!
//! let config = LodeConfig::load_with_dotenv().expect("config");
//!
//! if config.google.is_configured() {
//!     println!("Google CSE enabled");
//! }
//! ```

mod error;
mod google;
mod newsapi;
mod pipeline;
mod rate_limit;
mod search;
mod store;

pub use error::ConfigError;
pub use google::{GoogleConfig, GoogleCredentials};
pub use newsapi::NewsApiConfig;
pub use pipeline::PipelineConfig;
pub use rate_limit::RateLimitConfig;
pub use search::SearchConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LodeConfig {
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub newsapi: NewsApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl LodeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section that has constraints beyond its types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()?;
        self.rate_limit.validate()?;
        self.pipeline.validate()
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".lode/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("LODE_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lodestar").join("config.toml"))
    }

    /// Load `.env` from the workspace root, walking up from
    /// `CARGO_MANIFEST_DIR` when set. Silently does nothing if none is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credentials() {
        let config = LodeConfig::default();
        assert!(!config.google.is_configured());
        assert!(!config.newsapi.is_configured());
        assert!(config.pipeline.cache_enabled);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: LodeConfig = LodeConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.store.retention_days, 30);
    }
}
