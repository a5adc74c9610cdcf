//! Knowledge store configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const fn default_retention_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Database file. Empty means the platform data directory
    /// (`~/.local/share/lodestar/knowledge.db` on Linux).
    #[serde(default)]
    pub path: String,

    /// Age in days after which `clear-cache` removes cached queries by default.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            retention_days: default_retention_days(),
        }
    }
}

impl StoreConfig {
    /// Resolved database path.
    pub fn database_path(&self) -> PathBuf {
        if !self.path.is_empty() {
            return PathBuf::from(&self.path);
        }
        dirs::data_dir()
            .map(|p| p.join("lodestar"))
            .unwrap_or_else(|| PathBuf::from(".lode"))
            .join("knowledge.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = StoreConfig {
            path: "/tmp/kb.db".into(),
            ..Default::default()
        };
        assert_eq!(config.database_path(), PathBuf::from("/tmp/kb.db"));
    }

    #[test]
    fn default_path_ends_in_knowledge_db() {
        let config = StoreConfig::default();
        assert_eq!(config.retention_days, 30);
        assert!(config.database_path().ends_with("knowledge.db"));
    }
}
