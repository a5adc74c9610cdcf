//! Controller behavior.

use lode_core::enums::FormatType;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_cache_enabled() -> bool {
    true
}

/// Jaccard similarity a cached query must exceed to be reused.
const fn default_cache_similarity_threshold() -> f64 {
    0.8
}

const fn default_cache_candidates() -> usize {
    3
}

/// Validated confidence a fact must exceed to reach the answer.
const fn default_min_fact_confidence() -> f64 {
    0.3
}

fn default_submode() -> String {
    "normal".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    #[serde(default = "default_cache_similarity_threshold")]
    pub cache_similarity_threshold: f64,

    /// Cached queries inspected per lookup.
    #[serde(default = "default_cache_candidates")]
    pub cache_candidates: usize,

    #[serde(default = "default_min_fact_confidence")]
    pub min_fact_confidence: f64,

    #[serde(default = "default_submode")]
    pub default_submode: String,

    #[serde(default)]
    pub default_format: FormatType,

    /// Fixed seed for style decoration. Unset draws a fresh seed per query.
    #[serde(default)]
    pub style_seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: default_cache_enabled(),
            cache_similarity_threshold: default_cache_similarity_threshold(),
            cache_candidates: default_cache_candidates(),
            min_fact_confidence: default_min_fact_confidence(),
            default_submode: default_submode(),
            default_format: FormatType::default(),
            style_seed: None,
        }
    }
}

impl PipelineConfig {
    /// Reject thresholds outside the unit interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("pipeline.cache_similarity_threshold", self.cache_similarity_threshold),
            ("pipeline.min_fact_confidence", self.min_fact_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if self.cache_candidates == 0 {
            return Err(ConfigError::Zero {
                field: "pipeline.cache_candidates",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = PipelineConfig::default();
        assert!(config.cache_enabled);
        assert!((config.cache_similarity_threshold - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.cache_candidates, 3);
        assert!((config.min_fact_confidence - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.default_submode, "normal");
        assert_eq!(config.default_format, FormatType::Comprehensive);
        assert!(config.style_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let config = PipelineConfig {
            cache_similarity_threshold: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache_similarity_threshold"));
    }

    #[test]
    fn zero_candidates_is_rejected() {
        let config = PipelineConfig {
            cache_candidates: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Zero {
                field: "pipeline.cache_candidates"
            })
        ));
    }
}
