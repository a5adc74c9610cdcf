//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use lode_config::LodeConfig;
use lode_core::enums::{FormatType, SourceKind};

#[test]
fn loads_credentials_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[google]
api_key = "AIza-toml"
cse_id = "cx-toml"

[newsapi]
api_key = "news-toml"
"#,
        )?;

        let config: LodeConfig = Figment::from(Serialized::defaults(LodeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.google.is_configured());
        assert_eq!(config.google.cse_id, "cx-toml");
        assert_eq!(config.newsapi.api_key, "news-toml");
        Ok(())
    });
}

#[test]
fn loads_pipeline_and_search_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[search]
max_results = 5
deadline_secs = 12
disabled_sources = ["arxiv"]

[rate_limit]
google = 3

[store]
path = "kb.db"
retention_days = 7

[pipeline]
cache_similarity_threshold = 0.9
default_format = "bullet_points"
default_submode = "dark"
style_seed = 42
"#,
        )?;

        let config: LodeConfig = Figment::from(Serialized::defaults(LodeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.deadline_secs, 12);
        assert_eq!(config.search.adapter_timeout_secs, 10);
        assert!(config.search.is_disabled("arxiv"));
        assert_eq!(config.rate_limit.per_minute(SourceKind::Google), Some(3));
        assert_eq!(config.rate_limit.per_minute(SourceKind::NewsApi), Some(100));
        assert_eq!(config.store.path, "kb.db");
        assert_eq!(config.store.retention_days, 7);
        assert!((config.pipeline.cache_similarity_threshold - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.pipeline.default_format, FormatType::BulletPoints);
        assert_eq!(config.pipeline.default_submode, "dark");
        assert_eq!(config.pipeline.style_seed, Some(42));
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[newsapi]
api_key = "from-toml"
"#,
        )?;
        jail.set_env("LODE_NEWSAPI__API_KEY", "from-env");

        let config: LodeConfig = Figment::from(Serialized::defaults(LodeConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("LODE_").split("__"))
            .extract()?;

        assert_eq!(config.newsapi.api_key, "from-env");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lode")?;
        jail.create_file(
            ".lode/config.toml",
            r#"
[search]
max_results = 3
"#,
        )?;

        let config = LodeConfig::load().expect("config loads");
        assert_eq!(config.search.max_results, 3);
        Ok(())
    });
}

#[test]
fn invalid_threshold_fails_load() {
    Jail::expect_with(|jail| {
        jail.set_env("LODE_PIPELINE__MIN_FACT_CONFIDENCE", "2.5");
        let err = LodeConfig::load().unwrap_err();
        assert!(err.to_string().contains("min_fact_confidence"));
        Ok(())
    });
}
