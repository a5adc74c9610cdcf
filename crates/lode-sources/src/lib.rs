//! # lode-sources
//!
//! Search provider adapters for Lodestar.
//!
//! Every provider sits behind the [`SourceAdapter`] trait:
//! - Google Programmable Search (needs an API key and engine id)
//! - Wikipedia REST summary + MediaWiki search
//! - DuckDuckGo Instant Answer
//! - NewsAPI (needs an API key)
//! - arXiv export API
//!
//! [`build_adapters`] assembles the set allowed by configuration, each
//! wrapped in its own token-bucket budget.

pub mod arxiv;
pub mod duckduckgo;
pub mod google;
pub mod newsapi;
pub mod wikipedia;

mod error;
mod http;
mod rate_limit;

pub use error::SourceError;
pub use http::{SourceClient, check_response};
pub use rate_limit::{RateLimited, TokenBucket};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lode_config::LodeConfig;
use lode_core::entities::SearchResult;
use lode_core::enums::SourceKind;

use crate::arxiv::ArxivAdapter;
use crate::duckduckgo::DuckDuckGoAdapter;
use crate::google::GoogleAdapter;
use crate::newsapi::NewsApiAdapter;
use crate::wikipedia::WikipediaAdapter;

// ── Adapter contract ───────────────────────────────────────────────

/// One external search provider.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Which provider this adapter talks to.
    fn kind(&self) -> SourceKind;

    /// Search for `query`, returning at most `max_results` hits.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failures, non-success statuses,
    /// unparseable bodies, missing credentials, or an exhausted budget.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SourceError>;

    /// Like [`SourceAdapter::search`], but logs any failure and returns no hits.
    async fn search_or_empty(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        self.search(query, max_results).await.unwrap_or_else(|e| {
            tracing::warn!(source = %self.kind(), %e, "source search failed");
            Vec::new()
        })
    }
}

// ── Assembly ───────────────────────────────────────────────────────

/// Build every adapter the configuration allows.
///
/// Keyless providers are always included; Google and NewsAPI only when
/// their credentials are set. Sources named in `search.disabled_sources`
/// are left out. All adapters share one HTTP session.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the HTTP client cannot be built.
pub fn build_adapters(config: &LodeConfig) -> Result<Vec<Arc<dyn SourceAdapter>>, SourceError> {
    let client = SourceClient::new(
        &config.search.user_agent,
        Duration::from_secs(config.search.adapter_timeout_secs.max(1)),
    )?;

    let mut adapters: Vec<Arc<dyn SourceAdapter>> = Vec::new();
    for kind in SourceKind::ALL {
        if config.search.is_disabled(kind.as_str()) {
            tracing::debug!(source = %kind, "source disabled by configuration");
            continue;
        }
        let adapter: Arc<dyn SourceAdapter> = match kind {
            SourceKind::Google => match config.google.credentials() {
                Ok(creds) => Arc::new(GoogleAdapter::new(
                    client.clone(),
                    creds.api_key,
                    creds.cse_id,
                )),
                Err(_) => continue,
            },
            SourceKind::NewsApi => match config.newsapi.api_key() {
                Ok(key) => Arc::new(NewsApiAdapter::new(client.clone(), key)),
                Err(_) => continue,
            },
            SourceKind::Wikipedia => Arc::new(WikipediaAdapter::new(client.clone())),
            SourceKind::DuckDuckGo => Arc::new(DuckDuckGoAdapter::new(client.clone())),
            SourceKind::Arxiv => Arc::new(ArxivAdapter::new(client.clone())),
        };
        let adapter = match config.rate_limit.per_minute(kind) {
            Some(per_minute) => Arc::new(RateLimited::new(adapter, TokenBucket::per_minute(per_minute)))
                as Arc<dyn SourceAdapter>,
            None => adapter,
        };
        adapters.push(adapter);
    }
    Ok(adapters)
}
