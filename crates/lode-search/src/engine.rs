//! Concurrent fan-out over the configured source adapters.

use std::sync::Arc;
use std::time::Duration;

use lode_config::LodeConfig;
use lode_core::entities::SearchResult;
use lode_core::enums::SourceKind;
use lode_sources::{SourceAdapter, SourceError, build_adapters};
use tokio::task::JoinSet;

use crate::rank::{dedupe, rank};

/// Fans a query out to every selected adapter at once and merges the hits.
pub struct SearchEngine {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    deadline: Duration,
    adapter_timeout: Duration,
}

impl SearchEngine {
    /// Engine over an explicit adapter set.
    ///
    /// `deadline` bounds the whole fan-out; `adapter_timeout` bounds each
    /// adapter on its own.
    #[must_use]
    pub fn new(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        deadline: Duration,
        adapter_timeout: Duration,
    ) -> Self {
        Self {
            adapters,
            deadline,
            adapter_timeout,
        }
    }

    /// Engine over every adapter the configuration allows.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the shared HTTP client cannot be built.
    pub fn from_config(config: &LodeConfig) -> Result<Self, SourceError> {
        Ok(Self::new(
            build_adapters(config)?,
            Duration::from_secs(config.search.deadline_secs),
            Duration::from_secs(config.search.adapter_timeout_secs),
        ))
    }

    /// Sources with a usable adapter, in registration order.
    #[must_use]
    pub fn available_sources(&self) -> Vec<SourceKind> {
        self.adapters.iter().map(|a| a.kind()).collect()
    }

    /// Adapters to run for a requested source list.
    ///
    /// No list means every adapter. A list that matches nothing available
    /// also falls back to every adapter.
    fn select(&self, sources: Option<&[SourceKind]>) -> Vec<Arc<dyn SourceAdapter>> {
        let Some(wanted) = sources else {
            return self.adapters.clone();
        };
        let chosen: Vec<_> = wanted
            .iter()
            .filter_map(|kind| self.adapters.iter().find(|a| a.kind() == *kind))
            .cloned()
            .collect();
        if chosen.is_empty() {
            tracing::debug!(?wanted, "no requested source available, using all sources");
            return self.adapters.clone();
        }
        chosen
    }

    /// Search every selected source concurrently and return at most
    /// `max_results` deduplicated hits, best first.
    ///
    /// A failing or slow adapter is logged and left out. If the overall
    /// deadline passes, pending adapters are aborted and the result is empty.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
        sources: Option<&[SourceKind]>,
    ) -> Vec<SearchResult> {
        let selected = self.select(sources);
        if selected.is_empty() || max_results == 0 {
            tracing::warn!("no search sources available");
            return Vec::new();
        }

        let per_source = max_results / selected.len() + 1;
        let count = selected.len();
        let mut tasks = JoinSet::new();
        for (position, adapter) in selected.into_iter().enumerate() {
            let query = query.to_string();
            let timeout = self.adapter_timeout;
            tasks.spawn(async move {
                let kind = adapter.kind();
                let outcome = tokio::time::timeout(timeout, adapter.search(&query, per_source)).await;
                (position, kind, outcome)
            });
        }

        let gathered = tokio::time::timeout(self.deadline, async {
            let mut buckets: Vec<Vec<SearchResult>> = vec![Vec::new(); count];
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((position, kind, Ok(Ok(hits)))) => {
                        tracing::debug!(source = %kind, hits = hits.len(), "source search complete");
                        buckets[position] = hits;
                    }
                    Ok((_, kind, Ok(Err(e)))) => {
                        tracing::warn!(source = %kind, %e, "source search failed");
                    }
                    Ok((_, kind, Err(_))) => {
                        tracing::warn!(source = %kind, timeout = ?self.adapter_timeout, "source search timed out");
                    }
                    Err(e) => tracing::warn!(%e, "source search task aborted"),
                }
            }
            buckets
        })
        .await;

        let Ok(buckets) = gathered else {
            tasks.abort_all();
            tracing::warn!(deadline = ?self.deadline, "search deadline exceeded");
            return Vec::new();
        };

        let merged = buckets.into_iter().flatten().collect();
        let mut ranked = rank(dedupe(merged), query);
        ranked.truncate(max_results);
        tracing::debug!(query, results = ranked.len(), "search complete");
        ranked
    }
}
