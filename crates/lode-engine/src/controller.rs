//! The query pipeline, end to end.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use chrono::Utc;
use futures::FutureExt;
use lode_answer::{AnswerSynthesizer, available_formats};
use lode_config::{LodeConfig, PipelineConfig};
use lode_core::entities::{ExtractedFact, KnowledgeConcept, Query};
use lode_core::enums::ResponseStatus;
use lode_core::responses::{
    AnswerResponse, ComponentHealth, PipelineMetrics, SystemStatus, ValidationSummary,
};
use lode_facts::{FactValidator, InformationExtractor, QueryAnalyzer, extract_key_information};
use lode_search::SearchEngine;
use lode_store::{KnowledgeStore, QueryKey};
use lode_style::{apply_named, available_styles};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EngineError;
use crate::metrics::Metrics;

/// Mode recorded with every cached result.
pub const MODE: &str = "retrieval";

/// Confidence reported when facts were found but none survived validation.
const LOW_CONFIDENCE_SCORE: f64 = 0.3;

fn no_results_text(query: &str) -> String {
    format!(
        "I couldn't find any reliable information to answer your question about \"{query}\". \
         This might be because the topic is very specific, recent, or not well-documented online."
    )
}

fn low_confidence_text(query: &str) -> String {
    format!(
        "I found some information about \"{query}\", but the confidence is low. \
         The available sources don't provide reliable or consistent information on this topic."
    )
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[allow(clippy::cast_precision_loss)]
fn mean_confidence(facts: &[ExtractedFact]) -> f64 {
    if facts.is_empty() {
        return 0.0;
    }
    facts.iter().map(|f| f.confidence).sum::<f64>() / facts.len() as f64
}

/// Runs queries through cache lookup, search, fact extraction and
/// validation, answer synthesis, and styling.
pub struct Controller {
    analyzer: QueryAnalyzer,
    search: SearchEngine,
    extractor: InformationExtractor,
    validator: FactValidator,
    synthesizer: AnswerSynthesizer,
    store: KnowledgeStore,
    pipeline: PipelineConfig,
    max_results: usize,
    metrics: Metrics,
}

impl Controller {
    #[must_use]
    pub fn new(
        search: SearchEngine,
        store: KnowledgeStore,
        pipeline: PipelineConfig,
        max_results: usize,
    ) -> Self {
        Self {
            analyzer: QueryAnalyzer::new(),
            search,
            extractor: InformationExtractor::new(),
            validator: FactValidator::new(),
            synthesizer: AnswerSynthesizer::new(),
            store,
            pipeline,
            max_results,
            metrics: Metrics::default(),
        }
    }

    /// Controller over every configured source and the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the HTTP client cannot be built or the
    /// knowledge store cannot be opened.
    pub async fn from_config(config: &LodeConfig) -> Result<Self, EngineError> {
        let search = SearchEngine::from_config(config)?;
        let store = KnowledgeStore::open(config.store.database_path()).await?;
        tracing::info!(
            sources = ?search.available_sources(),
            store = %store.path().display(),
            "controller ready"
        );
        Ok(Self::new(
            search,
            store,
            config.pipeline.clone(),
            config.search.max_results,
        ))
    }

    #[must_use]
    pub const fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    #[must_use]
    pub fn metrics(&self) -> PipelineMetrics {
        self.metrics.snapshot()
    }

    /// Answer `query`, styling with the configured seed or, when none is set,
    /// a fresh OS-seeded RNG.
    pub async fn process_query(&self, query: &Query) -> AnswerResponse {
        let mut rng = match self.pipeline.style_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.process_query_with_rng(query, &mut rng).await
    }

    /// Answer `query`, drawing style decoration from `rng`.
    ///
    /// Never fails: every error, and any panic inside the pipeline, becomes a
    /// response with status `error`.
    pub async fn process_query_with_rng<R: Rng + ?Sized>(
        &self,
        query: &Query,
        rng: &mut R,
    ) -> AnswerResponse {
        let started = Instant::now();
        tracing::info!(
            query = %query.text,
            submode = %query.submode,
            format = %query.format,
            "processing query"
        );

        let outcome = AssertUnwindSafe(self.run(query)).catch_unwind().await;
        let mut response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => Self::error_response(query, &e),
            Err(payload) => {
                Self::error_response(query, &EngineError::Panicked(panic_message(&*payload)))
            }
        };

        if response.status != ResponseStatus::Error {
            response.answer = apply_named(&query.submode, &response.answer, rng);
        }
        response.processing_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        response.timestamp = Utc::now();

        self.metrics.record(
            response.status,
            response.cache_hit,
            response.processing_ms,
            response.confidence,
        );
        tracing::info!(
            status = %response.status,
            confidence = response.confidence,
            cache_hit = response.cache_hit,
            ms = response.processing_ms,
            "query processed"
        );
        response
    }

    fn error_response(query: &Query, e: &EngineError) -> AnswerResponse {
        tracing::error!(query = %query.text, %e, "query processing failed");
        let mut response = AnswerResponse::without_facts(
            query,
            ResponseStatus::Error,
            format!("I encountered an error while processing your query: {e}"),
            0.0,
        );
        response.error = Some(e.to_string());
        response
    }

    /// Unstyled response: from the cache when a close enough match exists,
    /// otherwise freshly computed. A cache entry that cannot be used falls
    /// back to exactly one fresh computation.
    async fn run(&self, query: &Query) -> Result<AnswerResponse, EngineError> {
        if self.pipeline.cache_enabled {
            match self.cached_answer(query).await {
                Ok(Some(response)) => return Ok(response),
                Ok(None) => {}
                Err(e) => tracing::warn!(%e, "cached answer unusable, computing a fresh one"),
            }
        }
        self.fresh_answer(query).await
    }

    async fn cached_answer(&self, query: &Query) -> Result<Option<AnswerResponse>, EngineError> {
        let candidates = self
            .store
            .retrieve_similar_queries(
                &query.text,
                query.user_id.as_deref(),
                self.pipeline.cache_candidates,
            )
            .await?;
        let Some(best) = candidates
            .into_iter()
            .next()
            .filter(|c| c.similarity > self.pipeline.cache_similarity_threshold)
        else {
            tracing::debug!("cache miss");
            return Ok(None);
        };

        let mut response: AnswerResponse = serde_json::from_value(best.record.result_payload)?;
        response.query.clone_from(&query.text);
        response.user_id.clone_from(&query.user_id);
        response.submode.clone_from(&query.submode);
        response.cache_hit = true;
        response.cache_similarity = Some(best.similarity);
        response.status = ResponseStatus::Success;
        response.error = None;
        tracing::info!(similarity = best.similarity, cached_id = best.record.id, "cache hit");
        Ok(Some(response))
    }

    async fn fresh_answer(&self, query: &Query) -> Result<AnswerResponse, EngineError> {
        let analysis = self.analyzer.analyze(&query.text);

        let results = self
            .search
            .search(&query.text, self.max_results, Some(analysis.recommended_sources.as_slice()))
            .await;
        if results.is_empty() {
            tracing::warn!(query = %query.text, "no search results");
            return Ok(AnswerResponse::without_facts(
                query,
                ResponseStatus::NoResults,
                no_results_text(&query.text),
                0.0,
            ));
        }
        tracing::debug!(results = results.len(), "search results gathered");

        let extracted = self.extractor.extract(&results);
        if extracted.is_empty() {
            tracing::warn!(query = %query.text, "no facts extracted");
            return Ok(AnswerResponse::without_facts(
                query,
                ResponseStatus::NoResults,
                no_results_text(&query.text),
                0.0,
            ));
        }
        tracing::debug!(facts = extracted.len(), "facts extracted");

        let kept: Vec<ExtractedFact> = self
            .validator
            .validate(&extracted)
            .into_iter()
            .filter(|v| {
                v.validation.is_valid && v.validation.confidence > self.pipeline.min_fact_confidence
            })
            .map(|v| ExtractedFact {
                confidence: v.validation.confidence,
                ..v.fact
            })
            .collect();
        if kept.is_empty() {
            tracing::warn!(query = %query.text, "no facts survived validation");
            return Ok(AnswerResponse::without_facts(
                query,
                ResponseStatus::LowConfidence,
                low_confidence_text(&query.text),
                LOW_CONFIDENCE_SCORE,
            ));
        }
        tracing::debug!(valid = kept.len(), "facts validated");

        let key_info = extract_key_information(&kept, &query.text);
        let answer = self
            .synthesizer
            .generate(&kept, &query.text, query.format, Some(&key_info));

        let response = AnswerResponse {
            query: query.text.clone(),
            user_id: query.user_id.clone(),
            submode: query.submode.clone(),
            format: query.format,
            answer: answer.answer,
            confidence: answer.confidence,
            sources_used_count: answer.sources_used,
            facts_analyzed_count: answer.facts_analyzed,
            citations: answer.citations,
            key_information: Some(key_info),
            validation_summary: Some(ValidationSummary {
                total_facts: extracted.len(),
                valid_facts: kept.len(),
                average_confidence: mean_confidence(&kept),
            }),
            query_analysis: Some(analysis),
            cache_hit: false,
            cache_similarity: None,
            status: ResponseStatus::Success,
            error: None,
            processing_ms: 0,
            timestamp: Utc::now(),
        };

        self.remember(query, &response, &kept).await;
        Ok(response)
    }

    /// Cache a fresh answer. Failures are logged and otherwise ignored.
    async fn remember(&self, query: &Query, response: &AnswerResponse, facts: &[ExtractedFact]) {
        let key = QueryKey {
            text: &query.text,
            user_id: query.user_id.as_deref(),
            mode: MODE,
            submode: &query.submode,
        };
        match self.store.store_query_result(&key, response, facts).await {
            Ok(id) => tracing::debug!(query_id = id, "answer cached"),
            Err(e) => tracing::warn!(%e, "failed to cache answer"),
        }
    }

    /// Drop cached answers older than `older_than_days`. Returns how many
    /// were removed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the store cannot be updated.
    pub async fn clear_cache(&self, older_than_days: u32) -> Result<u64, EngineError> {
        Ok(self.store.clear_cache(older_than_days).await?)
    }

    /// Concepts matching `term`, most popular first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the lookup fails.
    pub async fn search_knowledge_base(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<KnowledgeConcept>, EngineError> {
        Ok(self.store.search_knowledge_base(term, limit).await?)
    }

    pub async fn system_status(&self) -> SystemStatus {
        let knowledge_base = match self.store.get_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!(%e, "knowledge store statistics unavailable");
                None
            }
        };
        let sources = self.search.available_sources();

        let mut components = BTreeMap::new();
        for name in [
            "query_analyzer",
            "info_extractor",
            "fact_validator",
            "answer_synthesizer",
            "style_processor",
        ] {
            components.insert(name.to_string(), ComponentHealth::Operational);
        }
        components.insert(
            "search_engine".to_string(),
            if sources.is_empty() {
                ComponentHealth::Unavailable
            } else {
                ComponentHealth::Operational
            },
        );
        components.insert(
            "knowledge_store".to_string(),
            if knowledge_base.is_some() {
                ComponentHealth::Operational
            } else {
                ComponentHealth::Degraded
            },
        );

        SystemStatus {
            components,
            available_sources: sources.iter().map(|s| s.as_str().to_string()).collect(),
            metrics: self.metrics.snapshot(),
            knowledge_base,
            available_styles: available_styles(),
            available_formats: available_formats(),
        }
    }
}
