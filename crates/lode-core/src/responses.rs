//! Response types returned by the controller.
//!
//! `AnswerResponse` is the terminal output of one pipeline run and also the
//! payload persisted in the knowledge store, so every field round-trips
//! through JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Query, QueryAnalysis};
use crate::enums::{FormatType, ResponseStatus};

/// Numbered reference to the fact an answer sentence came from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Citation {
    pub number: u32,
    pub source: String,
    pub url: String,
    pub fact_preview: String,
    pub confidence: f64,
}

/// A high-confidence fact relevant to the query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KeyFact {
    pub fact: String,
    pub confidence: f64,
    pub source: String,
    pub url: String,
}

/// A fact that reads as a definition of its first word.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DefinitionEntry {
    pub term: String,
    pub definition: String,
    pub confidence: f64,
    pub source: String,
}

/// A number found in a relevant fact, with the fact as context.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QuantityEntry {
    pub value: String,
    pub context: String,
    pub confidence: f64,
}

/// Facts bucketed by what they say about the query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KeyInformation {
    pub main_facts: Vec<KeyFact>,
    pub definitions: Vec<DefinitionEntry>,
    pub dates: Vec<String>,
    pub people: Vec<String>,
    pub places: Vec<String>,
    pub organizations: Vec<String>,
    pub quantitative_data: Vec<QuantityEntry>,
    pub sources: Vec<String>,
}

/// Counts from the validation stage of a run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ValidationSummary {
    pub total_facts: usize,
    pub valid_facts: usize,
    pub average_confidence: f64,
}

/// Terminal output of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnswerResponse {
    pub query: String,
    pub user_id: Option<String>,
    pub submode: String,
    pub format: FormatType,
    pub answer: String,
    pub confidence: f64,
    pub sources_used_count: usize,
    pub facts_analyzed_count: usize,
    pub citations: Vec<Citation>,
    pub key_information: Option<KeyInformation>,
    pub validation_summary: Option<ValidationSummary>,
    pub query_analysis: Option<QueryAnalysis>,
    pub cache_hit: bool,
    pub cache_similarity: Option<f64>,
    pub status: ResponseStatus,
    pub error: Option<String>,
    pub processing_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl AnswerResponse {
    /// A response with no facts behind it: fixed answer text and no citations.
    pub fn without_facts(
        query: &Query,
        status: ResponseStatus,
        answer: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            query: query.text.clone(),
            user_id: query.user_id.clone(),
            submode: query.submode.clone(),
            format: query.format,
            answer: answer.into(),
            confidence,
            sources_used_count: 0,
            facts_analyzed_count: 0,
            citations: Vec::new(),
            key_information: None,
            validation_summary: None,
            query_analysis: None,
            cache_hit: false,
            cache_similarity: None,
            status,
            error: None,
            processing_ms: 0,
            timestamp: Utc::now(),
        }
    }
}

/// Running counters kept by the controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PipelineMetrics {
    pub total_queries: u64,
    pub successful_queries: u64,
    pub failed_queries: u64,
    pub cache_hits: u64,
    pub average_response_ms: f64,
    pub average_confidence: f64,
    pub cache_hit_rate: f64,
}

/// Fact count for one source.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SourceCount {
    pub source: String,
    pub count: u64,
}

/// Popularity of one concept.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConceptPopularity {
    pub concept: String,
    pub popularity: f64,
}

/// Knowledge store statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StoreStats {
    pub total_queries: u64,
    pub total_facts: u64,
    pub total_concepts: u64,
    pub recent_queries_24h: u64,
    pub average_confidence: f64,
    pub top_sources: Vec<SourceCount>,
    pub top_concepts: Vec<ConceptPopularity>,
    pub database_size_mb: f64,
}

/// Description of an answer format.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormatInfo {
    pub format: FormatType,
    pub description: String,
    pub max_length: usize,
    pub include_citations: bool,
}

/// Description of an answer style.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StyleInfo {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub emoji: String,
    pub characteristics: Vec<String>,
}

/// Health of one pipeline component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComponentHealth {
    Operational,
    Degraded,
    Unavailable,
}

/// Snapshot returned by the controller's status operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SystemStatus {
    pub components: BTreeMap<String, ComponentHealth>,
    pub available_sources: Vec<String>,
    pub metrics: PipelineMetrics,
    pub knowledge_base: Option<StoreStats>,
    pub available_styles: Vec<StyleInfo>,
    pub available_formats: Vec<FormatInfo>,
}
