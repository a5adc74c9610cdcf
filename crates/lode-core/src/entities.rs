//! Entities that flow between pipeline stages.
//!
//! `Query` is the immutable input. `SearchResult`, `ExtractedFact`, and
//! `ValidationResult` live for one run. `CachedQueryRecord` and
//! `KnowledgeConcept` are the durable rows owned by the knowledge store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FormatType, Freshness, QueryType, SourceKind, ValidationMethod};

/// One request entering the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub user_id: Option<String>,
    /// Style name applied to the final answer. Unknown names leave the text unstyled.
    pub submode: String,
    pub format: FormatType,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user_id: None,
            submode: "normal".to_string(),
            format: FormatType::Comprehensive,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_submode(mut self, submode: impl Into<String>) -> Self {
        self.submode = submode.into();
        self
    }

    #[must_use]
    pub const fn with_format(mut self, format: FormatType) -> Self {
        self.format = format;
        self
    }
}

/// A single hit returned by a source adapter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source: SourceKind,
    pub relevance_score: f64,
    pub fetched_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl SearchResult {
    pub fn new(
        source: SourceKind,
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        relevance_score: f64,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source,
            relevance_score,
            fetched_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// A candidate fact pulled out of a search hit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExtractedFact {
    pub text: String,
    pub confidence: f64,
    /// Source name. Kept as a string so facts from sources without an
    /// adapter can still be scored and cited.
    pub source: String,
    pub source_url: String,
    pub context: String,
    pub entities: Vec<String>,
    pub extracted_at: DateTime<Utc>,
}

/// Outcome of validating one extracted fact.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ValidationResult {
    pub fact: String,
    pub is_valid: bool,
    pub confidence: f64,
    pub contradictions: Vec<String>,
    pub supporting_sources: Vec<String>,
    pub method: ValidationMethod,
    pub checked_at: DateTime<Utc>,
}

/// Entity mentions found in a query, bucketed by kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QueryEntities {
    pub people: Vec<String>,
    pub places: Vec<String>,
    pub organizations: Vec<String>,
    pub technologies: Vec<String>,
    pub concepts: Vec<String>,
}

impl QueryEntities {
    /// Every entity across all buckets, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.people
            .iter()
            .chain(&self.places)
            .chain(&self.organizations)
            .chain(&self.technologies)
            .chain(&self.concepts)
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Classification of a query produced before searching.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QueryAnalysis {
    pub query_type: QueryType,
    pub search_terms: Vec<String>,
    pub entities: QueryEntities,
    pub freshness: Freshness,
    pub recommended_sources: Vec<SourceKind>,
    pub confidence: f64,
}

/// A persisted query result row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CachedQueryRecord {
    pub id: i64,
    pub query_text: String,
    pub query_hash: String,
    pub user_id: Option<String>,
    pub mode: String,
    pub submode: String,
    pub result_payload: serde_json::Value,
    pub confidence: f64,
    pub sources: Vec<String>,
    pub stored_at: DateTime<Utc>,
}

/// A cached record paired with its similarity to the incoming query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SimilarQuery {
    pub record: CachedQueryRecord,
    pub similarity: f64,
}

/// A fact row attached to a cached query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StoredFact {
    pub id: i64,
    pub query_id: i64,
    pub text: String,
    pub source: String,
    pub source_url: String,
    pub confidence: f64,
    pub context: String,
    pub entities: Vec<String>,
    pub stored_at: DateTime<Utc>,
}

/// A concept in the long-lived knowledge index.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KnowledgeConcept {
    pub id: i64,
    /// Lowercased, whitespace-collapsed key.
    pub concept: String,
    pub definition: String,
    pub related_query_ids: Vec<i64>,
    pub popularity: f64,
    pub last_accessed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
