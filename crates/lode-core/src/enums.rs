//! Classification enums shared by the pipeline stages.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` returning the same string used in storage and logs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// QueryType
// ---------------------------------------------------------------------------

/// Intent category assigned to an incoming query.
///
/// Declaration order is significant: when two categories score the same
/// number of pattern hits, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Factual,
    CurrentEvents,
    HowTo,
    Academic,
    Opinion,
    PriceInfo,
    Technical,
    Definition,
}

impl QueryType {
    /// Every query type in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Factual,
        Self::CurrentEvents,
        Self::HowTo,
        Self::Academic,
        Self::Opinion,
        Self::PriceInfo,
        Self::Technical,
        Self::Definition,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Factual => "factual",
            Self::CurrentEvents => "current_events",
            Self::HowTo => "how_to",
            Self::Academic => "academic",
            Self::Opinion => "opinion",
            Self::PriceInfo => "price_info",
            Self::Technical => "technical",
            Self::Definition => "definition",
        }
    }

    /// How recent the sources for this kind of query need to be.
    #[must_use]
    pub const fn freshness(self) -> Freshness {
        match self {
            Self::CurrentEvents | Self::PriceInfo => Freshness::High,
            Self::HowTo | Self::Opinion | Self::Technical => Freshness::Medium,
            Self::Factual | Self::Academic | Self::Definition => Freshness::Low,
        }
    }

    /// Sources best suited to this kind of query, most useful first.
    #[must_use]
    pub const fn recommended_sources(self) -> &'static [SourceKind] {
        use SourceKind::{Arxiv, DuckDuckGo, Google, NewsApi, Wikipedia};
        match self {
            Self::Factual | Self::Definition => &[Wikipedia, DuckDuckGo, Google],
            Self::CurrentEvents => &[NewsApi, Google, DuckDuckGo],
            Self::HowTo | Self::Technical => &[DuckDuckGo, Google, Wikipedia],
            Self::Academic => &[Arxiv, Wikipedia, Google],
            Self::Opinion | Self::PriceInfo => &[Google, DuckDuckGo],
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Freshness
// ---------------------------------------------------------------------------

/// Recency tier required of the sources for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Low,
    Medium,
    High,
}

impl Freshness {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FormatType
// ---------------------------------------------------------------------------

/// Layout of the synthesized answer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    #[default]
    Comprehensive,
    Summary,
    BulletPoints,
}

impl FormatType {
    pub const ALL: [Self; 3] = [Self::Comprehensive, Self::Summary, Self::BulletPoints];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Summary => "summary",
            Self::BulletPoints => "bullet_points",
        }
    }

    /// Parse a format name, falling back to [`FormatType::Comprehensive`]
    /// for anything unrecognized.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Maximum answer length in characters.
    #[must_use]
    pub const fn max_length(self) -> usize {
        match self {
            Self::Comprehensive => 1000,
            Self::Summary => 300,
            Self::BulletPoints => 500,
        }
    }

    #[must_use]
    pub const fn includes_citations(self) -> bool {
        !matches!(self, Self::Summary)
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Comprehensive => "Detailed answer with supporting facts and citations",
            Self::Summary => "Brief summary of key information",
            Self::BulletPoints => "Key points in bullet format with citations",
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "comprehensive" => Ok(Self::Comprehensive),
            "summary" => Ok(Self::Summary),
            "bullet_points" | "bullets" => Ok(Self::BulletPoints),
            other => Err(CoreError::UnknownVariant {
                kind: "format",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ResponseStatus
// ---------------------------------------------------------------------------

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    NoResults,
    LowConfidence,
    Error,
}

impl ResponseStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NoResults => "no_results",
            Self::LowConfidence => "low_confidence",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SourceKind
// ---------------------------------------------------------------------------

/// Reliability for a source name with no entry in the table.
pub const DEFAULT_RELIABILITY: f64 = 0.5;

/// Answer weight for a source name with no entry in the table.
pub const DEFAULT_ANSWER_WEIGHT: f64 = 0.5;

/// External information providers with a search adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Google,
    Wikipedia,
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
    #[serde(rename = "newsapi")]
    NewsApi,
    Arxiv,
}

impl SourceKind {
    pub const ALL: [Self; 5] = [
        Self::Google,
        Self::Wikipedia,
        Self::DuckDuckGo,
        Self::NewsApi,
        Self::Arxiv,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Wikipedia => "wikipedia",
            Self::DuckDuckGo => "duckduckgo",
            Self::NewsApi => "newsapi",
            Self::Arxiv => "arxiv",
        }
    }

    /// Prior trust in facts taken from this source.
    #[must_use]
    pub const fn reliability(self) -> f64 {
        match self {
            Self::Wikipedia => 0.9,
            Self::Arxiv => 0.95,
            Self::Google => 0.8,
            Self::NewsApi => 0.7,
            Self::DuckDuckGo => 0.6,
        }
    }

    /// Weight applied to fact confidence when computing an answer's overall confidence.
    #[must_use]
    pub const fn answer_weight(self) -> f64 {
        match self {
            Self::Wikipedia | Self::Arxiv => 1.0,
            Self::Google => 0.9,
            Self::NewsApi => 0.8,
            Self::DuckDuckGo => 0.7,
        }
    }

    /// Whether the provider refuses anonymous requests.
    #[must_use]
    pub const fn requires_credentials(self) -> bool {
        matches!(self, Self::Google | Self::NewsApi)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "wikipedia" => Ok(Self::Wikipedia),
            "duckduckgo" => Ok(Self::DuckDuckGo),
            "newsapi" => Ok(Self::NewsApi),
            "arxiv" => Ok(Self::Arxiv),
            other => Err(CoreError::UnknownVariant {
                kind: "source",
                value: other.to_string(),
            }),
        }
    }
}

/// Reliability of a source given by name.
///
/// Facts carry their source as a plain string so that sources without an
/// adapter (community Q&A sites, code hosts) can still be scored.
#[must_use]
pub fn source_reliability(name: &str) -> f64 {
    if let Ok(kind) = name.parse::<SourceKind>() {
        return kind.reliability();
    }
    match name.trim().to_lowercase().as_str() {
        "stackoverflow" | "github" => 0.8,
        _ => DEFAULT_RELIABILITY,
    }
}

/// Answer weight of a source given by name.
#[must_use]
pub fn source_answer_weight(name: &str) -> f64 {
    name.parse::<SourceKind>()
        .map_or(DEFAULT_ANSWER_WEIGHT, SourceKind::answer_weight)
}

// ---------------------------------------------------------------------------
// ValidationMethod
// ---------------------------------------------------------------------------

/// Which check established a fact's structure during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMethod {
    PatternMatchDefinition,
    PatternMatchQuantitative,
    PatternMatchDateFact,
    QuantitativeValidation,
    DateValidation,
    StructureValidation,
    Error,
}

impl ValidationMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PatternMatchDefinition => "pattern_match_definition",
            Self::PatternMatchQuantitative => "pattern_match_quantitative",
            Self::PatternMatchDateFact => "pattern_match_date_fact",
            Self::QuantitativeValidation => "quantitative_validation",
            Self::DateValidation => "date_validation",
            Self::StructureValidation => "structure_validation",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ValidationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn query_type_serde_matches_as_str() {
        for ty in QueryType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn source_kind_serde_matches_as_str() {
        for kind in SourceKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<SourceKind>().unwrap(), kind);
        }
    }

    #[rstest]
    #[case("wikipedia", 0.9)]
    #[case("arxiv", 0.95)]
    #[case("google", 0.8)]
    #[case("newsapi", 0.7)]
    #[case("duckduckgo", 0.6)]
    #[case("stackoverflow", 0.8)]
    #[case("GitHub", 0.8)]
    #[case("somewhere", 0.5)]
    fn reliability_table(#[case] name: &str, #[case] expected: f64) {
        assert!((source_reliability(name) - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case("wikipedia", 1.0)]
    #[case("arxiv", 1.0)]
    #[case("google", 0.9)]
    #[case("newsapi", 0.8)]
    #[case("duckduckgo", 0.7)]
    #[case("stackoverflow", 0.5)]
    fn answer_weight_table(#[case] name: &str, #[case] expected: f64) {
        assert!((source_answer_weight(name) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_format_falls_back_to_comprehensive() {
        assert_eq!(FormatType::parse_or_default("essay"), FormatType::Comprehensive);
        assert_eq!(FormatType::parse_or_default("Summary"), FormatType::Summary);
        assert_eq!(
            FormatType::parse_or_default("bullet_points"),
            FormatType::BulletPoints
        );
    }

    #[test]
    fn summary_is_the_only_format_without_citations() {
        let without: Vec<_> = FormatType::ALL
            .into_iter()
            .filter(|f| !f.includes_citations())
            .collect();
        assert_eq!(without, vec![FormatType::Summary]);
    }

    #[test]
    fn freshness_tiers() {
        assert_eq!(QueryType::CurrentEvents.freshness(), Freshness::High);
        assert_eq!(QueryType::PriceInfo.freshness(), Freshness::High);
        assert_eq!(QueryType::HowTo.freshness(), Freshness::Medium);
        assert_eq!(QueryType::Definition.freshness(), Freshness::Low);
    }

    #[test]
    fn every_query_type_recommends_a_source() {
        for ty in QueryType::ALL {
            assert!(!ty.recommended_sources().is_empty(), "{ty} has no sources");
        }
    }
}
