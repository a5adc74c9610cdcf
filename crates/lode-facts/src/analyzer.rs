//! Query intent classification, search-term and entity extraction.

use lode_core::entities::{QueryAnalysis, QueryEntities};
use lode_core::enums::QueryType;
use regex::Regex;

use crate::patterns::{
    CAPITALIZED_WORD, HONORIFICS, QUERY_CONCEPTS, QUERY_ORGANIZATIONS, QUERY_PLACES,
    QUERY_TECHNOLOGIES, QUERY_TYPE_PATTERNS, STOP_WORDS, WORD,
};

/// Classifies a raw query and decides where to look for an answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryAnalyzer;

impl QueryAnalyzer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Full analysis of one query.
    #[must_use]
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let lowered = query.to_lowercase();
        let (query_type, matched_patterns) = classify(&lowered);
        let analysis = QueryAnalysis {
            query_type,
            search_terms: search_terms(&lowered),
            entities: extract_entities(query),
            freshness: query_type.freshness(),
            recommended_sources: query_type.recommended_sources().to_vec(),
            confidence: confidence(query, matched_patterns),
        };
        tracing::debug!(
            query,
            query_type = %analysis.query_type,
            confidence = analysis.confidence,
            "query analyzed"
        );
        analysis
    }
}

/// Winning query type and how many of its patterns matched.
///
/// Each type scores the total number of pattern hits in the lowercased
/// query. The highest score wins; ties go to the type declared first. A
/// query nothing matches is factual.
fn classify(lowered: &str) -> (QueryType, usize) {
    let mut best: Option<(QueryType, usize, usize)> = None;
    for (query_type, patterns) in QUERY_TYPE_PATTERNS.iter() {
        let hits: usize = patterns.iter().map(|p| p.find_iter(lowered).count()).sum();
        if hits == 0 {
            continue;
        }
        if best.is_none_or(|(_, top, _)| hits > top) {
            let matched = patterns.iter().filter(|p| p.is_match(lowered)).count();
            best = Some((*query_type, hits, matched));
        }
    }
    best.map_or((QueryType::Factual, 0), |(ty, _, matched)| (ty, matched))
}

#[allow(clippy::cast_precision_loss)]
fn confidence(query: &str, matched_patterns: usize) -> f64 {
    let mut confidence = 0.5 + 0.1 * matched_patterns as f64;
    if query.chars().count() > 10 {
        confidence += 0.1;
    }
    if query.contains('?') {
        confidence += 0.1;
    }
    confidence.min(1.0)
}

/// Content words of the query longer than two characters. Falls back to
/// the whole query when every word is filtered out.
fn search_terms(lowered: &str) -> Vec<String> {
    let terms: Vec<String> = WORD
        .find_iter(lowered)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect();
    if terms.is_empty() {
        vec![lowered.trim().to_string()]
    } else {
        terms
    }
}

fn vocabulary_hits(query: &str, patterns: &[Regex]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for pattern in patterns {
        for m in pattern.find_iter(query) {
            let entity = m.as_str().to_lowercase();
            if !found.contains(&entity) {
                found.push(entity);
            }
        }
    }
    found
}

/// Named things mentioned in the query.
///
/// Technologies, places, organizations, and concepts come from fixed
/// vocabularies. People are the remaining capitalized words that are not
/// question words, honorifics, or part of another entity.
#[must_use]
pub fn extract_entities(query: &str) -> QueryEntities {
    let mut entities = QueryEntities {
        people: Vec::new(),
        places: vocabulary_hits(query, &QUERY_PLACES),
        organizations: vocabulary_hits(query, &QUERY_ORGANIZATIONS),
        technologies: vocabulary_hits(query, &QUERY_TECHNOLOGIES),
        concepts: vocabulary_hits(query, &QUERY_CONCEPTS),
    };

    let claimed: Vec<String> = entities.iter().map(str::to_string).collect();
    for m in CAPITALIZED_WORD.find_iter(query) {
        let word = m.as_str();
        let lower = word.to_lowercase();
        if STOP_WORDS.contains(&lower.as_str()) || HONORIFICS.contains(&lower.as_str()) {
            continue;
        }
        if claimed
            .iter()
            .any(|c| c.split_whitespace().any(|part| part == lower))
        {
            continue;
        }
        if !entities.people.iter().any(|p| p == word) {
            entities.people.push(word.to_string());
        }
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use lode_core::enums::{Freshness, SourceKind};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("What is the capital of France?", QueryType::Factual)]
    #[case("latest news on the election", QueryType::CurrentEvents)]
    #[case("how to bake bread step by step", QueryType::HowTo)]
    #[case("arxiv research paper on transformers", QueryType::Academic)]
    #[case("which laptop is best, what do you recommend", QueryType::Opinion)]
    #[case("price to buy a used car in usd", QueryType::PriceInfo)]
    #[case("python database bug in my code", QueryType::Technical)]
    #[case("explain and describe recursion", QueryType::Definition)]
    fn classifies_intent(#[case] query: &str, #[case] expected: QueryType) {
        assert_eq!(QueryAnalyzer::new().analyze(query).query_type, expected);
    }

    #[test]
    fn unmatched_query_is_factual() {
        let analysis = QueryAnalyzer::new().analyze("zebra stripes");
        assert_eq!(analysis.query_type, QueryType::Factual);
        assert!((analysis.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn ties_go_to_first_declared_type() {
        // One factual hit ("what") and one definition hit ("what is" counts
        // once for definition, "what" once for factual).
        let (ty, _) = classify("what is rust");
        assert_eq!(ty, QueryType::Factual);
    }

    #[test]
    fn recommendations_follow_type() {
        let analysis = QueryAnalyzer::new().analyze("latest breaking news today");
        assert_eq!(analysis.query_type, QueryType::CurrentEvents);
        assert_eq!(analysis.freshness, Freshness::High);
        assert_eq!(analysis.recommended_sources[0], SourceKind::NewsApi);
    }

    #[test]
    fn confidence_is_capped() {
        let analysis = QueryAnalyzer::new()
            .analyze("What is the definition of facts, who was it, is it true?");
        assert!(analysis.confidence <= 1.0);
        assert!(analysis.confidence >= 0.9);
    }

    #[test]
    fn search_terms_drop_stop_words_and_short_words() {
        let terms = search_terms("what is the capital of france");
        assert_eq!(terms, vec!["capital", "france"]);
    }

    #[test]
    fn search_terms_fall_back_to_query() {
        assert_eq!(search_terms("who is it"), vec!["who is it"]);
    }

    #[test]
    fn vocabulary_entities() {
        let entities = extract_entities("Does Google use Python and Kubernetes in London?");
        assert_eq!(entities.organizations, vec!["google"]);
        assert_eq!(entities.places, vec!["london"]);
        assert_eq!(entities.technologies, vec!["python", "kubernetes"]);
        assert!(entities.people.is_empty(), "{:?}", entities.people);
    }

    #[test]
    fn people_are_leftover_capitalized_words() {
        let entities = extract_entities("Who is Alan Turing and what did Dr. Hopper build?");
        assert_eq!(entities.people, vec!["Alan", "Turing", "Hopper"]);
    }

    #[test]
    fn concepts_are_detected() {
        let entities = extract_entities("effects of climate change on renewable energy");
        assert_eq!(entities.concepts, vec!["climate change", "renewable energy"]);
    }
}
