//! Cross-checking extracted facts against each other.
//!
//! A fact is scored on its own structure, then compared with every other
//! fact in the batch: related facts that carry opposing markers count as
//! contradictions, related facts from other sources count as support.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::Utc;
use lode_core::entities::{ExtractedFact, ValidationResult};
use lode_core::enums::ValidationMethod;
use lode_core::responses::Citation;
use lode_core::text::{clamp_unit, preview, word_set};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::patterns::{
    CONTRADICTION_PAIRS, DIGITS, MONTH_NAME, VALIDATION_PATTERNS, ValidationShape,
};

const CONTRADICTION_OVERLAP: usize = 2;
const SUPPORT_OVERLAP: usize = 3;
const MAX_CONTRADICTIONS: usize = 3;
const MAX_SUPPORTING_SOURCES: usize = 3;
const PREVIEW_CHARS: usize = 100;
const CITATION_LIMIT: usize = 10;
const VALID_CONFIDENCE: f64 = 0.4;

/// A fact together with the outcome of validating it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFact {
    pub fact: ExtractedFact,
    pub validation: ValidationResult,
}

/// Pairwise contradiction summary over a set of facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub contradictions_found: usize,
    pub consistent_facts: usize,
    pub inconsistent_facts: usize,
    pub consistency_score: f64,
}

/// Numbered citations and per-source counts for a set of facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationInfo {
    pub citations: Vec<Citation>,
    pub source_distribution: BTreeMap<String, usize>,
    pub total_sources: usize,
    pub average_confidence: f64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FactValidator;

impl FactValidator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate every fact against the rest of the batch.
    ///
    /// A fact that cannot be validated yields a failed result (method
    /// `error`, confidence 0) instead of aborting the batch. Output is
    /// sorted by validated confidence, highest first.
    #[must_use]
    pub fn validate(&self, facts: &[ExtractedFact]) -> Vec<ValidatedFact> {
        let mut validated: Vec<ValidatedFact> = facts
            .iter()
            .enumerate()
            .map(|(index, fact)| {
                let validation = validate_one(index, facts).unwrap_or_else(|e| {
                    tracing::warn!(fact = %preview(&fact.text, 60), %e, "fact validation failed");
                    failed(fact)
                });
                ValidatedFact {
                    fact: fact.clone(),
                    validation,
                }
            })
            .collect();
        validated.sort_by(|a, b| b.validation.confidence.total_cmp(&a.validation.confidence));
        tracing::debug!(
            facts = validated.len(),
            valid = validated.iter().filter(|v| v.validation.is_valid).count(),
            "facts validated"
        );
        validated
    }

    /// Count contradicting pairs among `facts`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn check_consistency(&self, facts: &[ExtractedFact]) -> ConsistencyReport {
        let mut involved = BTreeSet::new();
        let mut contradictions_found = 0usize;
        for (i, left) in facts.iter().enumerate() {
            for (j, right) in facts.iter().enumerate().skip(i + 1) {
                if are_contradictory(&left.text, &right.text) {
                    contradictions_found += 1;
                    involved.insert(i);
                    involved.insert(j);
                }
            }
        }
        let pairs = facts.len() * facts.len().saturating_sub(1) / 2;
        let consistency_score = if pairs == 0 {
            1.0
        } else {
            1.0 - contradictions_found as f64 / pairs as f64
        };
        ConsistencyReport {
            contradictions_found,
            consistent_facts: facts.len() - involved.len(),
            inconsistent_facts: involved.len(),
            consistency_score,
        }
    }

    /// Citations for the first ten facts plus the source spread of all.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn citation_info(&self, facts: &[ExtractedFact]) -> CitationInfo {
        let mut source_distribution = BTreeMap::new();
        let citations = facts
            .iter()
            .take(CITATION_LIMIT)
            .zip(1u32..)
            .map(|(fact, number)| {
                *source_distribution.entry(fact.source.clone()).or_insert(0) += 1;
                Citation {
                    number,
                    source: fact.source.clone(),
                    url: fact.source_url.clone(),
                    fact_preview: preview(&fact.text, PREVIEW_CHARS),
                    confidence: fact.confidence,
                }
            })
            .collect();
        let total_sources = facts.iter().map(|f| f.source.as_str()).collect::<HashSet<_>>().len();
        let average_confidence = if facts.is_empty() {
            0.0
        } else {
            facts.iter().map(|f| f.confidence).sum::<f64>() / facts.len() as f64
        };
        CitationInfo {
            citations,
            source_distribution,
            total_sources,
            average_confidence,
        }
    }
}

fn failed(fact: &ExtractedFact) -> ValidationResult {
    ValidationResult {
        fact: fact.text.clone(),
        is_valid: false,
        confidence: 0.0,
        contradictions: Vec::new(),
        supporting_sources: Vec::new(),
        method: ValidationMethod::Error,
        checked_at: Utc::now(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn validate_one(index: usize, facts: &[ExtractedFact]) -> Result<ValidationResult, ValidationError> {
    let fact = &facts[index];
    if fact.text.trim().is_empty() {
        return Err(ValidationError::EmptyFact);
    }

    let structure_ok = has_valid_structure(&fact.text);
    let words = word_set(&fact.text);
    let others = || {
        facts
            .iter()
            .enumerate()
            .filter(move |(j, other)| *j != index && other.text != fact.text)
            .map(|(_, other)| other)
    };

    let mut contradictions = Vec::new();
    for other in others() {
        if contradictions.len() == MAX_CONTRADICTIONS {
            break;
        }
        let overlap = words.intersection(&word_set(&other.text)).count();
        if overlap >= CONTRADICTION_OVERLAP && are_contradictory(&fact.text, &other.text) {
            contradictions.push(preview(&other.text.to_lowercase(), PREVIEW_CHARS));
        }
    }

    let mut supporting_sources: Vec<String> = Vec::new();
    for other in others() {
        if supporting_sources.len() == MAX_SUPPORTING_SOURCES {
            break;
        }
        let overlap = words.intersection(&word_set(&other.text)).count();
        if overlap >= SUPPORT_OVERLAP
            && other.source != fact.source
            && !supporting_sources.contains(&other.source)
        {
            supporting_sources.push(other.source.clone());
        }
    }

    let mut confidence = fact.confidence;
    if structure_ok {
        confidence += 0.1;
    }
    confidence -= 0.2 * contradictions.len() as f64;
    confidence += 0.1 * supporting_sources.len() as f64;
    let confidence = clamp_unit(confidence);

    Ok(ValidationResult {
        fact: fact.text.clone(),
        is_valid: confidence > VALID_CONFIDENCE && contradictions.is_empty() && structure_ok,
        confidence,
        contradictions,
        supporting_sources,
        method: validation_method(&fact.text),
        checked_at: Utc::now(),
    })
}

/// At least three words, and either a recognized fact shape or a
/// plausible sentence.
fn has_valid_structure(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < 5 || trimmed.split_whitespace().count() < 3 {
        return false;
    }
    let shaped = VALIDATION_PATTERNS
        .iter()
        .flat_map(|(_, patterns)| patterns)
        .any(|p| p.is_match(trimmed));
    shaped || is_plausible_sentence(trimmed)
}

/// Starts uppercase, no word dominating a longer text, not mostly
/// punctuation.
#[allow(clippy::cast_precision_loss)]
fn is_plausible_sentence(text: &str) -> bool {
    if text.chars().next().is_some_and(char::is_lowercase) {
        return false;
    }

    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in &words {
        *counts.entry(word).or_insert(0) += 1;
    }
    let top = counts.values().copied().max().unwrap_or(0);
    if words.len() > 5 && top as f64 / words.len() as f64 > 0.3 {
        return false;
    }

    let total = text.chars().count();
    let special = text.chars().filter(|c| !c.is_alphanumeric() && *c != ' ').count();
    !(total > 10 && special as f64 / total as f64 > 0.3)
}

/// Whether one text carries a marker whose opposite the other carries.
fn are_contradictory(left: &str, right: &str) -> bool {
    let left = left.to_lowercase();
    let right = right.to_lowercase();
    CONTRADICTION_PAIRS.iter().any(|(a, b)| {
        (a.is_match(&left) && b.is_match(&right)) || (b.is_match(&left) && a.is_match(&right))
    })
}

fn validation_method(text: &str) -> ValidationMethod {
    for (shape, patterns) in VALIDATION_PATTERNS.iter() {
        if patterns.iter().any(|p| p.is_match(text)) {
            return match shape {
                ValidationShape::Definition => ValidationMethod::PatternMatchDefinition,
                ValidationShape::Quantitative => ValidationMethod::PatternMatchQuantitative,
                ValidationShape::DateFact => ValidationMethod::PatternMatchDateFact,
            };
        }
    }
    if DIGITS.is_match(text) {
        ValidationMethod::QuantitativeValidation
    } else if MONTH_NAME.is_match(text) {
        ValidationMethod::DateValidation
    } else {
        ValidationMethod::StructureValidation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn fact(text: &str, confidence: f64, source: &str) -> ExtractedFact {
        ExtractedFact {
            text: text.into(),
            confidence,
            source: source.into(),
            source_url: format!("https://{source}.example/page"),
            context: text.into(),
            entities: Vec::new(),
            extracted_at: Utc::now(),
        }
    }

    fn validation_for<'a>(results: &'a [ValidatedFact], text: &str) -> &'a ValidationResult {
        &results
            .iter()
            .find(|v| v.fact.text == text)
            .unwrap()
            .validation
    }

    #[test]
    fn opposing_claims_contradict() {
        let facts = vec![
            fact("Coffee is healthy", 0.7, "google"),
            fact("Coffee is not healthy", 0.7, "google"),
        ];
        let results = FactValidator::new().validate(&facts);
        let healthy = validation_for(&results, "Coffee is healthy");
        assert_eq!(healthy.contradictions, vec!["coffee is not healthy"]);
        assert!(!healthy.is_valid);
        assert!(healthy.confidence < 0.7);
        let not_healthy = validation_for(&results, "Coffee is not healthy");
        assert!(!not_healthy.is_valid);
    }

    #[test]
    fn unrelated_facts_do_not_contradict() {
        let facts = vec![
            fact("Coffee is healthy", 0.7, "google"),
            fact("Rust is not garbage collected", 0.7, "wikipedia"),
        ];
        let results = FactValidator::new().validate(&facts);
        assert!(results.iter().all(|v| v.validation.contradictions.is_empty()));
        assert!(results.iter().all(|v| v.validation.is_valid));
    }

    #[test]
    fn other_sources_support() {
        let facts = vec![
            fact("The Eiffel Tower stands in Paris", 0.6, "wikipedia"),
            fact("The Eiffel Tower in Paris opened publicly", 0.6, "google"),
            fact("The Eiffel Tower stands proudly in Paris", 0.6, "wikipedia"),
        ];
        let results = FactValidator::new().validate(&facts);
        let first = validation_for(&results, "The Eiffel Tower stands in Paris");
        assert_eq!(first.supporting_sources, vec!["google"]);
        assert!((first.confidence - 0.8).abs() < 1e-9);
        let second = validation_for(&results, "The Eiffel Tower in Paris opened publicly");
        assert_eq!(second.supporting_sources, vec!["wikipedia"]);
    }

    #[test]
    fn empty_fact_fails_without_aborting() {
        let facts = vec![fact("   ", 0.9, "google"), fact("Rust is a language", 0.6, "wikipedia")];
        let results = FactValidator::new().validate(&facts);
        assert_eq!(results.len(), 2);
        let failed = validation_for(&results, "   ");
        assert_eq!(failed.method, ValidationMethod::Error);
        assert!((failed.confidence).abs() < f64::EPSILON);
        assert!(!failed.is_valid);
        assert_eq!(results[0].fact.text, "Rust is a language");
    }

    #[test]
    fn low_confidence_is_invalid() {
        let results = FactValidator::new().validate(&[fact("Rust is a language", 0.2, "google")]);
        assert!(!results[0].validation.is_valid);
        assert!((results[0].validation.confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn too_few_words_fail_structure() {
        let results = FactValidator::new().validate(&[fact("Artificial intelligence", 0.9, "wikipedia")]);
        assert!(!results[0].validation.is_valid);
        assert!((results[0].validation.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn output_sorted_by_confidence() {
        let facts = vec![
            fact("Ferris likes crabs a lot", 0.5, "google"),
            fact("Tokio runs async tasks well", 0.8, "arxiv"),
        ];
        let results = FactValidator::new().validate(&facts);
        assert_eq!(results[0].fact.text, "Tokio runs async tasks well");
    }

    #[rstest]
    #[case("Rust is a language", ValidationMethod::PatternMatchDefinition)]
    #[case("It weighs 42 kilograms", ValidationMethod::PatternMatchQuantitative)]
    #[case("Opened to visitors in 1889", ValidationMethod::PatternMatchDateFact)]
    #[case("Tickets cost $25", ValidationMethod::QuantitativeValidation)]
    #[case("Opens every March", ValidationMethod::DateValidation)]
    #[case("Ferris waves hello", ValidationMethod::StructureValidation)]
    fn method_follows_shape(#[case] text: &str, #[case] expected: ValidationMethod) {
        assert_eq!(validation_method(text), expected);
    }

    #[rstest]
    #[case("Coffee is good", "Coffee is not good", true)]
    #[case("This is true", "This is a myth", true)]
    #[case("Cats always land upright", "Cats never land upright", true)]
    #[case("Ferris waves", "Crabs scuttle", false)]
    fn contradiction_markers(#[case] left: &str, #[case] right: &str, #[case] expected: bool) {
        assert_eq!(are_contradictory(left, right), expected);
    }

    #[test]
    fn implausible_sentences() {
        assert!(!is_plausible_sentence("lowercase start here"));
        assert!(!is_plausible_sentence("Spam spam spam spam spam spam eggs"));
        assert!(!is_plausible_sentence("What?!?! ##$$%% ok"));
        assert!(is_plausible_sentence("Ferris waves hello"));
    }

    #[test]
    fn consistency_counts_pairs() {
        let facts = vec![
            fact("Coffee is healthy", 0.7, "google"),
            fact("Coffee is not healthy", 0.7, "duckduckgo"),
            fact("Ferris waves hello", 0.7, "wikipedia"),
        ];
        let report = FactValidator::new().check_consistency(&facts);
        assert_eq!(report.contradictions_found, 1);
        assert_eq!(report.inconsistent_facts, 2);
        assert_eq!(report.consistent_facts, 1);
        assert!((report.consistency_score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn consistency_of_nothing_is_perfect() {
        let report = FactValidator::new().check_consistency(&[]);
        assert!((report.consistency_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.consistent_facts, 0);
    }

    #[test]
    fn citation_info_numbers_and_counts() {
        let facts: Vec<_> = (0..12)
            .map(|i| {
                let source = if i % 2 == 0 { "google" } else { "arxiv" };
                fact(&format!("Fact number {i} is here"), 0.5, source)
            })
            .collect();
        let info = FactValidator::new().citation_info(&facts);
        assert_eq!(info.citations.len(), 10);
        assert_eq!(info.citations[9].number, 10);
        assert_eq!(info.source_distribution.get("google"), Some(&5));
        assert_eq!(info.total_sources, 2);
        assert!((info.average_confidence - 0.5).abs() < 1e-9);
    }
}
