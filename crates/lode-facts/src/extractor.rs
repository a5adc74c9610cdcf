//! Fact extraction from search-result titles and snippets.
//!
//! Each title and snippet is cleaned (entities unescaped, tags stripped,
//! whitespace collapsed) and scanned with the fact-shape patterns. Every
//! match becomes a candidate; a candidate that fails a length check is an
//! [`ExtractionError`] and is dropped without affecting its siblings.
//! When no pattern yields a usable fact, plain sentences are used instead.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::Utc;
use lode_core::entities::{ExtractedFact, SearchResult};
use lode_core::enums::source_reliability;
use lode_core::text::normalize_whitespace;
use regex::{Captures, Regex};

use crate::error::ExtractionError;
use crate::patterns::{
    ENTITY_PATTERNS, FACT_PATTERNS, HTML_TAG, NON_WORD, SENTENCE_BREAK, matches_any_fact_shape,
};

const MIN_TEXT_CHARS: usize = 10;
const MIN_FACT_CHARS: usize = 10;
const MAX_FACT_CHARS: usize = 200;
const MIN_SENTENCE_CHARS: usize = 20;
const MAX_SENTENCE_CHARS: usize = 150;
const CONTEXT_CHARS: usize = 50;

// ── Confidence weights ─────────────────────────────────────────────

const BASE_CONFIDENCE: f64 = 0.5;
const PATTERN_WEIGHT: f64 = 0.3;
const ENTITY_WEIGHT: f64 = 0.2;
const RELIABILITY_WEIGHT: f64 = 0.3;
const LENGTH_WEIGHT: f64 = 0.1;
const TITLE_WEIGHT: f64 = 0.1;
const IDEAL_FACT_CHARS: f64 = 50.0;

/// Which part of a search hit a fact came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Title,
    Snippet,
}

/// Turns search hits into ranked, deduplicated fact candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct InformationExtractor;

impl InformationExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Facts from every hit, deduplicated and sorted by confidence.
    ///
    /// Rejected candidates are counted and logged, never propagated.
    #[must_use]
    pub fn extract(&self, results: &[SearchResult]) -> Vec<ExtractedFact> {
        let mut facts = Vec::new();
        let mut rejected = 0usize;
        for result in results {
            for position in [Position::Title, Position::Snippet] {
                for candidate in self.candidates(result, position) {
                    match candidate {
                        Ok(fact) => facts.push(fact),
                        Err(e) => {
                            rejected += 1;
                            tracing::trace!(url = %result.url, %e, "fact candidate rejected");
                        }
                    }
                }
            }
        }

        let mut unique = dedupe(facts);
        unique.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        tracing::debug!(
            results = results.len(),
            facts = unique.len(),
            rejected,
            "facts extracted"
        );
        unique
    }

    /// Every fact candidate in one part of a hit.
    pub fn candidates(
        &self,
        result: &SearchResult,
        position: Position,
    ) -> Vec<Result<ExtractedFact, ExtractionError>> {
        let raw = match position {
            Position::Title => &result.title,
            Position::Snippet => &result.snippet,
        };
        let len = raw.trim().chars().count();
        if len < MIN_TEXT_CHARS {
            return vec![Err(ExtractionError::TextTooShort { len })];
        }

        let text = clean_text(raw);
        let source = result.source.as_str();
        let mut out = Vec::new();
        for (_, patterns) in FACT_PATTERNS.iter() {
            for pattern in patterns {
                for m in pattern.find_iter(&text) {
                    out.push(candidate(
                        m.as_str().trim(),
                        context_window(&text, m.start(), m.end()),
                        source,
                        &result.url,
                        position,
                    ));
                }
            }
        }

        if !out.iter().any(Result::is_ok) {
            out.extend(
                SENTENCE_BREAK
                    .split(&text)
                    .map(str::trim)
                    .filter(|s| {
                        let n = s.chars().count();
                        n > MIN_SENTENCE_CHARS && n < MAX_SENTENCE_CHARS
                    })
                    .map(|s| Ok(build_fact(s, text.clone(), source, &result.url, position))),
            );
        }
        out
    }
}

fn candidate(
    fact_text: &str,
    context: String,
    source: &str,
    url: &str,
    position: Position,
) -> Result<ExtractedFact, ExtractionError> {
    let len = fact_text.chars().count();
    if len < MIN_FACT_CHARS {
        return Err(ExtractionError::FactTooShort { len });
    }
    if len > MAX_FACT_CHARS {
        return Err(ExtractionError::FactTooLong { len });
    }
    Ok(build_fact(fact_text, context, source, url, position))
}

fn build_fact(
    fact_text: &str,
    context: String,
    source: &str,
    url: &str,
    position: Position,
) -> ExtractedFact {
    let entities = extract_entities(fact_text);
    ExtractedFact {
        text: fact_text.to_string(),
        confidence: fact_confidence(fact_text, !entities.is_empty(), source, position),
        source: source.to_string(),
        source_url: url.to_string(),
        context,
        entities,
        extracted_at: Utc::now(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn fact_confidence(fact_text: &str, has_entities: bool, source: &str, position: Position) -> f64 {
    let mut confidence = BASE_CONFIDENCE;
    if matches_any_fact_shape(fact_text) {
        confidence += PATTERN_WEIGHT;
    }
    if has_entities {
        confidence += ENTITY_WEIGHT;
    }
    confidence += source_reliability(source) * RELIABILITY_WEIGHT;
    let length_gap = (fact_text.chars().count() as f64 - IDEAL_FACT_CHARS).abs();
    confidence += (1.0 - length_gap / 100.0).max(0.0) * LENGTH_WEIGHT;
    if position == Position::Title {
        confidence += TITLE_WEIGHT;
    }
    confidence.min(1.0)
}

/// Named things in a piece of text, in order of first appearance.
#[must_use]
pub fn extract_entities(text: &str) -> Vec<String> {
    let mut entities: Vec<String> = Vec::new();
    for pattern in ENTITY_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let entity = m.as_str().to_string();
            if !entities.contains(&entity) {
                entities.push(entity);
            }
        }
    }
    entities
}

// ── Text cleanup ───────────────────────────────────────────────────

static HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("static pattern compiles")
});

fn unescape_html(text: &str) -> String {
    HTML_ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match name {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    "ndash" => Some('\u{2013}'),
                    "mdash" => Some('\u{2014}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Unescape entities, strip tags, collapse whitespace.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let unescaped = unescape_html(raw);
    normalize_whitespace(&HTML_TAG.replace_all(&unescaped, ""))
}

/// Up to [`CONTEXT_CHARS`] characters either side of a match.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map_or(text.len(), |(i, _)| end + i);
    text[from..to].trim().to_string()
}

/// Lowercase, drop punctuation, collapse whitespace.
fn dedupe_key(text: &str) -> String {
    normalize_whitespace(&NON_WORD.replace_all(&text.to_lowercase(), ""))
}

fn dedupe(facts: Vec<ExtractedFact>) -> Vec<ExtractedFact> {
    let mut seen = HashSet::new();
    facts
        .into_iter()
        .filter(|f| seen.insert(dedupe_key(&f.text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lode_core::enums::SourceKind;
    use pretty_assertions::assert_eq;

    fn hit(source: SourceKind, title: &str, snippet: &str) -> SearchResult {
        SearchResult::new(source, title, "https://example.org/page", snippet, 0.9)
    }

    #[test]
    fn definition_in_snippet_becomes_fact() {
        let facts = InformationExtractor::new().extract(&[hit(
            SourceKind::Wikipedia,
            "AI",
            "Artificial intelligence is intelligence demonstrated by machines.",
        )]);
        assert_eq!(facts.len(), 1);
        assert_eq!(
            facts[0].text,
            "Artificial intelligence is intelligence demonstrated by machines."
        );
        assert_eq!(facts[0].source, "wikipedia");
        assert_eq!(facts[0].source_url, "https://example.org/page");
        assert!((facts[0].confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn short_title_is_rejected_not_fatal() {
        let extractor = InformationExtractor::new();
        let result = hit(SourceKind::Google, "AI", "Rust is a systems programming language.");
        let title = extractor.candidates(&result, Position::Title);
        assert_eq!(title, vec![Err(ExtractionError::TextTooShort { len: 2 })]);
        assert!(extractor.candidates(&result, Position::Snippet).iter().any(Result::is_ok));
    }

    #[test]
    fn overlong_match_is_rejected() {
        let long = format!("{} is long.", "word ".repeat(50));
        let result = hit(SourceKind::Google, "", &long);
        let candidates = InformationExtractor::new().candidates(&result, Position::Snippet);
        assert!(candidates
            .iter()
            .any(|c| matches!(c, Err(ExtractionError::FactTooLong { .. }))));
    }

    #[test]
    fn sentences_are_the_fallback() {
        let result = hit(
            SourceKind::DuckDuckGo,
            "",
            "Ferris the crab waves happily today! Nothing else here",
        );
        let facts = InformationExtractor::new().extract(&[result]);
        let texts: Vec<_> = facts.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Ferris the crab waves happily today"]);
        assert_eq!(facts[0].context, "Ferris the crab waves happily today! Nothing else here");
    }

    #[test]
    fn html_is_cleaned_before_matching() {
        assert_eq!(
            clean_text("<span class=\"searchmatch\">Mercury</span> is  the &quot;first&quot; planet &amp; more &#39;x&#x27;"),
            "Mercury is the \"first\" planet & more 'x'"
        );
        assert_eq!(clean_text("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn duplicate_facts_across_results_collapse() {
        let facts = InformationExtractor::new().extract(&[
            hit(SourceKind::Wikipedia, "", "Rust is a systems programming language."),
            hit(SourceKind::DuckDuckGo, "", "rust is a systems programming language"),
        ]);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].source, "wikipedia");
    }

    #[test]
    fn facts_sorted_by_confidence() {
        let facts = InformationExtractor::new().extract(&[
            hit(SourceKind::DuckDuckGo, "", "Tokio is an asynchronous runtime for Rust."),
            hit(SourceKind::Arxiv, "", "Transformers are sequence models built on attention."),
        ]);
        assert!(facts.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn entities_keep_first_appearance_order() {
        let entities = extract_entities("Alan Turing worked in London, England in 1936 with Python");
        assert_eq!(
            entities,
            vec!["Alan Turing", "London", "London, England", "Python", "1936"]
        );
    }

    #[test]
    fn title_position_scores_higher() {
        let text = "Ferris the friendly crab mascot";
        let title = fact_confidence(text, false, "duckduckgo", Position::Title);
        let snippet = fact_confidence(text, false, "duckduckgo", Position::Snippet);
        assert!((title - snippet - 0.1).abs() < 1e-9);
    }

    #[test]
    fn context_is_char_safe() {
        let text = format!("{}é is here", "ü".repeat(80));
        let start = text.find("é").unwrap();
        let window = context_window(&text, start, start + "é".len());
        assert_eq!(window.chars().filter(|c| *c == 'ü').count(), 50);
    }
}
