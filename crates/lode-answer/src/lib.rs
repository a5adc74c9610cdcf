//! # lode-answer
//!
//! Answer synthesis for Lodestar.
//!
//! Turns ranked, validated facts into answer text in one of the three
//! [`FormatType`] layouts, numbers the citations behind it, and scores the
//! answer as a whole. No text is generated beyond the facts themselves and
//! a handful of fixed connective phrases.

mod compose;

use lode_core::entities::ExtractedFact;
use lode_core::enums::{FormatType, source_answer_weight};
use lode_core::responses::{Citation, FormatInfo, KeyInformation};
use lode_core::text::{preview, round_to};
use serde::Serialize;

/// Facts that feed the overall confidence score.
const CONFIDENCE_WINDOW: usize = 5;
const MAX_CITATIONS: usize = 5;
const CITATION_PREVIEW_CHARS: usize = 100;

/// Answer text plus what it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedAnswer {
    pub answer: String,
    pub confidence: f64,
    pub citations: Vec<Citation>,
    pub sources_used: usize,
    pub facts_analyzed: usize,
}

/// Fixed answer for a query no fact could be found for.
#[must_use]
pub fn no_answer_text(query: &str) -> String {
    format!(
        "I couldn't find reliable information to answer your question about \"{query}\". \
         This might be because the topic is very specific, recent, or not well-documented \
         online. You might want to try rephrasing your question or being more specific."
    )
}

/// Builds answers from facts. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnswerSynthesizer;

impl AnswerSynthesizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compose an answer to `query` from `facts`.
    ///
    /// Facts are ranked by confidence first, so callers may pass them in any
    /// order. `key_info`, when given, adds its named entities to the pool the
    /// comprehensive layout draws context sentences from.
    #[must_use]
    pub fn generate(
        &self,
        facts: &[ExtractedFact],
        query: &str,
        format: FormatType,
        key_info: Option<&KeyInformation>,
    ) -> SynthesizedAnswer {
        if facts.is_empty() {
            return SynthesizedAnswer {
                answer: no_answer_text(query),
                confidence: 0.0,
                citations: Vec::new(),
                sources_used: 0,
                facts_analyzed: 0,
            };
        }

        let mut ranked: Vec<&ExtractedFact> = facts.iter().collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let answer = match format {
            FormatType::Comprehensive => compose::comprehensive(&ranked, query, key_info),
            FormatType::Summary => compose::summary(&ranked),
            FormatType::BulletPoints => compose::bullet_points(&ranked),
        };
        let confidence = overall_confidence(&ranked);
        let citations = if format.includes_citations() {
            citations(&ranked)
        } else {
            Vec::new()
        };

        let mut sources: Vec<&str> = ranked.iter().map(|f| f.source.as_str()).collect();
        sources.sort_unstable();
        sources.dedup();

        tracing::info!(format = %format, confidence, facts = ranked.len(), "answer synthesized");
        SynthesizedAnswer {
            answer,
            confidence,
            citations,
            sources_used: sources.len(),
            facts_analyzed: ranked.len(),
        }
    }
}

/// Mean of confidence × source weight over the best facts.
#[allow(clippy::cast_precision_loss)]
fn overall_confidence(ranked: &[&ExtractedFact]) -> f64 {
    let window = &ranked[..ranked.len().min(CONFIDENCE_WINDOW)];
    if window.is_empty() {
        return 0.0;
    }
    let total: f64 = window
        .iter()
        .map(|f| f.confidence * source_answer_weight(&f.source))
        .sum();
    total / window.len() as f64
}

fn citations(ranked: &[&ExtractedFact]) -> Vec<Citation> {
    ranked
        .iter()
        .take(MAX_CITATIONS)
        .zip(1u32..)
        .map(|(fact, number)| Citation {
            number,
            source: fact.source.clone(),
            url: fact.source_url.clone(),
            fact_preview: preview(&fact.text, CITATION_PREVIEW_CHARS),
            confidence: round_to(fact.confidence, 2),
        })
        .collect()
}

/// Metadata for every answer layout.
#[must_use]
pub fn available_formats() -> Vec<FormatInfo> {
    FormatType::ALL
        .into_iter()
        .map(|format| FormatInfo {
            format,
            description: format.description().to_string(),
            max_length: format.max_length(),
            include_citations: format.includes_citations(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    pub fn fact(text: &str, confidence: f64, source: &str, entities: &[&str]) -> ExtractedFact {
        ExtractedFact {
            text: text.into(),
            confidence,
            source: source.into(),
            source_url: format!("https://{source}.example/{}", text.len()),
            context: text.into(),
            entities: entities.iter().map(|e| (*e).to_string()).collect(),
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn no_facts_means_no_answer() {
        let answer = AnswerSynthesizer::new().generate(&[], "dragons", FormatType::Comprehensive, None);
        assert_eq!(answer.confidence, 0.0);
        assert!(answer.answer.contains("couldn't find reliable information"));
        assert!(answer.answer.contains("\"dragons\""));
        assert!(answer.citations.is_empty());
    }

    #[test]
    fn confidence_is_weighted_mean_of_top_five() {
        let facts = vec![
            fact("Fact one is here.", 0.9, "wikipedia", &[]),
            fact("Fact two is here.", 0.8, "google", &[]),
            fact("Fact three is here.", 0.8, "duckduckgo", &[]),
            fact("Fact four is here.", 0.6, "stackoverflow", &[]),
            fact("Fact five is here.", 0.5, "newsapi", &[]),
            fact("Fact six is ignored.", 0.1, "arxiv", &[]),
        ];
        let answer = AnswerSynthesizer::new().generate(&facts, "facts", FormatType::Summary, None);
        let expected = (0.9 * 1.0 + 0.8 * 0.9 + 0.8 * 0.7 + 0.6 * 0.5 + 0.5 * 0.8) / 5.0;
        assert!((answer.confidence - expected).abs() < 1e-9);
        assert_eq!(answer.facts_analyzed, 6);
        assert_eq!(answer.sources_used, 6);
    }

    #[test]
    fn citations_are_numbered_and_capped() {
        let long = "x".repeat(150);
        let mut facts: Vec<ExtractedFact> = (0..7)
            .map(|i| fact(&format!("Numbered fact {i} text"), 0.5 + f64::from(i) * 0.05, "arxiv", &[]))
            .collect();
        facts.push(fact(&long, 0.999, "wikipedia", &[]));

        let answer = AnswerSynthesizer::new().generate(&facts, "x", FormatType::BulletPoints, None);
        let numbers: Vec<u32> = answer.citations.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(answer.citations[0].confidence, 1.0);
        assert_eq!(answer.citations[0].fact_preview.chars().count(), 103);
        assert_eq!(answer.citations[1].fact_preview, "Numbered fact 6 text");
    }

    #[test]
    fn summary_has_no_citations() {
        let facts = vec![fact("Rust is a language.", 0.9, "wikipedia", &[])];
        let answer = AnswerSynthesizer::new().generate(&facts, "rust", FormatType::Summary, None);
        assert!(answer.citations.is_empty());
    }

    #[test]
    fn formats_describe_themselves() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        assert_eq!(formats[0].format, FormatType::Comprehensive);
        assert_eq!(formats[0].max_length, 1000);
        assert!(!formats[1].include_citations);
    }
}
