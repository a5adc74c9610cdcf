//! The three answer layouts.

use lode_core::entities::ExtractedFact;
use lode_core::enums::FormatType;
use lode_core::responses::KeyInformation;
use lode_core::text::{as_sentence, fit_to_length, preview};

const SUPPORTING_FACTS: usize = 2;
const CONTEXT_SENTENCES: usize = 2;
/// Facts scanned for context and averaged for the confidence statement.
const TOP_FACTS: usize = 3;
const MAX_BULLETS: usize = 5;
const BULLET_CHARS: usize = 100;
const BRIEF_ENTITIES: usize = 2;
const BRIEF_FACT_CHARS: usize = 50;

pub fn comprehensive(ranked: &[&ExtractedFact], query: &str, key_info: Option<&KeyInformation>) -> String {
    let Some(main) = ranked.first() else {
        return String::new();
    };
    let mut parts = vec![as_sentence(&main.text)];

    let mut supporting: Vec<String> = Vec::new();
    for fact in ranked.iter().skip(1).take(SUPPORTING_FACTS) {
        let sentence = as_sentence(&fact.text);
        if sentence != parts[0] && !supporting.contains(&sentence) {
            supporting.push(sentence);
        }
    }
    if !supporting.is_empty() {
        parts.push(format!("Additionally, {}", supporting.join(" ")));
    }

    parts.extend(context_sentences(ranked, query, key_info));

    let top = &ranked[..ranked.len().min(TOP_FACTS)];
    parts.push(confidence_statement(mean_confidence(top)).to_string());

    fit_to_length(&parts.join(" "), FormatType::Comprehensive.max_length())
}

/// "This is related to X." for the first query-mentioned entity of each top
/// fact, then for key-information entities the query mentions.
fn context_sentences(ranked: &[&ExtractedFact], query: &str, key_info: Option<&KeyInformation>) -> Vec<String> {
    let query = query.to_lowercase();
    let mentioned = |entity: &&String| query.contains(&entity.to_lowercase());

    let from_facts = ranked
        .iter()
        .take(TOP_FACTS)
        .filter_map(|fact| fact.entities.iter().find(mentioned));
    let from_key_info = key_info.into_iter().flat_map(|info| {
        info.people
            .iter()
            .chain(&info.places)
            .chain(&info.organizations)
            .filter(mentioned)
    });

    let mut sentences: Vec<String> = Vec::new();
    for entity in from_facts.chain(from_key_info) {
        let sentence = format!("This is related to {entity}.");
        if !sentences.contains(&sentence) {
            sentences.push(sentence);
        }
        if sentences.len() == CONTEXT_SENTENCES {
            break;
        }
    }
    sentences
}

pub fn summary(ranked: &[&ExtractedFact]) -> String {
    let Some(main) = ranked.first() else {
        return String::new();
    };
    let mut parts = vec![as_sentence(&main.text)];
    if let Some(second) = ranked.get(1) {
        parts.push(brief_context(second));
    }
    parts.push(confidence_tag(main.confidence).to_string());
    fit_to_length(&parts.join(" "), FormatType::Summary.max_length())
}

fn brief_context(fact: &ExtractedFact) -> String {
    if fact.entities.is_empty() {
        format!("Additionally: {}.", preview(&fact.text, BRIEF_FACT_CHARS))
    } else {
        let named: Vec<&str> = fact
            .entities
            .iter()
            .take(BRIEF_ENTITIES)
            .map(String::as_str)
            .collect();
        format!("Also mentioned: {}.", named.join(", "))
    }
}

pub fn bullet_points(ranked: &[&ExtractedFact]) -> String {
    let bullets = &ranked[..ranked.len().min(MAX_BULLETS)];
    let mut lines: Vec<String> = bullets
        .iter()
        .map(|fact| format!("• {}", fit_to_length(fact.text.trim(), BULLET_CHARS)))
        .collect();
    if bullets.len() > 1 {
        let mut sources: Vec<&str> = bullets.iter().map(|f| f.source.as_str()).collect();
        sources.sort_unstable();
        sources.dedup();
        lines.push(format!(
            "• This information comes from {} different sources.",
            sources.len()
        ));
    }
    lines.join("\n")
}

#[allow(clippy::cast_precision_loss)]
fn mean_confidence(facts: &[&ExtractedFact]) -> f64 {
    if facts.is_empty() {
        return 0.0;
    }
    facts.iter().map(|f| f.confidence).sum::<f64>() / facts.len() as f64
}

fn confidence_statement(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "This information has high confidence based on reliable sources."
    } else if confidence >= 0.6 {
        "This information has moderate confidence based on the available sources."
    } else {
        "This information should be verified as it has lower confidence."
    }
}

fn confidence_tag(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "(High confidence)"
    } else if confidence >= 0.6 {
        "(Moderate confidence)"
    } else {
        "(Low confidence)"
    }
}
