//! Query-relevant key information gathered from extracted facts.

use lode_core::entities::ExtractedFact;
use lode_core::responses::{DefinitionEntry, KeyFact, KeyInformation, QuantityEntry};
use lode_core::text::word_set;

use crate::patterns::{
    KNOWN_ORGANIZATIONS, KNOWN_PLACES, NUMBER, ORGANIZATION_INDICATORS, PERSON_SHAPE,
    PLACE_INDICATORS, PLACE_SHAPE, YEAR,
};

const MAIN_FACT_CONFIDENCE: f64 = 0.7;
const DEFINITION_MARKERS: &[&str] = &["is", "are", "means", "definition"];

/// Group the facts that share at least one word with the query into
/// main facts, definitions, dates, named entities, and figures.
///
/// Sources are collected from every fact, relevant or not.
#[must_use]
pub fn extract_key_information(facts: &[ExtractedFact], query: &str) -> KeyInformation {
    let query_words = word_set(query);
    let mut info = KeyInformation::default();

    for fact in facts {
        if !info.sources.contains(&fact.source) {
            info.sources.push(fact.source.clone());
        }

        let fact_words = word_set(&fact.text);
        if fact_words.is_disjoint(&query_words) {
            continue;
        }

        if fact.confidence > MAIN_FACT_CONFIDENCE {
            info.main_facts.push(KeyFact {
                fact: fact.text.clone(),
                confidence: fact.confidence,
                source: fact.source.clone(),
                url: fact.source_url.clone(),
            });
        }

        if DEFINITION_MARKERS.iter().any(|m| fact_words.contains(*m)) {
            info.definitions.push(DefinitionEntry {
                term: fact.text.split_whitespace().next().unwrap_or_default().to_string(),
                definition: fact.text.clone(),
                confidence: fact.confidence,
                source: fact.source.clone(),
            });
        }

        push_unique(&mut info.dates, YEAR.find_iter(&fact.text).map(|m| m.as_str()));
        push_unique(&mut info.people, fact.entities.iter().map(String::as_str).filter(|e| is_person(e)));
        push_unique(&mut info.places, fact.entities.iter().map(String::as_str).filter(|e| is_place(e)));
        push_unique(
            &mut info.organizations,
            fact.entities.iter().map(String::as_str).filter(|e| is_organization(e)),
        );

        if let Some(m) = NUMBER.find(&fact.text) {
            info.quantitative_data.push(QuantityEntry {
                value: m.as_str().to_string(),
                context: fact.text.clone(),
                confidence: fact.confidence,
            });
        }
    }

    info.main_facts
        .sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    info
}

fn push_unique<'a>(into: &mut Vec<String>, items: impl Iterator<Item = &'a str>) {
    for item in items {
        if !into.iter().any(|existing| existing == item) {
            into.push(item.to_string());
        }
    }
}

/// A full capitalized name or an honorific.
#[must_use]
pub fn is_person(entity: &str) -> bool {
    PERSON_SHAPE.is_match(entity)
}

/// A known place, a `City, Country` pair, or anything naming a kind of
/// settlement or region.
#[must_use]
pub fn is_place(entity: &str) -> bool {
    let lower = entity.to_lowercase();
    KNOWN_PLACES.contains(&lower.as_str())
        || PLACE_INDICATORS.iter().any(|i| lower.contains(i))
        || PLACE_SHAPE.is_match(entity)
}

/// A known company or anything carrying a corporate or academic suffix.
#[must_use]
pub fn is_organization(entity: &str) -> bool {
    let lower = entity.to_lowercase();
    KNOWN_ORGANIZATIONS.contains(&lower.as_str())
        || word_set(&lower)
            .iter()
            .any(|w| ORGANIZATION_INDICATORS.contains(&w.as_str()))
}
