//! The analysis stages chained the way the controller runs them.

use lode_core::entities::SearchResult;
use lode_core::enums::{QueryType, SourceKind};
use lode_facts::{FactValidator, InformationExtractor, QueryAnalyzer, extract_key_information};
use pretty_assertions::assert_eq;

fn results() -> Vec<SearchResult> {
    vec![
        SearchResult::new(
            SourceKind::Wikipedia,
            "Artificial intelligence",
            "https://en.wikipedia.org/wiki/Artificial_intelligence",
            "Artificial intelligence is intelligence demonstrated by machines.",
            0.95,
        ),
        SearchResult::new(
            SourceKind::DuckDuckGo,
            "AI overview",
            "https://duckduckgo.com/Artificial_intelligence",
            "<b>Artificial intelligence</b> is the study of intelligent agents founded in 1956.",
            0.8,
        ),
    ]
}

#[test]
fn definition_query_yields_valid_cited_facts() {
    let query = "What is artificial intelligence?";

    let analysis = QueryAnalyzer::new().analyze(query);
    assert_eq!(analysis.query_type, QueryType::Factual);
    assert_eq!(analysis.entities.concepts, vec!["artificial intelligence"]);
    assert_eq!(analysis.recommended_sources[0], SourceKind::Wikipedia);

    let facts = InformationExtractor::new().extract(&results());
    assert!(
        facts
            .iter()
            .any(|f| f.text == "Artificial intelligence is intelligence demonstrated by machines.")
    );
    assert!(facts.iter().all(|f| !f.text.contains('<')));

    let validated = FactValidator::new().validate(&facts);
    assert_eq!(validated.len(), facts.len());
    let best = &validated[0];
    assert!(best.validation.is_valid);
    assert!(best.validation.confidence >= 0.5);

    let key_info = extract_key_information(&facts, query);
    assert!(!key_info.main_facts.is_empty());
    assert!(key_info.dates.contains(&"1956".to_string()));
    assert_eq!(key_info.sources.len(), 2);
}

#[test]
fn empty_results_flow_through_cleanly() {
    let facts = InformationExtractor::new().extract(&[]);
    assert!(facts.is_empty());
    assert!(FactValidator::new().validate(&facts).is_empty());
    let report = FactValidator::new().check_consistency(&facts);
    assert_eq!(report.contradictions_found, 0);
}
