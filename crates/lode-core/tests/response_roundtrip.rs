//! Serde roundtrip and JsonSchema validation tests for persisted and returned types.

use std::collections::BTreeMap;

use chrono::Utc;
use schemars::schema_for;
use lode_core::entities::*;
use lode_core::enums::*;
use lode_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_key_information() -> KeyInformation {
    KeyInformation {
        main_facts: vec![KeyFact {
            fact: "Paris is the capital of France".into(),
            confidence: 0.92,
            source: "wikipedia".into(),
            url: "https://en.wikipedia.org/wiki/Paris".into(),
        }],
        definitions: vec![DefinitionEntry {
            term: "Paris".into(),
            definition: "Paris is the capital of France".into(),
            confidence: 0.92,
            source: "wikipedia".into(),
        }],
        dates: vec!["1789".into()],
        people: vec![],
        places: vec!["Paris".into(), "France".into()],
        organizations: vec![],
        quantitative_data: vec![QuantityEntry {
            value: "2".into(),
            context: "Paris has 2 airports".into(),
            confidence: 0.7,
        }],
        sources: vec!["wikipedia".into()],
    }
}

roundtrip_and_validate!(
    query_roundtrip,
    Query,
    Query::new("What is the capital of France?")
        .with_user("u-1")
        .with_submode("sugarcoated")
        .with_format(FormatType::Summary)
);

roundtrip_and_validate!(
    search_result_roundtrip,
    SearchResult,
    SearchResult::new(
        SourceKind::Arxiv,
        "Attention Is All You Need",
        "http://arxiv.org/abs/1706.03762v7",
        "The dominant sequence transduction models...",
        0.9,
    )
    .with_metadata("published", "2017-06-12T17:57:34Z")
);

roundtrip_and_validate!(
    validation_result_roundtrip,
    ValidationResult,
    ValidationResult {
        fact: "Coffee is not healthy".into(),
        is_valid: false,
        confidence: 0.6,
        contradictions: vec!["coffee is healthy".into()],
        supporting_sources: vec![],
        method: ValidationMethod::PatternMatchDefinition,
        checked_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    query_analysis_roundtrip,
    QueryAnalysis,
    QueryAnalysis {
        query_type: QueryType::Technical,
        search_terms: vec!["python".into(), "async".into()],
        entities: QueryEntities {
            technologies: vec!["python".into()],
            ..QueryEntities::default()
        },
        freshness: Freshness::Medium,
        recommended_sources: vec![SourceKind::DuckDuckGo, SourceKind::Google],
        confidence: 0.8,
    }
);

roundtrip_and_validate!(
    cached_record_roundtrip,
    CachedQueryRecord,
    CachedQueryRecord {
        id: 7,
        query_text: "what is rust".into(),
        query_hash: "0cc175b9c0f1b6a831c399e269772661".into(),
        user_id: None,
        mode: "retrieval".into(),
        submode: "normal".into(),
        result_payload: serde_json::json!({"answer": "Rust is a language."}),
        confidence: 0.81,
        sources: vec!["wikipedia".into()],
        stored_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    answer_response_roundtrip,
    AnswerResponse,
    AnswerResponse {
        citations: vec![Citation {
            number: 1,
            source: "wikipedia".into(),
            url: "https://en.wikipedia.org/wiki/Paris".into(),
            fact_preview: "Paris is the capital of France".into(),
            confidence: 0.92,
        }],
        key_information: Some(sample_key_information()),
        validation_summary: Some(ValidationSummary {
            total_facts: 4,
            valid_facts: 2,
            average_confidence: 0.85,
        }),
        sources_used_count: 1,
        facts_analyzed_count: 2,
        ..AnswerResponse::without_facts(
            &Query::new("What is the capital of France?"),
            ResponseStatus::Success,
            "Paris is the capital of France.",
            0.92,
        )
    }
);

roundtrip_and_validate!(
    system_status_roundtrip,
    SystemStatus,
    SystemStatus {
        components: BTreeMap::from([
            ("search_engine".to_string(), ComponentHealth::Operational),
            ("knowledge_store".to_string(), ComponentHealth::Degraded),
        ]),
        available_sources: vec!["wikipedia".into(), "arxiv".into()],
        metrics: PipelineMetrics {
            total_queries: 3,
            successful_queries: 2,
            failed_queries: 1,
            cache_hits: 1,
            average_response_ms: 120.5,
            average_confidence: 0.7,
            cache_hit_rate: 1.0 / 3.0,
        },
        knowledge_base: Some(StoreStats {
            total_queries: 2,
            total_facts: 5,
            total_concepts: 3,
            recent_queries_24h: 2,
            average_confidence: 0.812,
            top_sources: vec![SourceCount {
                source: "wikipedia".into(),
                count: 5,
            }],
            top_concepts: vec![ConceptPopularity {
                concept: "paris".into(),
                popularity: 1.1,
            }],
            database_size_mb: 0.08,
        }),
        available_styles: vec![StyleInfo {
            name: "normal".into(),
            aliases: vec![],
            description: "Plain answer text".into(),
            emoji: String::new(),
            characteristics: vec!["unchanged".into()],
        }],
        available_formats: FormatType::ALL
            .into_iter()
            .map(|format| FormatInfo {
                format,
                description: format.description().into(),
                max_length: format.max_length(),
                include_citations: format.includes_citations(),
            })
            .collect(),
    }
);

#[test]
fn fallback_response_carries_query_fields() {
    let query = Query::new("best pizza recipe").with_user("u-9").with_submode("dark");
    let response =
        AnswerResponse::without_facts(&query, ResponseStatus::NoResults, "nothing found", 0.0);
    assert_eq!(response.query, "best pizza recipe");
    assert_eq!(response.user_id.as_deref(), Some("u-9"));
    assert_eq!(response.submode, "dark");
    assert!(response.citations.is_empty());
    assert!(!response.cache_hit);
}
