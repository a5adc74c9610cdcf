//! # lode-facts
//!
//! The text-analysis stages of the Lodestar pipeline.
//!
//! - [`QueryAnalyzer`] classifies a query, picks search terms and entities,
//!   and recommends sources.
//! - [`InformationExtractor`] pulls fact candidates out of search hits.
//! - [`extract_key_information`] groups query-relevant facts by kind.
//! - [`FactValidator`] cross-checks facts for contradictions and support.
//!
//! Every stage is pure and synchronous: pattern tables are compiled once
//! and shared, and no stage holds mutable state.

pub mod analyzer;
pub mod extractor;
pub mod key_info;
pub mod validator;

mod error;
mod patterns;

pub use analyzer::QueryAnalyzer;
pub use error::{ExtractionError, ValidationError};
pub use extractor::{InformationExtractor, Position};
pub use key_info::extract_key_information;
pub use validator::{CitationInfo, ConsistencyReport, FactValidator, ValidatedFact};
