//! Per-item errors raised while extracting and validating facts.
//!
//! Neither error aborts a batch: the extractor drops the offending
//! candidate, the validator turns it into a failed validation result.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The title or snippet had too little text to hold a fact.
    #[error("text too short to extract from ({len} chars)")]
    TextTooShort { len: usize },

    /// A pattern matched, but the match is shorter than a usable fact.
    #[error("candidate fact too short ({len} chars)")]
    FactTooShort { len: usize },

    /// A pattern matched, but the match is longer than a usable fact.
    #[error("candidate fact too long ({len} chars)")]
    FactTooLong { len: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The fact has no text after trimming.
    #[error("fact text is empty")]
    EmptyFact,
}
