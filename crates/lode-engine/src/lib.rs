//! # lode-engine
//!
//! The Lodestar controller.
//!
//! [`Controller`] owns every pipeline stage and runs one query at a time
//! through them:
//!
//! 1. Look for a cached answer to a near-identical query (Jaccard similarity
//!    above the configured threshold) and restyle it on a hit
//! 2. Classify the query and pick the sources it recommends
//! 3. Search those sources concurrently
//! 4. Extract candidate facts, validate them, and keep the confident ones
//! 5. Synthesize a cited answer, cache it unstyled, then apply the style
//!
//! Failures never escape `process_query`: they come back as a response whose
//! status says what went wrong.

mod controller;
pub mod error;
mod metrics;

pub use controller::{Controller, MODE};
pub use error::EngineError;
