//! # lode-search
//!
//! Concurrent multi-source search for Lodestar.
//!
//! [`SearchEngine`] launches every selected [`lode_sources::SourceAdapter`]
//! as its own task, bounds each with a per-adapter timeout and the whole
//! fan-out with a deadline, then deduplicates by URL and ranks by query
//! match. Ranking runs only after every task has settled and follows
//! adapter order, so the output does not depend on completion order.

mod engine;
pub mod rank;

pub use engine::SearchEngine;
