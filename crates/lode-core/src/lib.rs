//! # lode-core
//!
//! Core types, source tables, and error types for Lodestar.
//!
//! This crate provides the foundational types shared across all Lodestar crates:
//! - Pipeline entities (queries, search hits, extracted facts, validation results)
//! - Classification enums (query type, freshness, answer format, response status)
//! - The closed set of source kinds with their reliability and weighting tables
//! - Response types returned by the controller
//! - Word-set and truncation helpers used by several pipeline stages
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod text;
