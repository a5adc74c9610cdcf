//! Column parsing helpers and the cache key.

use chrono::{DateTime, SecondsFormat, Utc};
use lode_core::text::normalize_whitespace;
use md5::{Digest, Md5};
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Timestamp column format. Fixed-width UTC, so string order is time order.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp column.
///
/// Accepts RFC 3339 and `SQLite`'s `datetime('now')` format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Decode a JSON list column. An empty string reads as an empty list.
pub fn parse_json_list<T: DeserializeOwned>(s: &str) -> Result<Vec<T>, StoreError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(s)?)
}

/// Concept keys are lowercased with whitespace collapsed.
pub fn concept_key(name: &str) -> String {
    normalize_whitespace(&name.to_lowercase())
}

/// Identity of one cached result: the query and who asked it, in which mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKey<'a> {
    pub text: &'a str,
    pub user_id: Option<&'a str>,
    pub mode: &'a str,
    pub submode: &'a str,
}

/// Query text as matched by the cache prefilter: Unicode-lowercased and
/// whitespace-normalized. SQLite `LIKE` folds ASCII case only, so matching
/// runs against this form.
#[must_use]
pub fn normalize_query(text: &str) -> String {
    normalize_whitespace(&text.to_lowercase())
}

impl QueryKey<'_> {
    /// Hex MD5 of `query|user|mode|submode`, the query lowercased and
    /// whitespace-normalized. A missing user hashes as an empty string.
    #[must_use]
    pub fn hash(&self) -> String {
        let normalized = normalize_query(self.text);
        let input = format!(
            "{normalized}|{}|{}|{}",
            self.user_id.unwrap_or_default(),
            self.mode,
            self.submode
        );
        let digest = Md5::digest(input.as_bytes());
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}
