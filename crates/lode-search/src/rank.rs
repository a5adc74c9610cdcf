//! Deduplication and relevance ranking of merged search hits.

use std::collections::HashSet;

use lode_core::entities::SearchResult;
use lode_core::text::word_set;

/// Bonus when the whole query appears in the title.
const TITLE_PHRASE_BONUS: f64 = 0.3;
/// Bonus when the whole query appears in the snippet.
const SNIPPET_PHRASE_BONUS: f64 = 0.2;
const TITLE_OVERLAP_WEIGHT: f64 = 0.2;
const SNIPPET_OVERLAP_WEIGHT: f64 = 0.1;

/// Key two hits share when they point at the same page.
///
/// Lowercased URL with surrounding slashes trimmed; hits without a URL
/// fall back to their lowercased title.
fn dedupe_key(result: &SearchResult) -> String {
    let url = result.url.trim().to_lowercase();
    let url = url.trim_matches('/');
    if url.is_empty() {
        format!("title:{}", result.title.trim().to_lowercase())
    } else {
        url.to_string()
    }
}

/// Drop later hits whose URL repeats an earlier one.
#[must_use]
pub fn dedupe(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(dedupe_key(r)))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn overlap_ratio(query_words: &std::collections::BTreeSet<String>, text: &str) -> f64 {
    if query_words.is_empty() {
        return 0.0;
    }
    let words = word_set(text);
    query_words.intersection(&words).count() as f64 / query_words.len() as f64
}

/// Add query-match bonuses to each hit's base relevance and sort
/// descending. Ties keep their incoming order.
#[must_use]
pub fn rank(mut results: Vec<SearchResult>, query: &str) -> Vec<SearchResult> {
    let phrase = query.trim().to_lowercase();
    let query_words = word_set(query);

    for result in &mut results {
        let title = result.title.to_lowercase();
        let snippet = result.snippet.to_lowercase();
        let mut bonus = 0.0;
        if !phrase.is_empty() && title.contains(&phrase) {
            bonus += TITLE_PHRASE_BONUS;
        }
        if !phrase.is_empty() && snippet.contains(&phrase) {
            bonus += SNIPPET_PHRASE_BONUS;
        }
        bonus += overlap_ratio(&query_words, &title) * TITLE_OVERLAP_WEIGHT;
        bonus += overlap_ratio(&query_words, &snippet) * SNIPPET_OVERLAP_WEIGHT;
        result.relevance_score += bonus;
    }

    results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    results
}
