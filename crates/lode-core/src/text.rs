//! Text helpers shared by the pipeline stages.
//!
//! All length limits are counted in characters, never bytes, so truncation
//! is always safe on multi-byte input.

use std::collections::BTreeSet;

/// Collapse every run of whitespace into a single space and trim the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercased word tokens with leading and trailing punctuation removed.
///
/// `"What is AI?"` yields `{"ai", "is", "what"}`.
#[must_use]
pub fn word_set(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Jaccard similarity of the word sets of two texts.
///
/// Two texts without any words are identical (1.0); one empty side gives 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let left = word_set(a);
    let right = word_set(b);
    if left.is_empty() && right.is_empty() {
        return 1.0;
    }
    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Number of distinct words the two texts share.
#[must_use]
pub fn shared_word_count(a: &str, b: &str) -> usize {
    let left = word_set(a);
    let right = word_set(b);
    left.intersection(&right).count()
}

/// The first `max_chars` characters of `text`.
#[must_use]
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `text` unchanged when it fits, otherwise its first `max_chars`
/// characters followed by `...`.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", take_chars(text, max_chars))
    } else {
        text.to_string()
    }
}

/// Shorten `text` to at most `max_chars` characters, ellipsis included.
#[must_use]
pub fn fit_to_length(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", take_chars(text, max_chars.saturating_sub(3)))
    } else {
        text.to_string()
    }
}

/// Uppercase the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Turn a fact fragment into a sentence: trimmed, capitalized, and ending
/// in `.`, `!`, or `?`.
#[must_use]
pub fn as_sentence(text: &str) -> String {
    let mut sentence = capitalize_first(text.trim());
    if !sentence.is_empty() && !sentence.ends_with(['.', '!', '?']) {
        sentence.push('.');
    }
    sentence
}

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Clamp into the closed unit interval.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn word_set_strips_punctuation_and_case() {
        let words: Vec<_> = word_set("What is the capital of France?").into_iter().collect();
        assert_eq!(words, vec!["capital", "france", "is", "of", "the", "what"]);
    }

    #[rstest]
    #[case("What is the capital of France?", "What is the capital of France?", 1.0)]
    #[case("What is the capital of France?", "capital of France", 0.5)]
    #[case("What is the capital of France?", "best pizza recipe", 0.0)]
    #[case("", "", 1.0)]
    #[case("", "pizza", 0.0)]
    fn jaccard(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert!((jaccard_similarity(a, b) - expected).abs() < 1e-9);
    }

    #[test]
    fn preview_appends_ellipsis_only_when_cut() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdefghijkl", 10), "abcdefghij...");
    }

    #[test]
    fn fit_to_length_respects_limit() {
        let out = fit_to_length(&"x".repeat(20), 10);
        assert_eq!(out, "xxxxxxx...");
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(take_chars("héllo wörld", 7), "héllo w");
        assert_eq!(preview("💖💖💖", 2), "💖💖...");
    }

    #[rstest]
    #[case("paris is the capital", "Paris is the capital.")]
    #[case("  Done!  ", "Done!")]
    #[case("Really?", "Really?")]
    #[case("", "")]
    fn sentence_shaping(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(as_sentence(input), expected);
    }

    #[test]
    fn rounding_and_clamping() {
        assert!((round_to(0.876_54, 2) - 0.88).abs() < 1e-9);
        assert!((clamp_unit(1.4) - 1.0).abs() < f64::EPSILON);
        assert!(clamp_unit(-0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(normalize_whitespace("  a \n\t b   c "), "a b c");
    }
}
