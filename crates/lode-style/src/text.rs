//! Shared building blocks for the style transforms.

use rand::Rng;
use rand::seq::IndexedRandom;
use regex::{NoExpand, Regex};

/// Ordered `(pattern, replacement)` pairs, applied one after another.
pub type Substitutions = Vec<(Regex, &'static str)>;

/// Compile a table of `|`-separated alternatives into whole-word,
/// case-insensitive patterns.
pub fn compile(table: &[(&str, &'static str)]) -> Substitutions {
    table
        .iter()
        .map(|(alternatives, replacement)| {
            let pattern = format!(r"(?i)\b(?:{alternatives})\b");
            (
                Regex::new(&pattern).expect("static pattern compiles"),
                *replacement,
            )
        })
        .collect()
}

pub fn substitute(text: &str, table: &Substitutions) -> String {
    table.iter().fold(text.to_string(), |acc, (pattern, replacement)| {
        pattern.replace_all(&acc, NoExpand(replacement)).into_owned()
    })
}

pub fn pick<'a, R: Rng + ?Sized>(items: &[&'a str], rng: &mut R) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Two different entries.
pub fn pick_pair<'a, R: Rng + ?Sized>(items: &[&'a str], rng: &mut R) -> (&'a str, &'a str) {
    let mut chosen = items.choose_multiple(rng, 2).copied();
    let first = chosen.next().unwrap_or_default();
    let second = chosen.next().unwrap_or(first);
    (first, second)
}

/// Byte offsets where each whitespace-separated word begins.
fn word_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut after_space = true;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            after_space = true;
        } else if after_space {
            starts.push(i);
            after_space = false;
        }
    }
    starts
}

/// Insert `phrase` as a word before word `position`, or after the last word
/// when `position` is past the end. Surrounding whitespace, line breaks
/// included, is left as it was.
pub fn insert_word(text: &str, position: usize, phrase: &str) -> String {
    let phrase = phrase.trim();
    if let Some(&at) = word_starts(text).get(position) {
        return format!("{}{phrase} {}", &text[..at], &text[at..]);
    }
    let end = text.trim_end().len();
    if end == 0 {
        return phrase.to_string();
    }
    format!("{} {phrase}{}", &text[..end], &text[end..])
}

/// Append `clause` ahead of any trailing sentence punctuation.
pub fn append_clause(text: &str, clause: &str) -> String {
    let body = text.trim_end_matches(['.', '!', '?']);
    let ending = &text[body.len()..];
    format!("{body}{clause}{ending}")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse runs of spaces within each line; line breaks stay.
pub fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn substitution_is_whole_word_and_case_insensitive() {
        let table = compile(&[("cat|cats", "dog")]);
        assert_eq!(substitute("Cats and a CAT, not a catalog", &table), "dog and a dog, not a catalog");
    }

    #[test]
    fn substitution_is_ordered() {
        let table = compile(&[("a", "b"), ("b", "c")]);
        assert_eq!(substitute("a", &table), "c");
    }

    #[test]
    fn replacement_is_literal() {
        let table = compile(&[("price", "$1 and $name")]);
        assert_eq!(substitute("the price", &table), "the $1 and $name");
    }

    #[test]
    fn clause_goes_before_punctuation() {
        assert_eq!(append_clause("It ends.", " soon"), "It ends soon.");
        assert_eq!(append_clause("Really?!", " now"), "Really now?!");
        assert_eq!(append_clause("No stop", " here"), "No stop here");
    }

    #[test]
    fn insert_word_clamps_position() {
        assert_eq!(insert_word("a b", 9, " c "), "a b c");
        assert_eq!(insert_word("a b", 1, "x"), "a x b");
        assert_eq!(insert_word("", 3, "x"), "x");
    }

    #[test]
    fn insert_word_keeps_line_breaks() {
        assert_eq!(
            insert_word("• one two\n• three four", 3, "boo"),
            "• one two\nboo • three four"
        );
        assert_eq!(insert_word("a\nb\n", 5, "c"), "a\nb c\n");
    }

    #[test]
    fn collapse_is_per_line() {
        assert_eq!(collapse_whitespace("  a   b \n\tc  d  "), "a b\nc d");
    }

    #[test]
    fn pair_is_distinct() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let (a, b) = pick_pair(&["x", "y", "z"], &mut rng);
            assert_ne!(a, b);
        }
    }
}
