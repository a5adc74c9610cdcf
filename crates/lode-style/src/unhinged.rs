//! Blunt, casual voice: politeness and hedging stripped, slang in.

use std::sync::LazyLock;

use rand::Rng;

use crate::text::{
    Substitutions, collapse_whitespace, compile, insert_word, pick, substitute, word_count,
};

pub const EMPTY: &str = "Look, I'm here. What do you want?";

const INTENSIFIERS: &[&str] = &[
    "absolutely", "literally", "honestly", "frankly", "actually", "totally", "seriously", "truly",
];

const RAW_PHRASES: &[&str] = &[
    "here's the tea:",
    "let me be real with you:",
    "no BS:",
    "straight up:",
    "real talk:",
    "look:",
    "here's the deal:",
    "reality check:",
];

const ENDINGS: &[&str] = &[".", "!", " honestly.", " though.", " for real."];

const INTENSIFIER_CHANCE: f64 = 0.3;
const RAW_PHRASE_CHANCE: f64 = 0.4;

static SUBSTITUTIONS: LazyLock<Substitutions> = LazyLock::new(|| {
    compile(&[
        // politeness and hedging
        ("please", ""),
        ("thank you|thanks", "thx"),
        ("I would|I'd", "I'll"),
        ("could you|would you", "you gonna"),
        ("is it possible|would it be", "can we"),
        ("I think|I believe|in my opinion|from my perspective", ""),
        ("it should be noted|it is important to note|it is worth mentioning", ""),
        ("furthermore|moreover|accordingly", ""),
        ("with respect to|with regard to|in relation to", "about"),
        ("however|nevertheless|nonetheless", "but"),
        ("therefore|thus|consequently", "so"),
        ("in conclusion|to summarize|in summary", "basically"),
        ("obviously|clearly|definitely", "yeah"),
        // vocabulary
        ("helpful|useful|beneficial", "actually works"),
        ("wonderful|amazing|fantastic|excellent", "pretty good"),
        ("important|crucial|essential|vital", "matters"),
        ("should|must|have to|need to", "gotta"),
        ("problem|issue|trouble|difficulty", "thing"),
        ("difficult|challenging", "tough"),
        ("simple|easy|straightforward", "basic"),
        ("complex|complicated|sophisticated", "fancy"),
        ("very|extremely|highly", "super"),
        ("interesting|intriguing", "weird"),
        ("understand|comprehend|grasp", "get"),
        ("big|large|huge|enormous", "massive"),
        ("rich|wealthy|affluent", "loaded"),
    ])
});

pub fn apply<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    if text.trim().is_empty() {
        return EMPTY.to_string();
    }
    let mut styled = collapse_whitespace(&substitute(text, &SUBSTITUTIONS));
    if styled.is_empty() {
        return EMPTY.to_string();
    }

    let count = word_count(&styled);
    if count > 5 {
        let mut chosen = Vec::new();
        for position in [1, count / 2, count - 2] {
            if rng.random_bool(INTENSIFIER_CHANCE) {
                chosen.push((position, pick(INTENSIFIERS, rng)));
            }
        }
        // Back to front, so earlier positions still point at their word.
        for (position, intensifier) in chosen.into_iter().rev() {
            styled = insert_word(&styled, position, intensifier);
        }
    }

    if rng.random_bool(RAW_PHRASE_CHANCE) {
        let phrase = pick(RAW_PHRASES, rng);
        styled = if rng.random_bool(0.5) {
            format!("{phrase} {styled}")
        } else {
            insert_word(&styled, word_count(&styled) / 2, phrase)
        };
    }

    if !styled.ends_with(['.', '!', '?']) {
        styled.push_str(pick(ENDINGS, rng));
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn strips_politeness() {
        let styled = apply("Thanks, this is very helpful.", &mut StdRng::seed_from_u64(0));
        assert!(styled.contains("thx"), "{styled}");
        assert!(styled.contains("super"), "{styled}");
        assert!(styled.contains("works"), "{styled}");
        assert!(!styled.to_lowercase().contains("helpful"));
    }

    #[test]
    fn hedges_vanish_without_double_spaces() {
        let styled = apply("I think Rust is fast.", &mut StdRng::seed_from_u64(0));
        assert!(!styled.contains("  "));
        assert!(!styled.contains("I think"));
        assert!(styled.contains("Rust"), "{styled}");
        assert!(styled.ends_with("fast."), "{styled}");
    }

    #[test]
    fn text_that_vanishes_gets_default() {
        assert_eq!(apply("please", &mut StdRng::seed_from_u64(9)), EMPTY);
    }

    #[test]
    fn always_ends_with_punctuation() {
        for seed in 0..10 {
            let styled = apply("Rust has no garbage collector", &mut StdRng::seed_from_u64(seed));
            assert!(styled.ends_with(['.', '!', '?']), "{styled}");
        }
    }
}
