//! Nihilistic, meta-commentary voice that distrusts everything it says.

use std::sync::LazyLock;

use rand::Rng;

use crate::text::{Substitutions, append_clause, compile, insert_word, pick, pick_pair, substitute, word_count};

pub const EMPTY: &str =
    "Even silence is meaningless in this chaotic existence. What meaningless noise will you produce next?";

const EMOJIS: &[&str] = &["🔥", "👹", "😈", "⚡", "🌪️", "🌀", "⚠️", "💥", "🕳️", "🎭"];

const META_COMMENTS: &[&str] = &[
    "(as if that matters)",
    "(how predictable)",
    "(spoiler: it doesn't)",
    "(the irony is palpable)",
    "(because why not)",
    "(reality is optional)",
    "(allegedly)",
];

const DEMONIC: &[&str] = &[
    "the void whispers back:",
    "chaos reigns:",
    "order is an illusion:",
    "the abyss stares back:",
    "entropy wins:",
];

const IRONY: &[&str] = &[
    ", which is hilarious if you think about it",
    ", as if anyone cares",
    ", but what do I know",
    ", naturally",
    ", because of course it is",
];

const EMPHASIS: &[&str] = &["*allegedly*", "*supposedly*", "*definitely*", "*absolutely*", "*clearly*"];

const META_CHANCE: f64 = 0.5;
const DEMONIC_CHANCE: f64 = 0.3;
const DEMONIC_AT_END_CHANCE: f64 = 0.6;
const IRONY_CHANCE: f64 = 0.4;
const EMPHASIS_CHANCE: f64 = 0.3;

static SUBSTITUTIONS: LazyLock<Substitutions> = LazyLock::new(|| {
    compile(&[
        ("hope|faith", "delusional optimism"),
        ("good|great|excellent", "deceptively appealing"),
        ("help|assist|aid", "tempt with false hope"),
        ("simple|easy|basic", "deceptively simple"),
        ("truth|true|honest", "convenient narrative"),
        ("peace|harmony", "forced conformity"),
        ("safe|secure", "vulnerable and exposed"),
        ("knowledge|wisdom", "dangerous awareness"),
        ("normal|ordinary", "conforming sheep"),
        ("important|critical|vital", "absurdly significant"),
        ("beautiful|pretty", "superficially appealing"),
        ("happy|glad", "temporarily distracted"),
        ("facts|evidence|proof", "cherry-picked data"),
        ("certain|sure", "suspiciously confident"),
        ("rules|laws", "arbitrary constraints"),
        ("society|community", "the herd"),
        ("progress|advancement", "organized decline"),
        ("meaning|purpose", "cosmic joke"),
    ])
});

pub fn apply<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    if text.trim().is_empty() {
        return EMPTY.to_string();
    }
    let mut styled = substitute(text, &SUBSTITUTIONS);

    let count = word_count(&styled);
    if count > 5 && rng.random_bool(META_CHANCE) {
        let positions = [1, count / 2, count - 2];
        let position = positions[rng.random_range(0..positions.len())];
        styled = insert_word(&styled, position, pick(META_COMMENTS, rng));
    }

    if rng.random_bool(DEMONIC_CHANCE) {
        let expression = pick(DEMONIC, rng);
        styled = if rng.random_bool(DEMONIC_AT_END_CHANCE) {
            append_clause(&styled, &format!(", {}", expression.trim_end_matches(':')))
        } else {
            format!("{expression} {styled}")
        };
    }

    if rng.random_bool(IRONY_CHANCE) {
        styled = append_clause(&styled, pick(IRONY, rng));
    }

    if styled.ends_with("...") {
        styled.push_str(" more at 11.");
    } else if styled.ends_with('.') {
        styled.push_str(" obviously.");
    }

    if !EMOJIS.iter().any(|e| styled.contains(e)) {
        let (open, close) = pick_pair(EMOJIS, rng);
        styled = format!("{open} {styled} {close}");
    }

    let count = word_count(&styled);
    if count > 3 && rng.random_bool(EMPHASIS_CHANCE) {
        let position = rng.random_range(1..count);
        styled = insert_word(&styled, position, pick(EMPHASIS, rng));
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn distrusts_vocabulary() {
        let styled = apply("Good facts help", &mut StdRng::seed_from_u64(4));
        assert!(styled.contains("deceptively appealing"), "{styled}");
        assert!(styled.contains("cherry-picked data"), "{styled}");
        assert!(styled.contains("tempt with false hope"), "{styled}");
    }

    #[test]
    fn always_wrapped_in_chaos() {
        for seed in 0..10 {
            let styled = apply("Rust compiles code.", &mut StdRng::seed_from_u64(seed));
            assert!(EMOJIS.iter().any(|e| styled.starts_with(e)), "{styled}");
            assert!(styled.contains("obviously."), "{styled}");
        }
    }

    #[test]
    fn ellipsis_gets_the_news_sign_off() {
        for seed in 0..10 {
            let styled = apply("And then...", &mut StdRng::seed_from_u64(seed));
            assert!(styled.contains("more at 11."), "{styled}");
        }
    }
}
