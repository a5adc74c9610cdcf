//! Morbid, existential voice: everything is temporary.

use std::sync::LazyLock;

use rand::Rng;

use crate::text::{Substitutions, append_clause, compile, insert_word, pick, pick_pair, substitute, word_count};

pub const EMPTY: &str =
    "Even your questions are temporary, like all things in this fleeting existence.";

const EMOJIS: &[&str] = &["⚰️", "💀", "☠️", "🖤", "🕯️", "🌑", "🦇", "🕸️", "🔮", "👻"];

const EXISTENTIAL: &[&str] = &[
    " in the grand scheme of things",
    " while time still allows",
    " in our brief existence",
    " before darkness falls",
    " during this temporary pause",
    " in our fleeting moment",
    " while we still breathe",
];

const METAPHORS: &[&str] = &[
    "the reaper's approach",
    "shadows lengthening",
    "time's relentless march",
    "the final curtain",
    "the great unknown",
    "darkness beckoning",
    "the mortal coil's burden",
];

const FINAL_CLAUSE: &str = ", before the inevitable";

const EXISTENTIAL_CHANCE: f64 = 0.3;
const EXISTENTIAL_AT_END_CHANCE: f64 = 0.7;
const METAPHOR_CHANCE: f64 = 0.2;

static SUBSTITUTIONS: LazyLock<Substitutions> = LazyLock::new(|| {
    compile(&[
        ("happy|joy|pleasure|delight|cheerful", "fleeting moment before darkness"),
        ("love|beloved|affection", "transient affection"),
        ("life|living|alive", "temporary existence"),
        ("birth|born", "beginning of the end"),
        ("success|victory|triumph", "brief illusion of control"),
        ("beautiful|pretty|gorgeous|lovely", "temporarily pleasing"),
        ("young|youth|youthful", "temporarily breathing"),
        ("future|tomorrow", "limited time remaining"),
        ("hope|hopeful|optimistic", "desperate clinging"),
        ("dream|dreams|dreaming", "mental escape from reality"),
        ("home|house|shelter", "temporary refuge"),
        ("family|relatives", "temporary companions"),
        ("friend|friends", "temporary allies"),
        ("peace|peaceful|calm", "calm before the storm"),
        ("safe|safety|secure", "illusion of protection"),
        ("warm|cozy|comfortable", "momentary warmth"),
        ("sunrise|morning|dawn", "brief pause in darkness"),
        ("grow|growing|growth", "slowly approaching the inevitable"),
        ("create|creating|creation", "delaying the inevitable"),
        ("forever|eternal|immortal|permanent", "delusion"),
        ("perfect|flawless", "temporary illusion"),
        ("world|earth|planet", "temporary rock"),
        ("human|humans|people", "temporary consciousness"),
    ])
});

pub fn apply<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    if text.trim().is_empty() {
        return EMPTY.to_string();
    }
    let mut styled = substitute(text, &SUBSTITUTIONS);

    if rng.random_bool(EXISTENTIAL_CHANCE) {
        let phrase = pick(EXISTENTIAL, rng);
        styled = if rng.random_bool(EXISTENTIAL_AT_END_CHANCE) {
            append_clause(&styled, phrase)
        } else {
            insert_word(&styled, word_count(&styled) / 2, phrase)
        };
    }

    if rng.random_bool(METAPHOR_CHANCE) {
        let metaphor = pick(METAPHORS, rng);
        styled = append_clause(&styled, &format!(", {metaphor}"));
    }

    if styled.ends_with('.') && !styled.ends_with("..") && !styled.contains(FINAL_CLAUSE) {
        styled = append_clause(&styled, FINAL_CLAUSE);
    }

    if !EMOJIS.iter().any(|e| styled.contains(e)) {
        let (open, close) = pick_pair(EMOJIS, rng);
        styled = format!("{open} {styled} {close}");
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn darkens_vocabulary() {
        let styled = apply("My friends love life", &mut StdRng::seed_from_u64(2));
        assert!(styled.contains("temporary allies"), "{styled}");
        assert!(styled.contains("transient affection"), "{styled}");
        assert!(styled.contains("temporary existence"), "{styled}");
    }

    #[test]
    fn statements_end_in_the_inevitable() {
        let styled = apply("Rust compiles code.", &mut StdRng::seed_from_u64(7));
        assert!(styled.contains(", before the inevitable."), "{styled}");
    }

    #[test]
    fn wrapped_in_dark_emoji_once() {
        for seed in 0..10 {
            let styled = apply("Rust compiles code.", &mut StdRng::seed_from_u64(seed));
            let first = styled.split_whitespace().next().unwrap_or_default();
            assert!(EMOJIS.contains(&first), "{styled}");
            let again = apply(&styled, &mut StdRng::seed_from_u64(seed));
            assert_eq!(again.split_whitespace().next(), Some(first));
        }
    }
}
