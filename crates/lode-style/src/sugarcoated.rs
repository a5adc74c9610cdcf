//! Sweet, upbeat voice: harsh words softened, warm greeting and sign-off.

use std::sync::LazyLock;

use rand::Rng;

use crate::text::{Substitutions, compile, pick, substitute};

pub const EMPTY: &str = "💖 Hello lovely! How can I help you today? 🌸";

const OPENINGS: &[&str] = &[
    "💖 Hi sweetie! ",
    "🌸 Oh honey! ",
    "✨ Hello lovely! ",
    "🌈 Hey sunshine! ",
    "💫 Hi there beautiful! ",
    "🌺 Hello gorgeous! ",
    "🦋 Hey darling! ",
    "🌻 Hi sweetpea! ",
];

const CLOSINGS: &[&str] = &[" 💖✨", " 🌸💫", " 🌈💖", " ✨🌸", " 💫🌺", " 🌹💕", " 🦋✨", " 🌻💖"];

const ENCOURAGEMENTS: &[&str] = &[
    " You're doing amazing! ✨",
    " Keep shining! 💫",
    " Don't worry, everything will work out! 💖",
    " Keep being your amazing self! 🌈",
    " You're one of a kind! 💕",
];

const ENCOURAGEMENT_CHANCE: f64 = 0.3;

static SUBSTITUTIONS: LazyLock<Substitutions> = LazyLock::new(|| {
    compile(&[
        ("dead|death|dying|die|died", "sleep eternal"),
        ("kill|killed|killing|murder|murdered", "peacefully transition"),
        ("hate|hated|hating", "dislike very much"),
        ("terrible|awful|horrible|bad|badly", "not so great"),
        ("problem|problems|issue|issues", "little challenge"),
        ("wrong|incorrect|inaccurate", "not quite right"),
        ("fail|failed|failing|failure", "have a setback"),
        ("violence|violent", "not nice behavior"),
        ("crime|criminal", "not good action"),
        ("ugly|hideous|disgusting", "not pretty"),
        ("stupid|dumb|idiotic", "not smart"),
        ("poor|poverty", "having financial challenges"),
        ("sick|ill|diseased", "feeling unwell"),
        ("lonely|alone", "having some me-time"),
        ("angry|mad|furious", "feeling frustrated"),
        ("worry|worried|anxious", "feeling a bit concerned"),
        ("sad|depressed|unhappy", "feeling blue"),
        ("mistake|error", "oopsie"),
        ("difficult|hard", "a bit tricky"),
        ("broken|damaged", "in need of a little fix"),
        ("war|battle", "conflict"),
        ("scary|creepy|frightening", "adventurous"),
        ("boring|dull", "calm and peaceful"),
    ])
});

pub fn apply<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    if text.trim().is_empty() {
        return EMPTY.to_string();
    }
    let mut styled = substitute(text, &SUBSTITUTIONS);

    if !OPENINGS.iter().any(|o| styled.contains(o.trim())) {
        styled = format!("{}{styled}", pick(OPENINGS, rng));
    }
    if !CLOSINGS.iter().any(|c| styled.ends_with(c.trim())) {
        styled.push_str(pick(CLOSINGS, rng));
    }
    if rng.random_bool(ENCOURAGEMENT_CHANCE)
        && !ENCOURAGEMENTS.iter().any(|e| styled.contains(e.trim()))
    {
        styled.push_str(pick(ENCOURAGEMENTS, rng));
    }
    styled
}
