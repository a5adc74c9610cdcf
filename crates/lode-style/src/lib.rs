//! # lode-style
//!
//! Voice transforms applied to a finished answer.
//!
//! The set of styles is closed: [`Style`] names every voice and dispatches to
//! its transform. Transforms that add flourishes take the caller's RNG, so a
//! seeded RNG gives reproducible output. Every style maps empty input to a
//! non-empty default line.

mod chaotic;
mod dark;
mod sugarcoated;
mod text;
mod unhinged;

use std::fmt;
use std::str::FromStr;

use lode_core::errors::CoreError;
use lode_core::responses::StyleInfo;
use rand::Rng;
use serde::{Deserialize, Serialize};

const NORMAL_EMPTY: &str = "No answer text was produced.";

/// An answer voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Normal,
    Sugarcoated,
    Unhinged,
    Dark,
    Chaotic,
}

impl Style {
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Sugarcoated,
        Self::Unhinged,
        Self::Dark,
        Self::Chaotic,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Sugarcoated => "sugarcoated",
            Self::Unhinged => "unhinged",
            Self::Dark => "dark",
            Self::Chaotic => "chaotic",
        }
    }

    /// Other names accepted by [`Style::from_name`].
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Normal => &[],
            Self::Sugarcoated => &["sweet", "sugarcotted"],
            Self::Unhinged => &["raw"],
            Self::Dark => &["reaper"],
            Self::Chaotic => &["666", "hexagon"],
        }
    }

    /// Resolve a name or alias, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.name() == name || style.aliases().contains(&name.as_str()))
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Normal => "The synthesized answer, unchanged",
            Self::Sugarcoated => "Sweet, gentle, and encouraging",
            Self::Unhinged => "Blunt and casual, no filter",
            Self::Dark => "Morbid and existential",
            Self::Chaotic => "Nihilistic with ironic commentary",
        }
    }

    const fn emoji(self) -> &'static str {
        match self {
            Self::Normal => "📝",
            Self::Sugarcoated => "🍭",
            Self::Unhinged => "🤬",
            Self::Dark => "💀",
            Self::Chaotic => "😈",
        }
    }

    const fn characteristics(self) -> &'static [&'static str] {
        match self {
            Self::Normal => &["neutral", "factual"],
            Self::Sugarcoated => &["kind openings", "softened vocabulary", "warm sign-offs"],
            Self::Unhinged => &["no politeness", "slang", "intensifiers"],
            Self::Dark => &["mortality metaphors", "existential asides", "dark emoji"],
            Self::Chaotic => &["meta commentary", "ironic asides", "chaotic emoji"],
        }
    }

    #[must_use]
    pub fn info(self) -> StyleInfo {
        StyleInfo {
            name: self.name().to_string(),
            aliases: self.aliases().iter().map(|a| (*a).to_string()).collect(),
            description: self.description().to_string(),
            emoji: self.emoji().to_string(),
            characteristics: self
                .characteristics()
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }

    /// Restyle `text`. Random flourishes are drawn from `rng`.
    pub fn apply<R: Rng + ?Sized>(self, text: &str, rng: &mut R) -> String {
        match self {
            Self::Normal if text.trim().is_empty() => NORMAL_EMPTY.to_string(),
            Self::Normal => text.to_string(),
            Self::Sugarcoated => sugarcoated::apply(text, rng),
            Self::Unhinged => unhinged::apply(text, rng),
            Self::Dark => dark::apply(text, rng),
            Self::Chaotic => chaotic::apply(text, rng),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CoreError::UnknownVariant {
            kind: "style",
            value: s.trim().to_string(),
        })
    }
}

/// Apply the style called `name`. An unknown name leaves the text as it is.
pub fn apply_named<R: Rng + ?Sized>(name: &str, text: &str, rng: &mut R) -> String {
    match Style::from_name(name) {
        Some(style) => style.apply(text, rng),
        None => {
            tracing::warn!(style = name, "unknown style, answer left unstyled");
            text.to_string()
        }
    }
}

#[must_use]
pub fn available_styles() -> Vec<StyleInfo> {
    Style::ALL.into_iter().map(Style::info).collect()
}
