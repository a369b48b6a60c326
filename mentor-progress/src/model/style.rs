use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// How the learner prefers lessons to be presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningStyle {
    #[serde(rename = "Text-based")]
    TextBased,
    #[default]
    #[serde(rename = "Example-based")]
    ExampleBased,
    Visual,
    Gamified,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::TextBased,
        LearningStyle::ExampleBased,
        LearningStyle::Visual,
        LearningStyle::Gamified,
    ];

    /// Canonical label, also used as the persisted value.
    pub fn label(self) -> &'static str {
        match self {
            LearningStyle::TextBased => "Text-based",
            LearningStyle::ExampleBased => "Example-based",
            LearningStyle::Visual => "Visual",
            LearningStyle::Gamified => "Gamified",
        }
    }

    /// Match user input against the known labels, ignoring case, spaces and dashes.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = normalize(raw);
        if wanted.is_empty() {
            return None;
        }

        Self::ALL
            .into_iter()
            .find(|style| normalize(style.label()) == wanted)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LearningStyle {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ProgressError::UnknownStyle(s.trim().to_owned()))
    }
}
