use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
    Nightmare,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

/// Which history rows keep their bulls/cows once a newer guess lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryVisibility {
    Always,
    LatestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub code_length: usize,
    pub max_attempts: usize,
    pub history_visibility: HistoryVisibility,
}

impl DifficultyConfig {
    pub fn history_feedback_visible(&self) -> bool {
        self.history_visibility == HistoryVisibility::Always
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Hard, Difficulty::Nightmare]
    }

    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                code_length: 4,
                max_attempts: 7,
                history_visibility: HistoryVisibility::Always,
            },
            Difficulty::Hard => DifficultyConfig {
                code_length: 5,
                max_attempts: 8,
                history_visibility: HistoryVisibility::Always,
            },
            Difficulty::Nightmare => DifficultyConfig {
                code_length: 5,
                max_attempts: 8,
                history_visibility: HistoryVisibility::LatestOnly,
            },
        }
    }

    pub fn code_length(&self) -> usize {
        self.config().code_length
    }

    pub fn max_attempts(&self) -> usize {
        self.config().max_attempts
    }

    /// Easy hands out a fresh hint every time one is asked for; the other
    /// levels allow a single hint per session.
    pub fn repeats_hints(&self) -> bool {
        matches!(self, Difficulty::Easy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
            Difficulty::Nightmare => "nightmare",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::all()
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownDifficulty(wanted.to_string()))
    }
}
