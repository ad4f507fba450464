use crate::model::{Difficulty, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

/// Aggregate results for one difficulty. `best_attempt_count == 0` means no
/// win has been recorded yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    pub games_played: u32,
    pub games_won: u32,
    pub win_rate: f64,
    pub best_attempt_count: u32,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl StatsRecord {
    /// Folds one accepted guess into the record. A session counts as played
    /// on its first guess; wins and the best count move only when `won`.
    pub fn apply(&mut self, attempts_used: u32, won: bool) {
        if attempts_used == 1 {
            self.games_played += 1;
        }

        if won {
            self.games_won += 1;
            self.best_attempt_count = match self.best_attempt_count {
                0 => attempts_used,
                best => best.min(attempts_used),
            };
        }

        // Stats reset mid-session can leave a win without its played count.
        self.games_played = self.games_played.max(self.games_won);

        self.win_rate = if self.games_played == 0 {
            0.0
        } else {
            round2(100.0 * f64::from(self.games_won) / f64::from(self.games_played))
        };
    }
}

/// Per-difficulty records as persisted under the `stats` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsTable(BTreeMap<Difficulty, StatsRecord>);

impl StatsTable {
    /// Missing difficulties read as zeroed records.
    pub fn get(&self, difficulty: Difficulty) -> StatsRecord {
        self.0.get(&difficulty).copied().unwrap_or_default()
    }

    pub fn entry_mut(&mut self, difficulty: Difficulty) -> &mut StatsRecord {
        self.0.entry(difficulty).or_default()
    }

    /// Every difficulty, absent ones filled with zeros.
    pub fn complete(mut self) -> Self {
        for difficulty in Difficulty::all() {
            self.0.entry(difficulty).or_default();
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, &StatsRecord)> {
        self.0.iter().map(|(d, r)| (*d, r))
    }
}

/// Summary of a finished session, handed to the UI with the game-over event.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct GameRecord {
    pub playthrough_id: Uuid,
    pub difficulty: Difficulty,
    pub outcome: Outcome,
    pub attempts: usize,
    pub completion_time: Duration,
    pub timestamp: i64,
}
