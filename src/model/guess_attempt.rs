use super::{Guess, Score};
use serde::{Deserialize, Serialize};

/// One row of session history. `score` is `None` once Nightmare mode has
/// hidden the feedback of an older row.
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessAttempt {
    pub guess: Guess,
    pub score: Option<Score>,
}

impl GuessAttempt {
    pub fn new(guess: Guess, score: Score) -> Self {
        Self {
            guess,
            score: Some(score),
        }
    }

    pub fn bulls(&self) -> Option<usize> {
        self.score.map(|s| s.bulls)
    }

    pub fn cows(&self) -> Option<usize> {
        self.score.map(|s| s.cows)
    }

    pub fn is_feedback_visible(&self) -> bool {
        self.score.is_some()
    }

    pub(crate) fn hide_feedback(&mut self) {
        self.score = None;
    }
}
