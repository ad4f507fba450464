use super::{Difficulty, GuessAttempt, Outcome, SecretCode, SessionPhase};
use serde::{Deserialize, Serialize};

/// Everything the UI needs to draw the board. `revealed_secret` is only
/// filled once the session has revealed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub code_length: usize,
    pub max_attempts: usize,
    pub phase: SessionPhase,
    pub history: Vec<GuessAttempt>,
    pub attempts_used: usize,
    pub attempts_remaining: usize,
    pub revealed_secret: Option<SecretCode>,
    pub hint_available: bool,
}

impl SessionSnapshot {
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }
}
