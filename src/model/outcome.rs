use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    GaveUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Difficulty chosen, no secret yet.
    Configuring,
    Active,
    Over(Outcome),
}

impl SessionPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, SessionPhase::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            SessionPhase::Over(outcome) => Some(*outcome),
            _ => None,
        }
    }
}
