use super::{GameRecord, HintReveal, Outcome, SecretCode, SessionSnapshot, StatsTable};
use crate::error::ValidationError;

#[derive(Debug, Clone)]
pub enum GameEngineEvent {
    SessionStarted(SessionSnapshot),
    SessionUpdated(SessionSnapshot),
    GuessRejected(ValidationError),
    GameOver {
        outcome: Outcome,
        secret: SecretCode,
        record: GameRecord,
    },
    CelebrationChanged(bool),
    StatsUpdated(StatsTable),
    HintRevealed(HintReveal),
    HintAvailabilityChanged(bool),
    RulesDisclosureRequested,
}
