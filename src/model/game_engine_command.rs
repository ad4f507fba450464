use super::Difficulty;
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub enum GameEngineCommand {
    /// Restart, optionally switching difficulty.
    NewGame(Option<Difficulty>),
    ChangeDifficulty(Difficulty),
    SubmitGuess(String),
    GiveUp,
    RequestHint,
    CloseHint,
    ShowRules,
    RequestStats,
    ResetStats,
    /// Clock pulse from the UI; drives the celebration timeout.
    Tick(SystemTime),
}
