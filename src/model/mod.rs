mod code;
mod difficulty;
mod game_engine_command;
mod game_engine_event;
mod game_stats;
mod guess_attempt;
mod hint;
mod outcome;
mod score;
mod session_projection;
mod session_snapshot;
mod timer_state;

pub use code::{Guess, SecretCode};
pub use difficulty::{Difficulty, DifficultyConfig, HistoryVisibility};
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::GameEngineEvent;
pub use game_stats::{GameRecord, StatsRecord, StatsTable};
pub use guess_attempt::GuessAttempt;
pub use hint::{HintReveal, HINT_PLACEHOLDER};
pub use outcome::{Outcome, SessionPhase};
pub use score::Score;
pub use session_projection::SessionProjection;
pub use session_snapshot::SessionSnapshot;
pub use timer_state::TimerState;
