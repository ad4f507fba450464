pub mod celebration;
pub mod game_engine;
pub mod game_session;
pub mod hint_provider;
pub mod scoring;
pub mod secret_generator;
pub mod settings;
pub mod stats_manager;
pub mod storage;

pub use game_engine::GameEngine;
pub use game_session::{GameSession, SubmitResult};
pub use hint_provider::HintProvider;
pub use scoring::score;
pub use secret_generator::generate_secret;
pub use settings::Settings;
pub use stats_manager::StatsLedger;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
