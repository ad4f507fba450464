use super::storage::{read_json, write_json, KeyValueStore};
use crate::error::StorageError;
use crate::model::Difficulty;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const SETTINGS_KEY: &str = "settings";
pub const RULES_SHOWN_KEY: &str = "rulesShown";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    /// Last difficulty played; the next launch starts on it.
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: Difficulty::default(),
        }
    }
}

impl Settings {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match read_json::<Settings>(store, SETTINGS_KEY) {
            Some(mut settings) => {
                settings.migrate();
                settings
            }
            None => Settings::default(),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        write_json(store, SETTINGS_KEY, self)
    }

    fn migrate(&mut self) {
        if self.version == 0 {
            self.version = 1;
        }
    }

    /// Whether the one-time rules disclosure has already happened.
    pub fn rules_shown(store: &dyn KeyValueStore) -> bool {
        read_json::<bool>(store, RULES_SHOWN_KEY).unwrap_or(false)
    }

    pub fn mark_rules_shown(store: &dyn KeyValueStore) -> Result<(), StorageError> {
        write_json(store, RULES_SHOWN_KEY, &true)
    }

    pub fn is_debug_mode() -> bool {
        env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    /// `SEED` pins secret generation and hint placement.
    pub fn seed_from_env() -> Option<u64> {
        let raw = env::var("SEED").ok()?;
        match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                warn!(target: "settings", "Ignoring SEED={:?}: {}", raw, e);
                None
            }
        }
    }

    /// `BULLSCOWS_DATA_DIR`, else `$HOME/.local/share/bullscows`, else a
    /// `.bullscows` directory under the working directory.
    pub fn data_dir() -> PathBuf {
        if let Some(dir) = env::var_os("BULLSCOWS_DATA_DIR") {
            return PathBuf::from(dir);
        }
        match env::var_os("HOME") {
            Some(home) => PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("bullscows"),
            None => PathBuf::from(".bullscows"),
        }
    }
}
