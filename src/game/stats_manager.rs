use super::storage::{read_json, write_json, KeyValueStore};
use crate::error::StorageError;
use crate::model::{Difficulty, StatsRecord, StatsTable};
use log::{debug, info};
use std::rc::Rc;

pub const STATS_KEY: &str = "stats";

/// Persisted per-difficulty statistics. Every update re-reads the stored
/// table, applies the change and writes the whole table back.
pub struct StatsLedger {
    store: Rc<dyn KeyValueStore>,
}

impl std::fmt::Debug for StatsLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsLedger").finish_non_exhaustive()
    }
}

impl StatsLedger {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored statistics for every difficulty. Absent or unreadable data
    /// reads as zeros.
    pub fn load_stats(&self) -> StatsTable {
        read_json::<StatsTable>(self.store.as_ref(), STATS_KEY)
            .unwrap_or_default()
            .complete()
    }

    pub fn stats_for(&self, difficulty: Difficulty) -> StatsRecord {
        self.load_stats().get(difficulty)
    }

    /// Called after each accepted guess with the session's attempt count so
    /// far and whether that guess won.
    pub fn record_outcome(
        &self,
        difficulty: Difficulty,
        attempts_used: u32,
        won: bool,
    ) -> Result<StatsTable, StorageError> {
        let mut table = self.load_stats();
        table.entry_mut(difficulty).apply(attempts_used, won);
        debug!(
            target: "stats",
            "{} after attempt {} (won: {}): {:?}",
            difficulty,
            attempts_used,
            won,
            table.get(difficulty)
        );
        write_json(self.store.as_ref(), STATS_KEY, &table)?;
        Ok(table)
    }

    pub fn reset(&self) -> Result<StatsTable, StorageError> {
        let table = StatsTable::default().complete();
        write_json(self.store.as_ref(), STATS_KEY, &table)?;
        info!(target: "stats", "Statistics reset");
        Ok(table)
    }
}
