//! Bounded, persisted log of recent round outcomes.

use crate::errors::WagerError;
use crate::storage::{GameStore, HISTORY_KEY};
use crate::types::RoundResult;

/// Maximum number of rounds retained; oldest entries are evicted first.
pub const HISTORY_CAP: usize = 15;

/// The last `HISTORY_CAP` round results, most-recent-last (chronological).
/// Presentation reverses for "latest first" display.
#[derive(Debug)]
pub struct HistoryLog {
    store: GameStore,
    entries: Vec<RoundResult>,
}

impl HistoryLog {
    /// Load the persisted history, empty when absent. Entries beyond the cap
    /// (e.g. written by an older build with a larger cap) are dropped
    /// oldest-first on load.
    pub fn open(store: GameStore) -> Result<Self, WagerError> {
        let mut entries: Vec<RoundResult> = match store.get(HISTORY_KEY)? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                WagerError::Persistence(format!("history slot holds malformed JSON: {}", e))
            })?,
            None => Vec::new(),
        };
        if entries.len() > HISTORY_CAP {
            let excess = entries.len() - HISTORY_CAP;
            entries.drain(..excess);
        }
        Ok(Self { store, entries })
    }

    /// Append a result, evict from the front past the cap, and persist
    /// synchronously before returning. No separate flush step: once `append`
    /// returns `Ok`, the entry is on disk.
    pub fn append(&mut self, result: RoundResult) -> Result<(), WagerError> {
        self.entries.push(result);
        if self.entries.len() > HISTORY_CAP {
            let excess = self.entries.len() - HISTORY_CAP;
            self.entries.drain(..excess);
        }

        let bytes = serde_json::to_vec(&self.entries)
            .map_err(|e| WagerError::Persistence(format!("failed to encode history: {}", e)))?;
        self.store.put(HISTORY_KEY, &bytes)
    }

    /// Recorded rounds in chronological order (most-recent-last).
    pub fn recent(&self) -> &[RoundResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
