//! RocksDB-backed key-value persistence for the game state.
//!
//! Two slots are used: the balance (8-byte little-endian u64) and the round
//! history (JSON array of `RoundResult`). All writes are synchronous; a failed
//! read or write surfaces as `WagerError::Persistence`.

use crate::errors::WagerError;
use rocksdb::{Options, DB};
use std::path::Path;
use std::sync::Arc;

/// Key holding the player's point balance.
pub const BALANCE_KEY: &[u8] = b"player:balance";
/// Key holding the capped round history.
pub const HISTORY_KEY: &[u8] = b"player:round_history";

/// Shared handle to the on-disk store. Cloning is cheap (shared `Arc<DB>`).
#[derive(Clone, Debug)]
pub struct GameStore {
    db: Arc<DB>,
}

impl GameStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WagerError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path)?;
        Ok(Self { db: Arc::new(db) })
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, WagerError> {
        self.db.get(key).map_err(Into::into)
    }

    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<(), WagerError> {
        self.db.put(key, value).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = GameStore::open(dir.path()).unwrap();

        assert_eq!(store.get(BALANCE_KEY).unwrap(), None);
        store.put(BALANCE_KEY, &1000u64.to_le_bytes()).unwrap();
        assert_eq!(
            store.get(BALANCE_KEY).unwrap(),
            Some(1000u64.to_le_bytes().to_vec())
        );
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = GameStore::open(dir.path()).unwrap();
            store.put(HISTORY_KEY, b"[]").unwrap();
        }
        let store = GameStore::open(dir.path()).unwrap();
        assert_eq!(store.get(HISTORY_KEY).unwrap(), Some(b"[]".to_vec()));
    }
}
