//! The balance ledger: single owner of the persisted point balance.

use crate::errors::WagerError;
use crate::storage::{GameStore, BALANCE_KEY};
use tracing::{error, info};

fn parse_u64_le(bytes: &[u8]) -> Option<u64> {
    let arr: [u8; 8] = bytes.try_into().ok()?;
    Some(u64::from_le_bytes(arr))
}

/// Owns the player's point balance. `apply_delta` is the single point of
/// mutation; everything else only reads.
#[derive(Debug)]
pub struct BalanceLedger {
    store: GameStore,
    balance: u64,
}

impl BalanceLedger {
    /// Load the persisted balance, seeding the slot with `starting_balance`
    /// on first use.
    pub fn open(store: GameStore, starting_balance: u64) -> Result<Self, WagerError> {
        let balance = match store.get(BALANCE_KEY)? {
            Some(bytes) => parse_u64_le(&bytes).ok_or_else(|| {
                WagerError::Persistence("balance slot holds malformed bytes".to_string())
            })?,
            None => {
                store.put(BALANCE_KEY, &starting_balance.to_le_bytes())?;
                info!(starting_balance, "seeded new balance");
                starting_balance
            }
        };
        Ok(Self { store, balance })
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Apply a signed delta and persist the new balance before returning it.
    ///
    /// The validator guarantees deltas are either `-stake` with
    /// `stake <= balance` or `+stake * 2`, so the balance cannot go negative
    /// through normal flow. A delta that would underflow (or overflow) is
    /// rejected with `LedgerCorruption` to catch integration bugs.
    pub fn apply_delta(&mut self, delta: i64) -> Result<u64, WagerError> {
        let next = self.balance.checked_add_signed(delta).ok_or_else(|| {
            error!(balance = self.balance, delta, "rejected ledger delta");
            WagerError::LedgerCorruption {
                balance: self.balance,
                delta,
            }
        })?;

        self.store.put(BALANCE_KEY, &next.to_le_bytes())?;
        self.balance = next;
        Ok(next)
    }
}
