//! Error types for wager submission and persistence.
//!
//! Validation failures are terminal for one submission attempt and leave no
//! state behind; ledger/persistence failures are fatal for the round and must
//! be surfaced, never swallowed.

use thiserror::Error;

/// Everything that can go wrong between a stake being entered and a round
/// result being durably recorded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WagerError {
    /// Stake input did not parse as a whole number of points.
    #[error("stake must be a whole number of points (got {input:?})")]
    InvalidFormat { input: String },

    /// Stake was below the one-point minimum.
    #[error("stake must be at least 1 point (got {stake})")]
    NonPositiveStake { stake: i64 },

    /// Stake exceeded the current balance.
    #[error("stake {stake} exceeds current balance {balance}")]
    InsufficientBalance { stake: u64, balance: u64 },

    /// A delta reached the ledger that would drive the balance negative (or
    /// overflow it). The validator should have made this unreachable; hitting
    /// it means a validator/resolver integration bug.
    #[error("ledger corruption: delta {delta} cannot be applied to balance {balance}")]
    LedgerCorruption { balance: u64, delta: i64 },

    /// A store read or write failed, or a stored slot held malformed bytes.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl WagerError {
    /// Fatal errors mean the round's outcome may not have been durably
    /// recorded; callers must not present the round as resolved.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WagerError::LedgerCorruption { .. } | WagerError::Persistence(_)
        )
    }
}

impl From<rocksdb::Error> for WagerError {
    fn from(err: rocksdb::Error) -> Self {
        WagerError::Persistence(err.to_string())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}
