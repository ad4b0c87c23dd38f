//! Stake parsing and wager validation. Pure functions, no side effects.

use crate::errors::WagerError;

/// Parse raw stake input into a signed integer so that negative input reaches
/// the range check below instead of failing as a format error.
pub fn parse_stake(input: &str) -> Result<i64, WagerError> {
    input.trim().parse::<i64>().map_err(|_| WagerError::InvalidFormat {
        input: input.trim().to_string(),
    })
}

/// Check a proposed stake against the current balance.
///
/// Rules, in order: `stake < 1` fails as `NonPositiveStake`; `stake > balance`
/// fails as `InsufficientBalance`. A stake exactly equal to the full balance
/// is accepted.
pub fn validate(stake: i64, balance: u64) -> Result<u64, WagerError> {
    if stake < 1 {
        return Err(WagerError::NonPositiveStake { stake });
    }
    let stake = stake as u64;
    if stake > balance {
        return Err(WagerError::InsufficientBalance { stake, balance });
    }
    Ok(stake)
}

/// Parse-then-validate convenience for callers holding the raw input string.
pub fn validate_input(input: &str, balance: u64) -> Result<u64, WagerError> {
    validate(parse_stake(input)?, balance)
}
