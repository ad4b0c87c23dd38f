//! Leapstake - round/ledger engine for a four-direction jump wagering game.
//!
//! The player picks one of four jump directions and stakes points from a
//! persisted balance; a round resolves against a uniformly random draw,
//! paying double the stake on a match and deducting it otherwise. The engine
//! owns wager validation, outcome resolution, balance mutation, and a capped
//! round history, with a countdown timer bounding the wagering session.
//! Presentation consumes the engine through `balance()`/`history()` reads and
//! `submit_wager`.

pub mod config;
pub mod engine;
pub mod errors;
pub mod history;
pub mod ledger;
pub mod resolver;
pub mod storage;
pub mod timer;
pub mod types;
pub mod validator;

pub use config::{ConfigLoader, GameConfig};
pub use engine::RoundEngine;
pub use errors::{ConfigError, WagerError};
pub use history::{HistoryLog, HISTORY_CAP};
pub use ledger::BalanceLedger;
pub use resolver::{DrawSource, Outcome, OutcomeResolver, RngDraw};
pub use storage::GameStore;
pub use timer::{RoundTimer, TimerState};
pub use types::{Category, RoundResult, Wager};
