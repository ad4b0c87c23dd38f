//! Round orchestration: validate, resolve, apply to ledger, record history.

use crate::errors::WagerError;
use crate::history::HistoryLog;
use crate::ledger::BalanceLedger;
use crate::resolver::{DrawSource, OutcomeResolver, RngDraw};
use crate::storage::GameStore;
use crate::types::{Category, RoundResult, Wager};
use crate::validator;
use chrono::Utc;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

/// Owns all reads-then-writes of balance and history as one unit, so partial
/// updates cannot interleave. `&mut self` enforces the single-writer model;
/// callers sharing an engine across tasks must serialize submissions
/// themselves (e.g. behind a mutex).
pub struct RoundEngine<D> {
    ledger: BalanceLedger,
    history: HistoryLog,
    resolver: OutcomeResolver<D>,
}

impl RoundEngine<RngDraw<StdRng>> {
    /// Open an engine over the given store with an entropy-seeded resolver,
    /// seeding the balance with `starting_balance` on first use.
    pub fn open(store: GameStore, starting_balance: u64) -> Result<Self, WagerError> {
        let ledger = BalanceLedger::open(store.clone(), starting_balance)?;
        let history = HistoryLog::open(store)?;
        Ok(Self::new(ledger, history, OutcomeResolver::from_entropy()))
    }
}

impl<D: DrawSource> RoundEngine<D> {
    pub fn new(ledger: BalanceLedger, history: HistoryLog, resolver: OutcomeResolver<D>) -> Self {
        Self {
            ledger,
            history,
            resolver,
        }
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    /// Recorded rounds, most-recent-last.
    pub fn history(&self) -> &[RoundResult] {
        self.history.recent()
    }

    /// Run one round: validate the stake, resolve the draw, apply the payoff
    /// to the ledger, and record the result in history.
    ///
    /// Validation failures return before any mutation. Once resolution has
    /// happened, ledger and history updates form one logical unit: a failure
    /// in either is fatal for the round and surfaced as
    /// `LedgerCorruption`/`Persistence`, never dropped, since balance and
    /// history must not diverge from the set of resolved rounds.
    pub fn submit_wager(&mut self, chosen: Category, stake: i64) -> Result<RoundResult, WagerError> {
        let balance = self.ledger.balance();
        let stake = match validator::validate(stake, balance) {
            Ok(stake) => stake,
            Err(err) => {
                debug!(%chosen, stake, balance, %err, "wager rejected");
                return Err(err);
            }
        };
        let wager = Wager {
            category: chosen,
            stake,
        };

        let outcome = self.resolver.resolve(wager.category, wager.stake);
        let new_balance = self.ledger.apply_delta(outcome.points_delta).map_err(|err| {
            error!(%chosen, stake, delta = outcome.points_delta, %err, "failed to apply round payoff");
            err
        })?;

        let result = RoundResult {
            chosen: wager.category,
            stake: wager.stake,
            resolved: outcome.resolved,
            points_delta: outcome.points_delta,
            timestamp_ms: Utc::now().timestamp_millis(),
        };
        self.history.append(result.clone()).map_err(|err| {
            error!(%chosen, stake, %err, "failed to record resolved round");
            err
        })?;

        info!(
            %chosen,
            stake,
            resolved = %result.resolved,
            points_delta = result.points_delta,
            new_balance,
            "round resolved"
        );
        Ok(result)
    }

    /// Submit a wager from raw stake input (the dialog-string entry point);
    /// non-numeric input fails with `InvalidFormat` before anything else runs.
    pub fn submit_wager_input(
        &mut self,
        chosen: Category,
        raw_stake: &str,
    ) -> Result<RoundResult, WagerError> {
        let stake = validator::parse_stake(raw_stake)?;
        self.submit_wager(chosen, stake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_CAP;
    use tempfile::TempDir;

    /// Draw source replaying a fixed sequence, then repeating the last entry.
    struct ScriptedDraw {
        script: Vec<Category>,
        next: usize,
    }

    impl ScriptedDraw {
        fn new(script: Vec<Category>) -> Self {
            Self { script, next: 0 }
        }
    }

    impl DrawSource for ScriptedDraw {
        fn draw(&mut self) -> Category {
            let category = self.script[self.next.min(self.script.len() - 1)];
            self.next += 1;
            category
        }
    }

    fn scripted_engine(
        dir: &TempDir,
        starting_balance: u64,
        script: Vec<Category>,
    ) -> RoundEngine<ScriptedDraw> {
        let store = GameStore::open(dir.path()).unwrap();
        let ledger = BalanceLedger::open(store.clone(), starting_balance).unwrap();
        let history = HistoryLog::open(store).unwrap();
        RoundEngine::new(ledger, history, OutcomeResolver::new(ScriptedDraw::new(script)))
    }

    #[test]
    fn test_winning_round_pays_double_stake() {
        let dir = TempDir::new().unwrap();
        let mut engine = scripted_engine(&dir, 1000, vec![Category::Forward]);

        let result = engine.submit_wager(Category::Forward, 100).unwrap();
        assert!(result.is_win());
        assert_eq!(result.points_delta, 200);
        assert_eq!(engine.balance(), 1200);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0], result);
    }

    #[test]
    fn test_losing_round_deducts_stake() {
        let dir = TempDir::new().unwrap();
        let mut engine = scripted_engine(&dir, 1000, vec![Category::Right]);

        let result = engine.submit_wager(Category::Forward, 100).unwrap();
        assert!(!result.is_win());
        assert_eq!(result.points_delta, -100);
        assert_eq!(engine.balance(), 900);
    }

    #[test]
    fn test_full_balance_stake_is_accepted() {
        let dir = TempDir::new().unwrap();
        let mut engine = scripted_engine(&dir, 500, vec![Category::Left]);

        let result = engine.submit_wager(Category::Backward, 500).unwrap();
        assert_eq!(result.points_delta, -500);
        assert_eq!(engine.balance(), 0);
    }

    #[test]
    fn test_invalid_stakes_are_side_effect_free() {
        let dir = TempDir::new().unwrap();
        let mut engine = scripted_engine(&dir, 300, vec![Category::Forward]);

        let cases = [
            (0, WagerError::NonPositiveStake { stake: 0 }),
            (-50, WagerError::NonPositiveStake { stake: -50 }),
            (
                301,
                WagerError::InsufficientBalance {
                    stake: 301,
                    balance: 300,
                },
            ),
        ];
        for (stake, expected) in cases {
            assert_eq!(engine.submit_wager(Category::Forward, stake), Err(expected));
            assert_eq!(engine.balance(), 300);
            assert!(engine.history().is_empty());
        }

        assert_eq!(
            engine.submit_wager_input(Category::Forward, "lots"),
            Err(WagerError::InvalidFormat {
                input: "lots".to_string()
            })
        );
        assert_eq!(engine.balance(), 300);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_history_caps_after_sixteen_rounds() {
        let dir = TempDir::new().unwrap();
        // Always draw Forward; alternate picks so wins and losses both occur.
        let mut engine = scripted_engine(&dir, 10_000, vec![Category::Forward]);

        let mut expected_deltas = Vec::new();
        for round in 1..=16 {
            let chosen = if round % 2 == 0 {
                Category::Forward
            } else {
                Category::Backward
            };
            let result = engine.submit_wager(chosen, round).unwrap();
            expected_deltas.push(result.points_delta);
        }

        assert_eq!(engine.history().len(), HISTORY_CAP);
        // Oldest of the 16 evicted; most recent 15 in chronological order.
        let recorded: Vec<i64> = engine.history().iter().map(|r| r.points_delta).collect();
        assert_eq!(recorded, expected_deltas[1..].to_vec());
        assert_eq!(engine.history()[0].stake, 2);
        assert_eq!(engine.history()[HISTORY_CAP - 1].stake, 16);
    }

    #[test]
    fn test_balance_never_negative_across_random_rounds() {
        let dir = TempDir::new().unwrap();
        let script = vec![
            Category::Forward,
            Category::Left,
            Category::Right,
            Category::Backward,
        ];
        let mut engine = scripted_engine(&dir, 100, script);

        // Stake the full balance repeatedly; on the first loss it hits zero
        // and further wagers are rejected rather than going negative.
        loop {
            let balance = engine.balance();
            if balance == 0 {
                break;
            }
            match engine.submit_wager(Category::Forward, balance as i64) {
                Ok(result) => {
                    assert_eq!(
                        engine.balance() as i64,
                        balance as i64 + result.points_delta
                    );
                }
                Err(err) => panic!("valid wager rejected: {}", err),
            }
        }
        assert_eq!(
            engine.submit_wager(Category::Forward, 1),
            Err(WagerError::InsufficientBalance {
                stake: 1,
                balance: 0
            })
        );
    }
}
