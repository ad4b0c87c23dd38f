//! Session countdown: a pure one-second state machine plus an async driver.
//!
//! The timer gates whether presentation offers new wagers; it has no coupling
//! to the round engine. `Expired` is terminal, and cancellation stops future
//! ticks from any state without error.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Countdown state. `Running(n)` holds the remaining whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running(u64),
    Expired,
}

impl TimerState {
    /// Initial state for a session of the given duration. A zero duration is
    /// expired from the start.
    pub fn new(duration: Duration) -> Self {
        match duration.as_secs() {
            0 => TimerState::Expired,
            secs => TimerState::Running(secs),
        }
    }

    /// Advance one second. Decrements while running, transitions to `Expired`
    /// when the final second elapses, and is a no-op once expired, so the
    /// count never goes below zero.
    pub fn tick(&mut self) {
        match self {
            TimerState::Running(n) if *n > 1 => *n -= 1,
            TimerState::Running(_) => *self = TimerState::Expired,
            TimerState::Expired => {}
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        match self {
            TimerState::Running(n) => *n,
            TimerState::Expired => 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TimerState::Expired)
    }
}

/// Handle to a running session countdown.
///
/// Ticks once per second on a background task and publishes state via a watch
/// channel. The task stops on its own at `Expired`; `cancel` (or dropping the
/// handle) stops it early from any state.
pub struct RoundTimer {
    state_rx: watch::Receiver<TimerState>,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl RoundTimer {
    pub fn start(duration: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(TimerState::new(duration));
        let shutdown = Arc::new(Notify::new());
        let task_shutdown = Arc::clone(&shutdown);

        let task = tokio::spawn(async move {
            // First tick one full period from now, not immediately.
            let mut ticker = time::interval_at(time::Instant::now() + TICK_PERIOD, TICK_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = task_shutdown.notified() => {
                        debug!("session timer cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let mut expired = false;
                        state_tx.send_modify(|state| {
                            state.tick();
                            expired = state.is_expired();
                        });
                        if expired {
                            debug!("session timer expired");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            state_rx,
            shutdown,
            task,
        }
    }

    pub fn state(&self) -> TimerState {
        *self.state_rx.borrow()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state().remaining_seconds()
    }

    pub fn is_expired(&self) -> bool {
        self.state().is_expired()
    }

    /// Watch the countdown, e.g. `rx.wait_for(|s| s.is_expired())`.
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.state_rx.clone()
    }

    /// Stop the countdown. Safe to call from any state, including after
    /// expiry; no tick fires once the task has observed the cancellation.
    pub fn cancel(&self) {
        self.shutdown.notify_one();
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        // Tearing down the session must leak no running ticks.
        self.task.abort();
    }
}
