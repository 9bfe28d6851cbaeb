//! Burst coalescing engine
//!
//! Folds the raw change stream into at most one action invocation per burst.
//! A burst fires once it has gone quiet for the policy's quiet period, or
//! unconditionally once it has been alive past the maximum window, even while
//! events keep arriving.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::event::WatchEvent;
use super::executor::ActionExecutor;

/// Interval between trigger evaluations
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Decides when a pending burst becomes actionable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirePolicy {
    /// Minimum idle time since the last event before a settled burst fires
    pub quiet_period: Duration,
    /// Upper bound on burst age before a forced fire, regardless of idle time
    pub max_window: Duration,
}

impl FirePolicy {
    /// Production policy: 5s quiet period, 60s maximum window
    pub const DEFAULT: FirePolicy = FirePolicy {
        quiet_period: Duration::from_secs(5),
        max_window: Duration::from_secs(60),
    };
}

impl Default for FirePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Timestamps of the current, not-yet-fired burst
///
/// Both fields are unset between bursts and always reset together after a
/// fire. Workers never touch them directly; all mutation goes through the
/// two [`Coalescer`] operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurstState {
    burst_start: Option<Instant>,
    last_event: Option<Instant>,
}

impl BurstState {
    /// Time of the first event in the pending burst, if any
    pub fn burst_start(&self) -> Option<Instant> {
        self.burst_start
    }

    /// Time of the most recent event in the pending burst, if any
    pub fn last_event(&self) -> Option<Instant> {
        self.last_event
    }

    /// True while a burst is waiting to fire
    pub fn is_pending(&self) -> bool {
        self.burst_start.is_some()
    }

    fn record(&mut self, now: Instant) {
        if self.burst_start.is_none() {
            self.burst_start = Some(now);
        }
        self.last_event = Some(now);
    }

    fn reset(&mut self) {
        self.burst_start = None;
        self.last_event = None;
    }

    fn due(&self, now: Instant, policy: &FirePolicy) -> bool {
        let Some(start) = self.burst_start else {
            return false;
        };
        let last = self.last_event.unwrap_or(start);
        let age = now.saturating_duration_since(start);
        let idle = now.saturating_duration_since(last);

        if age < policy.max_window && idle < policy.quiet_period {
            // Events are still landing; give the burst more time to settle.
            return false;
        }
        // Either the burst went quiet, or it outlived the maximum window and
        // fires even while signals keep coming.
        true
    }
}

/// Shared burst state plus the mutual exclusion that serializes event
/// recording against action execution
pub struct Coalescer {
    state: Mutex<BurstState>,
}

impl Coalescer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BurstState::default()),
        }
    }

    /// Record a raw change signal observed at `now`.
    ///
    /// Starts a burst if none is pending, otherwise just advances the
    /// last-event timestamp.
    pub fn record_event(&self, now: Instant) {
        self.lock().record(now);
    }

    /// Evaluate the pending burst at `now` and fire the action if it is due.
    ///
    /// The lock is held across action execution: at most one action runs at
    /// a time, and an event recorded mid-action blocks until the state reset
    /// below, then opens a fresh burst with its own timestamp.
    ///
    /// Returns whether the action was fired.
    pub fn evaluate_and_fire(
        &self,
        now: Instant,
        policy: &FirePolicy,
        executor: &dyn ActionExecutor,
        action: &str,
        callback: &impl Fn(WatchEvent),
    ) -> bool {
        let mut state = self.lock();
        if !state.due(now, policy) {
            return false;
        }

        callback(WatchEvent::ActionFired {
            action: action.to_string(),
        });

        // Action outcomes are reported, never fatal: a failed run just waits
        // for the next burst.
        match executor.run(action) {
            Ok(status) => callback(WatchEvent::ActionComplete { status }),
            Err(e) => callback(WatchEvent::ActionFailed {
                message: e.to_string(),
            }),
        }

        state.reset();
        true
    }

    /// Point-in-time copy of the burst timestamps
    pub fn snapshot(&self) -> BurstState {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, BurstState> {
        // Recover from poisoning; the state is plain data and stays usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Coalescer {
    fn default() -> Self {
        Self::new()
    }
}
