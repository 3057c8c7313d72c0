//! Automatic call driver
//!
//! A cancellable repeating schedule over a logical clock. The driver never
//! owns a thread: the host advances it with `poll(now_ms)` and issues one
//! draw per due tick. Stopping the driver immediately prevents any further
//! scheduled draw; a draw already pending in the engine is covered by the
//! engine's own stale-call guard.

use serde::{Deserialize, Serialize};

use bf_stage::{Stage, StageEvent};

use crate::timing::TimingConfig;

/// Repeating auto-call schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoCaller {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl AutoCaller {
    /// Create an inactive driver with the given interval
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            next_due_ms: None,
        }
    }

    /// Create from a timing config's call cadence
    pub fn from_timing(config: &TimingConfig) -> Self {
        Self::new(config.call_interval_ms)
    }

    /// Interval between scheduled calls (ms)
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Is a schedule active?
    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Activate the schedule. Starting while already active is a no-op and
    /// returns false, so overlapping schedules cannot exist.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.is_active() {
            return false;
        }
        self.next_due_ms = Some(now_ms + self.interval_ms);
        true
    }

    /// Cancel the schedule; no further ticks become due
    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    /// Advance the schedule to `now_ms` and return how many draws are due
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let mut due = 0u32;
        while let Some(next) = self.next_due_ms {
            if next > now_ms {
                break;
            }
            due += 1;
            self.next_due_ms = Some(next + self.interval_ms);
        }
        due
    }

    /// Stage event announcing the schedule starting
    pub fn start_event(&self, timestamp_ms: f64) -> StageEvent {
        StageEvent::new(
            Stage::AutoCallStart {
                interval_ms: self.interval_ms,
            },
            timestamp_ms,
        )
    }

    /// Stage event announcing the schedule stopping
    pub fn stop_event(&self, timestamp_ms: f64, reason: Option<String>) -> StageEvent {
        StageEvent::new(Stage::AutoCallStop { reason }, timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BingoEngine, CallOutcome, RoundPhase};

    #[test]
    fn test_double_start_is_noop() {
        let mut auto = AutoCaller::new(3000.0);
        assert!(auto.start(0.0));
        assert!(!auto.start(1000.0), "second start must be a no-op");

        // The original schedule is untouched: first tick at 3000, not 4000
        assert_eq!(auto.poll(3000.0), 1);
    }

    #[test]
    fn test_ticks_accumulate_per_interval() {
        let mut auto = AutoCaller::new(1000.0);
        auto.start(0.0);

        assert_eq!(auto.poll(999.0), 0);
        assert_eq!(auto.poll(1000.0), 1);
        assert_eq!(auto.poll(4500.0), 3);
        assert_eq!(auto.poll(4500.0), 0);
    }

    #[test]
    fn test_stop_cancels_immediately() {
        let mut auto = AutoCaller::new(500.0);
        auto.start(0.0);
        auto.stop();

        assert!(!auto.is_active());
        assert_eq!(auto.poll(10_000.0), 0, "no tick may fire after stop");

        // Restart works from scratch
        assert!(auto.start(10_000.0));
        assert_eq!(auto.poll(10_500.0), 1);
    }

    #[test]
    fn test_drives_engine_to_round_end() {
        let mut engine = BingoEngine::new();
        engine.seed(55);
        engine.start();

        let mut auto = AutoCaller::from_timing(engine.timing_config());
        auto.start(0.0);

        let mut now = 0.0;
        while engine.running() {
            now += auto.interval_ms();
            for _ in 0..auto.poll(now) {
                if !engine.running() {
                    break;
                }
                engine.call_next();
            }
        }

        assert_eq!(engine.phase(), RoundPhase::Ended);
        assert!(engine.full_house_winner().is_some());
        auto.stop();
        assert_eq!(auto.poll(now + 60_000.0), 0);
    }

    #[test]
    fn test_pending_draw_discarded_when_host_resets() {
        let mut engine = BingoEngine::new();
        engine.seed(14);
        engine.start();

        let mut auto = AutoCaller::new(3000.0);
        auto.start(0.0);

        // A tick fires and the host defers the apply for suspense
        assert_eq!(auto.poll(3000.0), 1);
        let pending = engine.draw().unwrap();

        // The player resets before the deferred apply runs
        auto.stop();
        engine.reset();
        assert!(matches!(engine.apply(pending), CallOutcome::Stale));
    }

    #[test]
    fn test_stage_events() {
        let auto = AutoCaller::new(3000.0);
        let start = auto.start_event(0.0);
        assert!(matches!(start.stage, Stage::AutoCallStart { interval_ms } if interval_ms == 3000.0));

        let stop = auto.stop_event(1234.0, Some("round ended".into()));
        assert!(matches!(stop.stage, Stage::AutoCallStop { .. }));
    }
}
