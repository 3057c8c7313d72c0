//! Timing profiles for stage event generation
//!
//! The engine's state transition is atomic per draw; these profiles only
//! describe the presentation timeline laid over it (call cadence, suspense
//! delay, overflow choreography).

use serde::{Deserialize, Serialize};

/// Timing profile for stage events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingProfile {
    /// Normal gameplay timing
    Normal,
    /// Fast mode
    Turbo,
    /// Studio mode (near-instant, for testing)
    Studio,
    /// Custom timing multiplier
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Detailed timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Interval between automatic calls (ms)
    pub call_interval_ms: f64,

    /// Suspense delay between a call starting and the number reveal (ms)
    pub reveal_delay_ms: f64,

    /// Delay between per-ticket mark/score updates (ms)
    pub mark_interval_ms: f64,

    /// Overflow choreography: slow fill to 100 (ms)
    pub overflow_fill_ms: f64,

    /// Overflow choreography: pulse at 100 (ms)
    pub overflow_pulse_ms: f64,

    /// Overflow choreography: reset message hold (ms)
    pub overflow_message_ms: f64,

    /// Delay before prize presentation (ms)
    pub prize_reveal_delay_ms: f64,

    /// Minimum time between stage events (ms)
    pub min_event_interval_ms: f64,
}

impl TimingConfig {
    /// Normal gameplay timing (3 s auto-call cadence)
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            call_interval_ms: 3000.0,
            reveal_delay_ms: 600.0,
            mark_interval_ms: 150.0,
            overflow_fill_ms: 800.0,
            overflow_pulse_ms: 800.0,
            overflow_message_ms: 1200.0,
            prize_reveal_delay_ms: 1000.0,
            min_event_interval_ms: 50.0,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            call_interval_ms: 1000.0,
            reveal_delay_ms: 250.0,
            mark_interval_ms: 50.0,
            overflow_fill_ms: 300.0,
            overflow_pulse_ms: 300.0,
            overflow_message_ms: 400.0,
            prize_reveal_delay_ms: 400.0,
            min_event_interval_ms: 25.0,
        }
    }

    /// Studio mode (near-instant for automated testing)
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            call_interval_ms: 100.0,
            reveal_delay_ms: 20.0,
            mark_interval_ms: 10.0,
            overflow_fill_ms: 20.0,
            overflow_pulse_ms: 20.0,
            overflow_message_ms: 20.0,
            prize_reveal_delay_ms: 20.0,
            min_event_interval_ms: 10.0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            call_interval_ms: self.call_interval_ms * factor,
            reveal_delay_ms: self.reveal_delay_ms * factor,
            mark_interval_ms: self.mark_interval_ms * factor,
            overflow_fill_ms: self.overflow_fill_ms * factor,
            overflow_pulse_ms: self.overflow_pulse_ms * factor,
            overflow_message_ms: self.overflow_message_ms * factor,
            prize_reveal_delay_ms: self.prize_reveal_delay_ms * factor,
            min_event_interval_ms: self.min_event_interval_ms * factor,
        }
    }

    /// Full overflow choreography duration (fill + pulse + message)
    pub fn overflow_total_ms(&self) -> f64 {
        self.overflow_fill_ms + self.overflow_pulse_ms + self.overflow_message_ms
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

/// Timestamp generator for sequential events
#[derive(Debug, Clone)]
pub struct TimestampGenerator {
    current_ms: f64,
    config: TimingConfig,
}

impl TimestampGenerator {
    /// Create new generator
    pub fn new(config: TimingConfig) -> Self {
        Self {
            current_ms: 0.0,
            config,
        }
    }

    /// Reset to zero
    pub fn reset(&mut self) {
        self.current_ms = 0.0;
    }

    /// Get current timestamp
    pub fn current(&self) -> f64 {
        self.current_ms
    }

    /// Advance by duration and return new timestamp
    pub fn advance(&mut self, duration_ms: f64) -> f64 {
        self.current_ms += duration_ms.max(self.config.min_event_interval_ms);
        self.current_ms
    }

    /// Timestamp for the suspense reveal after a call starts
    pub fn reveal(&mut self) -> f64 {
        self.advance(self.config.reveal_delay_ms)
    }

    /// Advance for the next per-ticket update
    pub fn mark(&mut self) -> f64 {
        self.advance(self.config.mark_interval_ms)
    }

    /// Advance for the full overflow choreography
    pub fn overflow(&mut self) -> f64 {
        self.advance(self.config.overflow_total_ms())
    }

    /// Advance for prize presentation
    pub fn prize_reveal(&mut self) -> f64 {
        self.advance(self.config.prize_reveal_delay_ms)
    }

    /// Get timing config reference
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_profiles() {
        let normal = TimingConfig::normal();
        let turbo = TimingConfig::turbo();
        let studio = TimingConfig::studio();

        assert!(turbo.call_interval_ms < normal.call_interval_ms);
        assert!(studio.call_interval_ms < turbo.call_interval_ms);
        assert!(turbo.reveal_delay_ms < normal.reveal_delay_ms);
    }

    #[test]
    fn test_overflow_choreography_duration() {
        let normal = TimingConfig::normal();
        // 800 fill + 800 pulse + 1200 message
        assert_eq!(normal.overflow_total_ms(), 2800.0);
    }

    #[test]
    fn test_timestamp_generator_advances() {
        let mut ts_gen = TimestampGenerator::new(TimingConfig::studio());
        assert_eq!(ts_gen.current(), 0.0);

        let t1 = ts_gen.reveal();
        assert!(t1 > 0.0);

        let t2 = ts_gen.mark();
        assert!(t2 > t1);
    }

    #[test]
    fn test_min_event_interval_enforced() {
        let mut ts_gen = TimestampGenerator::new(TimingConfig::normal());
        let t1 = ts_gen.advance(0.0);
        assert_eq!(t1, 50.0);
    }

    #[test]
    fn test_scaled() {
        let half = TimingConfig::normal().scaled(0.5);
        assert_eq!(half.profile, TimingProfile::Custom);
        assert_eq!(half.call_interval_ms, 1500.0);
    }
}
