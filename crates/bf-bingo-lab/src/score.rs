//! Wrapping score accumulator for the Total Score prize
//!
//! Every marked number adds its face value to the ticket's running score.
//! A sum above 100 wraps the score back to 0; exactly 100 holds and is the
//! best possible value for the secondary prize.

use serde::{Deserialize, Serialize};

/// The score every ticket is chasing.
pub const TARGET_SCORE: u8 = 100;

/// One score transition, as observed by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreChange {
    /// Score before the called number was applied
    pub from: u8,
    /// Stored score afterwards; 0 when the sum wrapped
    pub to: u8,
    /// The sum passed 100 and the score reset
    pub wrapped: bool,
}

impl ScoreChange {
    /// Uncapped sum the bar rides through before a wrap snaps it back
    pub fn overflow_total(&self, called: u8) -> u16 {
        self.from as u16 + called as u16
    }
}

/// Apply a called number to a running score.
///
/// The stored value becomes 0 immediately on overflow; rendering the
/// transition through 100 is the presentation layer's concern.
pub fn apply(score: u8, called: u8) -> ScoreChange {
    let sum = score as u16 + called as u16;
    if sum > TARGET_SCORE as u16 {
        ScoreChange {
            from: score,
            to: 0,
            wrapped: true,
        }
    } else {
        ScoreChange {
            from: score,
            to: sum as u8,
            wrapped: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_below_target() {
        let change = apply(40, 25);
        assert_eq!(change.to, 65);
        assert!(!change.wrapped);
    }

    #[test]
    fn test_exact_target_holds() {
        // 95 + 5 = 100 stays, not wrapped
        let change = apply(95, 5);
        assert_eq!(change.to, 100);
        assert!(!change.wrapped);
    }

    #[test]
    fn test_overflow_wraps_to_zero() {
        // 95 + 6 = 101 > 100 resets
        let change = apply(95, 6);
        assert_eq!(change.from, 95);
        assert_eq!(change.to, 0);
        assert!(change.wrapped);
        assert_eq!(change.overflow_total(6), 101);
    }

    #[test]
    fn test_wrap_from_target() {
        // Any call on a ticket already at 100 wraps
        let change = apply(100, 1);
        assert_eq!(change.to, 0);
        assert!(change.wrapped);
    }

    #[test]
    fn test_score_stays_in_range() {
        for score in 0..=TARGET_SCORE {
            for called in 1..=100u8 {
                let change = apply(score, called);
                assert!(change.to <= TARGET_SCORE);
            }
        }
    }
}
