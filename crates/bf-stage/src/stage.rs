//! Stage — The core enum defining all canonical game phases
//!
//! A Stage is NOT an animation, NOT a DOM update.
//! A Stage is the SEMANTIC MEANING of a moment in the round flow.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{PrizeKind, TicketId};

/// Canonical game stage — the universal language of bingo round flow
///
/// Every presentation surface (DOM renderer, speech announcer, animation
/// layer) responds to stages, never to raw engine internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // ROUND LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Round started, tickets dealt, pool shuffled
    RoundStart {
        /// Total tickets across all players
        ticket_count: u16,
        /// Players in the round (human + opponents)
        player_count: u16,
    },

    /// Every number in the pool has been called
    PoolExhausted,

    /// Round complete, no further draws accepted
    RoundEnd,

    // ═══════════════════════════════════════════════════════════════════════
    // CALL LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// A draw has been initiated; the suspense window begins
    CallStart {
        /// 1-based index of this call within the round
        call_index: u8,
    },

    /// The drawn number is revealed
    NumberCalled {
        /// The called number (1-100)
        number: u8,
        /// 1-based index of this call within the round
        call_index: u8,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // TICKET PROGRESS
    // ═══════════════════════════════════════════════════════════════════════
    /// A ticket matched the called number
    TicketMarked {
        ticket_id: TicketId,
        /// The number that was marked
        number: u8,
        /// Marked cells on this ticket after the mark
        marked_count: u8,
    },

    /// A ticket's running score advanced without wrapping
    ScoreChanged {
        ticket_id: TicketId,
        from: u8,
        to: u8,
    },

    /// A ticket's running score passed 100 and reset to 0
    ///
    /// `via` is the uncapped sum; presentation rides the bar through 100
    /// before snapping back.
    ScoreOverflow {
        ticket_id: TicketId,
        from: u8,
        via: u16,
    },

    /// Human player's closest-to-100 indicator, refreshed after every draw
    ClosestToTarget {
        ticket_id: TicketId,
        score: u8,
        /// Score is exactly 100
        exact: bool,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // PRIZES
    // ═══════════════════════════════════════════════════════════════════════
    /// A ticket marked all of its numbers
    FullHouseWon { ticket_id: TicketId },

    /// Secondary prize resolved against all tickets' scores
    TotalScoreResolved {
        ticket_id: TicketId,
        score: u8,
    },

    /// Prize amount presented to the winner
    PrizePresent {
        prize: PrizeKind,
        amount: f64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // AUTO CALL
    // ═══════════════════════════════════════════════════════════════════════
    /// Automatic calling started
    AutoCallStart {
        /// Interval between calls (ms)
        interval_ms: f64,
    },

    /// Automatic calling stopped
    AutoCallStop {
        /// Reason for stopping
        #[serde(default)]
        reason: Option<String>,
    },
}

impl Stage {
    /// Get the stage category for grouping
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::RoundStart { .. } | Stage::PoolExhausted | Stage::RoundEnd => {
                StageCategory::RoundLifecycle
            }

            Stage::CallStart { .. } | Stage::NumberCalled { .. } => StageCategory::CallLifecycle,

            Stage::TicketMarked { .. }
            | Stage::ScoreChanged { .. }
            | Stage::ScoreOverflow { .. }
            | Stage::ClosestToTarget { .. } => StageCategory::TicketProgress,

            Stage::FullHouseWon { .. }
            | Stage::TotalScoreResolved { .. }
            | Stage::PrizePresent { .. } => StageCategory::Prize,

            Stage::AutoCallStart { .. } | Stage::AutoCallStop { .. } => StageCategory::AutoCall,
        }
    }

    /// Get a simple string name for this stage type
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::RoundStart { .. } => "round_start",
            Stage::PoolExhausted => "pool_exhausted",
            Stage::RoundEnd => "round_end",
            Stage::CallStart { .. } => "call_start",
            Stage::NumberCalled { .. } => "number_called",
            Stage::TicketMarked { .. } => "ticket_marked",
            Stage::ScoreChanged { .. } => "score_changed",
            Stage::ScoreOverflow { .. } => "score_overflow",
            Stage::ClosestToTarget { .. } => "closest_to_target",
            Stage::FullHouseWon { .. } => "full_house_won",
            Stage::TotalScoreResolved { .. } => "total_score_resolved",
            Stage::PrizePresent { .. } => "prize_present",
            Stage::AutoCallStart { .. } => "auto_call_start",
            Stage::AutoCallStop { .. } => "auto_call_stop",
        }
    }

    /// Check if a speech/announcement layer should voice this stage
    pub fn is_announced(&self) -> bool {
        matches!(
            self,
            Stage::NumberCalled { .. }
                | Stage::FullHouseWon { .. }
                | Stage::TotalScoreResolved { .. }
                | Stage::PrizePresent { .. }
        )
    }

    /// Get all valid stage type names for validation
    pub fn all_type_names() -> &'static [&'static str] {
        &[
            "round_start",
            "pool_exhausted",
            "round_end",
            "call_start",
            "number_called",
            "ticket_marked",
            "score_changed",
            "score_overflow",
            "closest_to_target",
            "full_house_won",
            "total_score_resolved",
            "prize_present",
            "auto_call_start",
            "auto_call_stop",
        ]
    }

    /// Check if a type name is valid
    pub fn is_valid_type_name(name: &str) -> bool {
        Self::all_type_names().contains(&name.to_lowercase().as_str())
    }
}

/// Stage category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    RoundLifecycle,
    CallLifecycle,
    TicketProgress,
    Prize,
    AutoCall,
}

impl StageCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::RoundLifecycle => "Round Lifecycle",
            Self::CallLifecycle => "Call Lifecycle",
            Self::TicketProgress => "Ticket Progress",
            Self::Prize => "Prizes",
            Self::AutoCall => "Auto Call",
        }
    }
}
