//! Stage Taxonomy — Enums for game elements
//!
//! These enums classify the game elements shared between the engine and the
//! presentation layer: prize kinds, player and ticket identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Player identifier. Player 0 is the human player; higher ids are
/// simulated opponents.
pub type PlayerId = u16;

/// The human player's id.
pub const HUMAN_PLAYER: PlayerId = 0;

/// Ticket identifier, scoped to (player, sequence-within-player).
///
/// Renders as `"<player>-<seq>"`, e.g. `"0-1"` for the human player's first
/// ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId {
    /// Owning player
    pub player: PlayerId,
    /// 1-based sequence within the player's tickets
    pub seq: u16,
}

impl TicketId {
    pub fn new(player: PlayerId, seq: u16) -> Self {
        Self { player, seq }
    }

    /// Does this ticket belong to the human player?
    pub fn is_human(&self) -> bool {
        self.player == HUMAN_PLAYER
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.player, self.seq)
    }
}

/// Prize classification
///
/// Two prizes per round:
/// - FullHouse: first ticket to mark all of its numbers
/// - TotalScore: ticket at exactly 100 (or closest) when the round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeKind {
    FullHouse,
    TotalScore,
}

impl PrizeKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FullHouse => "FULL HOUSE",
            Self::TotalScore => "TOTAL SCORE",
        }
    }

    /// Get a simple string name for this prize kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::FullHouse => "full_house",
            Self::TotalScore => "total_score",
        }
    }
}

/// Error for unrecognized prize kind names
#[derive(Debug, thiserror::Error)]
#[error("unknown prize kind: {0}")]
pub struct UnknownPrize(pub String);

impl FromStr for PrizeKind {
    type Err = UnknownPrize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full_house" | "fullhouse" => Ok(Self::FullHouse),
            "total_score" | "totalscore" => Ok(Self::TotalScore),
            other => Err(UnknownPrize(other.to_string())),
        }
    }
}
