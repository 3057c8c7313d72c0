//! Prize resolution
//!
//! The Full House prize goes to the first ticket to mark all of its numbers
//! (detected by the call engine). The Total Score prize is resolved here:
//! a ticket at exactly 100 wins outright, otherwise the highest score does,
//! with ties broken by ticket creation order.

use serde::{Deserialize, Serialize};

use bf_stage::TicketId;

use crate::score::TARGET_SCORE;
use crate::ticket::Ticket;

/// A ticket's standing in the race to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStanding {
    pub ticket_id: TicketId,
    pub score: u8,
    /// Score is exactly the target
    pub exact: bool,
}

/// Pick the closest-to-100 ticket among the given tickets, in iteration
/// order. Returns `None` for an empty collection.
pub fn closest_to_target<'a, I>(tickets: I) -> Option<ScoreStanding>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut best: Option<ScoreStanding> = None;
    for ticket in tickets {
        if ticket.score() == TARGET_SCORE {
            return Some(ScoreStanding {
                ticket_id: ticket.id,
                score: ticket.score(),
                exact: true,
            });
        }
        let beats = best.map(|b| ticket.score() > b.score).unwrap_or(true);
        if beats {
            best = Some(ScoreStanding {
                ticket_id: ticket.id,
                score: ticket.score(),
                exact: false,
            });
        }
    }
    best
}

/// Resolve the Total Score prize across all tickets. Invoked once, on Full
/// House detection; an empty ticket collection yields no winner.
pub fn resolve_total_score(tickets: &[Ticket]) -> Option<ScoreStanding> {
    closest_to_target(tickets)
}
