//! Draw result and stage event generation

use serde::{Deserialize, Serialize};

use bf_stage::{PrizeKind, Stage, StageEvent, StagePayload, TicketId};

use crate::config::RtpAmounts;
use crate::prize::ScoreStanding;
use crate::score::ScoreChange;
use crate::timing::TimestampGenerator;

/// Complete result of a single draw with all ticket effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResult {
    /// 1-based index of this call within the round
    pub call_index: u8,
    /// The drawn number
    pub number: u8,
    /// Numbers left in the pool after this draw
    pub pool_remaining: u8,
    /// Effects on tickets carrying the number, in ticket order
    pub ticket_updates: Vec<TicketUpdate>,
    /// Ticket that completed on this draw, if any
    pub full_house: Option<TicketId>,
    /// Total Score prize standing, resolved when a Full House occurred
    pub total_score: Option<ScoreStanding>,
    /// Human player's closest-to-100 indicator after this draw
    pub closest: Option<ScoreStanding>,
}

/// Mark and score effect on one ticket
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub ticket_id: TicketId,
    /// Marked cells on the ticket after this draw
    pub marked_count: u8,
    /// Score transition produced by this draw
    pub score_change: ScoreChange,
}

impl DrawResult {
    /// Did this draw end the round with a Full House?
    pub fn is_winning_draw(&self) -> bool {
        self.full_house.is_some()
    }

    /// Did any ticket match the number?
    pub fn marked_any(&self) -> bool {
        !self.ticket_updates.is_empty()
    }

    /// Generate all stage events for this draw
    pub fn generate_stages(
        &self,
        timing: &mut TimestampGenerator,
        rtp: &RtpAmounts,
    ) -> Vec<StageEvent> {
        let mut events = Vec::new();

        // 1. Call start — the suspense window opens
        events.push(StageEvent::new(
            Stage::CallStart {
                call_index: self.call_index,
            },
            timing.current(),
        ));

        // 2. Number reveal after the suspense delay
        events.push(StageEvent::with_payload(
            Stage::NumberCalled {
                number: self.number,
                call_index: self.call_index,
            },
            timing.reveal(),
            StagePayload::new()
                .number(self.number)
                .call_index(self.call_index),
        ));

        // 3. Per-ticket marks and score transitions, in ticket order
        for update in &self.ticket_updates {
            events.push(StageEvent::with_payload(
                Stage::TicketMarked {
                    ticket_id: update.ticket_id,
                    number: self.number,
                    marked_count: update.marked_count,
                },
                timing.mark(),
                StagePayload::with_ticket(update.ticket_id)
                    .number(self.number)
                    .marked_count(update.marked_count),
            ));

            let change = update.score_change;
            if change.wrapped {
                events.push(StageEvent::with_payload(
                    Stage::ScoreOverflow {
                        ticket_id: update.ticket_id,
                        from: change.from,
                        via: change.overflow_total(self.number),
                    },
                    timing.mark(),
                    StagePayload::with_ticket(update.ticket_id).score(change.to),
                ));
                // The bar rides through 100 before snapping back; later
                // events land after the choreography completes.
                timing.overflow();
            } else {
                events.push(StageEvent::with_payload(
                    Stage::ScoreChanged {
                        ticket_id: update.ticket_id,
                        from: change.from,
                        to: change.to,
                    },
                    timing.mark(),
                    StagePayload::with_ticket(update.ticket_id).score(change.to),
                ));
            }
        }

        // 4. Closest-to-100 indicator for the human player
        if let Some(closest) = self.closest {
            events.push(StageEvent::with_payload(
                Stage::ClosestToTarget {
                    ticket_id: closest.ticket_id,
                    score: closest.score,
                    exact: closest.exact,
                },
                timing.mark(),
                StagePayload::with_ticket(closest.ticket_id).score(closest.score),
            ));
        }

        // 5. Prize stages when the round ended on this draw
        if let Some(winner) = self.full_house {
            events.push(StageEvent::with_payload(
                Stage::FullHouseWon { ticket_id: winner },
                timing.prize_reveal(),
                StagePayload::with_ticket(winner).prize_amount(rtp.full_house),
            ));

            if let Some(standing) = self.total_score {
                events.push(StageEvent::with_payload(
                    Stage::TotalScoreResolved {
                        ticket_id: standing.ticket_id,
                        score: standing.score,
                    },
                    timing.prize_reveal(),
                    StagePayload::with_ticket(standing.ticket_id).score(standing.score),
                ));
            }

            events.push(StageEvent::with_payload(
                Stage::PrizePresent {
                    prize: PrizeKind::FullHouse,
                    amount: rtp.full_house,
                },
                timing.prize_reveal(),
                StagePayload::new().prize_amount(rtp.full_house),
            ));
            events.push(StageEvent::with_payload(
                Stage::PrizePresent {
                    prize: PrizeKind::TotalScore,
                    amount: rtp.total_score,
                },
                timing.prize_reveal(),
                StagePayload::new().prize_amount(rtp.total_score),
            ));

            events.push(StageEvent::new(Stage::RoundEnd, timing.advance(100.0)));
        } else if self.pool_remaining == 0 {
            // Every number has been called without a Full House
            events.push(StageEvent::new(Stage::PoolExhausted, timing.advance(100.0)));
            events.push(StageEvent::new(Stage::RoundEnd, timing.advance(100.0)));
        }

        // Sort events by timestamp to ensure correct playback order
        events.sort_by(|a, b| {
            a.timestamp_ms
                .partial_cmp(&b.timestamp_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimingConfig;

    fn update(player: u16, seq: u16, marked: u8, from: u8, to: u8, wrapped: bool) -> TicketUpdate {
        TicketUpdate {
            ticket_id: TicketId::new(player, seq),
            marked_count: marked,
            score_change: ScoreChange { from, to, wrapped },
        }
    }

    fn rtp() -> RtpAmounts {
        RtpAmounts {
            base: 0.80,
            full_house: 0.24,
            total_score: 0.44,
        }
    }

    #[test]
    fn test_draw_stages_ordering() {
        let result = DrawResult {
            call_index: 5,
            number: 42,
            pool_remaining: 95,
            ticket_updates: vec![update(0, 1, 3, 30, 72, false)],
            full_house: None,
            total_score: None,
            closest: Some(ScoreStanding {
                ticket_id: TicketId::new(0, 1),
                score: 72,
                exact: false,
            }),
        };

        let mut timing = TimestampGenerator::new(TimingConfig::studio());
        let stages = result.generate_stages(&mut timing, &rtp());

        assert!(matches!(stages[0].stage, Stage::CallStart { call_index: 5 }));
        assert!(matches!(stages[1].stage, Stage::NumberCalled { number: 42, .. }));

        // Sorted by timestamp
        let mut prev = 0.0;
        for event in &stages {
            assert!(event.timestamp_ms >= prev);
            prev = event.timestamp_ms;
        }

        // No round-end stages on an ordinary draw
        assert!(stages.iter().all(|e| e.stage != Stage::RoundEnd));
    }

    #[test]
    fn test_overflow_emits_score_overflow_stage() {
        let result = DrawResult {
            call_index: 9,
            number: 20,
            pool_remaining: 91,
            ticket_updates: vec![update(1, 1, 4, 95, 0, true)],
            full_house: None,
            total_score: None,
            closest: None,
        };

        let mut timing = TimestampGenerator::new(TimingConfig::studio());
        let stages = result.generate_stages(&mut timing, &rtp());

        let overflow = stages
            .iter()
            .find(|e| matches!(e.stage, Stage::ScoreOverflow { .. }))
            .expect("wrap must surface as ScoreOverflow");
        assert!(matches!(
            overflow.stage,
            Stage::ScoreOverflow { from: 95, via: 115, .. }
        ));
        assert!(stages.iter().all(|e| !matches!(e.stage, Stage::ScoreChanged { .. })));
    }

    #[test]
    fn test_winning_draw_stages() {
        let winner = TicketId::new(0, 1);
        let result = DrawResult {
            call_index: 10,
            number: 89,
            pool_remaining: 90,
            ticket_updates: vec![update(0, 1, 10, 40, 0, true)],
            full_house: Some(winner),
            total_score: Some(ScoreStanding {
                ticket_id: TicketId::new(1, 1),
                score: 95,
                exact: false,
            }),
            closest: None,
        };

        let mut timing = TimestampGenerator::new(TimingConfig::studio());
        let stages = result.generate_stages(&mut timing, &rtp());

        assert!(result.is_winning_draw());
        assert!(stages
            .iter()
            .any(|e| matches!(e.stage, Stage::FullHouseWon { ticket_id } if ticket_id == winner)));
        assert!(stages
            .iter()
            .any(|e| matches!(e.stage, Stage::TotalScoreResolved { score: 95, .. })));
        assert_eq!(
            stages
                .iter()
                .filter(|e| matches!(e.stage, Stage::PrizePresent { .. }))
                .count(),
            2
        );
        assert!(matches!(stages.last().unwrap().stage, Stage::RoundEnd));
    }

    #[test]
    fn test_exhaustion_stages() {
        let result = DrawResult {
            call_index: 100,
            number: 3,
            pool_remaining: 0,
            ticket_updates: vec![],
            full_house: None,
            total_score: None,
            closest: None,
        };

        let mut timing = TimestampGenerator::new(TimingConfig::studio());
        let stages = result.generate_stages(&mut timing, &rtp());

        assert!(stages.iter().any(|e| e.stage == Stage::PoolExhausted));
        assert!(matches!(stages.last().unwrap().stage, Stage::RoundEnd));
        // No winner stages on the exhaustion path
        assert!(stages.iter().all(|e| !matches!(e.stage, Stage::TotalScoreResolved { .. })));
    }
}
