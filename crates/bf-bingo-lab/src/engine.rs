//! Synthetic Bingo Engine — Core simulation logic

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use bf_stage::{Stage, StageEvent, TicketId};

use crate::config::{BingoConfig, ConfigError, RtpAmounts, MAX_NUMBER};
use crate::draw::{DrawResult, TicketUpdate};
use crate::prize::{self, ScoreStanding};
use crate::scenario::{RoundScript, ScenarioError};
use crate::score;
use crate::ticket::Ticket;
use crate::timing::{TimestampGenerator, TimingConfig, TimingProfile};

/// How many recent calls the presentation layer shows (current + 3 previous).
pub const RECENT_CALLS: usize = 4;

/// Round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    NotStarted,
    Running,
    Ended,
}

/// A drawn number whose effects have not been applied yet.
///
/// The draw/apply split lets a host delay the visible application of marks
/// for suspense; a pending call from a round that has since been reset or
/// ended is discarded on apply.
#[derive(Debug, Clone, Copy)]
pub struct PendingCall {
    /// The drawn number
    pub number: u8,
    /// 1-based index of this call within the round
    pub call_index: u8,
    generation: u64,
}

/// Outcome of a call attempt. Precondition violations are outcomes, not
/// errors: they surface as no-op statuses.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    /// The draw applied; effects are in the result
    Called(DrawResult),
    /// No round is running
    NotRunning,
    /// The pool ran dry; the round has ended without a Full House
    Exhausted,
    /// A stale pending draw was discarded
    Stale,
}

impl CallOutcome {
    /// The draw result, when the call applied
    pub fn as_draw(&self) -> Option<&DrawResult> {
        match self {
            Self::Called(result) => Some(result),
            _ => None,
        }
    }
}

/// Session statistics across rounds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_started: u64,
    pub calls_made: u64,
    pub marks_applied: u64,
    pub score_wraps: u64,
    pub full_houses: u64,
}

impl SessionStats {
    /// Average marks per call across the session
    pub fn marks_per_call(&self) -> f64 {
        if self.calls_made > 0 {
            self.marks_applied as f64 / self.calls_made as f64
        } else {
            0.0
        }
    }
}

/// Synthetic Bingo Engine
///
/// Owns the full session state for one round at a time: tickets, call pool,
/// called sequence, winners and payouts. Pure and synchronous — timing and
/// rendering live in the layers above.
pub struct BingoEngine {
    /// Configuration
    config: BingoConfig,
    /// Random number generator
    rng: StdRng,
    /// Timing configuration
    timing_config: TimingConfig,
    /// Timestamp generator
    timestamp_gen: TimestampGenerator,
    /// All tickets, human player's first, then opponents in order
    tickets: Vec<Ticket>,
    /// Remaining numbers, drawn from the tail
    calls_pool: Vec<u8>,
    /// Called numbers in call order
    called: Vec<u8>,
    /// Round phase
    phase: RoundPhase,
    /// Full House winner (write-once per round)
    full_house_winner: Option<TicketId>,
    /// Total Score winner (write-once per round)
    total_score_winner: Option<TicketId>,
    /// Payouts derived at round start
    rtp: RtpAmounts,
    /// Session stats
    stats: SessionStats,
    /// Bumped on every reset; stale pending calls are discarded
    generation: u64,
}

impl BingoEngine {
    /// Create a new engine with default config
    pub fn new() -> Self {
        Self::with_config(BingoConfig::default())
    }

    /// Create with specific config
    pub fn with_config(config: BingoConfig) -> Self {
        let timing_config = TimingConfig::normal();
        Self {
            rng: StdRng::from_os_rng(),
            timestamp_gen: TimestampGenerator::new(timing_config.clone()),
            config,
            timing_config,
            tickets: Vec::new(),
            calls_pool: Vec::new(),
            called: Vec::new(),
            phase: RoundPhase::NotStarted,
            full_house_winner: None,
            total_score_winner: None,
            rtp: RtpAmounts::default(),
            stats: SessionStats::default(),
            generation: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Seed RNG for reproducible rounds
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Set timing profile
    pub fn set_timing(&mut self, profile: TimingProfile) {
        self.timing_config = TimingConfig::from_profile(profile);
        self.timestamp_gen = TimestampGenerator::new(self.timing_config.clone());
    }

    /// Get current config
    pub fn config(&self) -> &BingoConfig {
        &self.config
    }

    /// Get current timing config
    pub fn timing_config(&self) -> &TimingConfig {
        &self.timing_config
    }

    /// Get session stats
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reset session stats
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    /// Export config as JSON
    pub fn export_config(&self) -> String {
        serde_json::to_string_pretty(&self.config).unwrap_or_default()
    }

    /// Import config from JSON
    pub fn import_config(&mut self, json: &str) -> Result<(), ConfigError> {
        self.config = BingoConfig::from_json(json)?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUND LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a fresh round: shuffle the pool, deal tickets, derive payouts.
    /// Starting while a round is in progress resets it first.
    pub fn start(&mut self) {
        // An unscripted round has nothing to validate
        let _ = self.begin_round(None);
    }

    /// Start a round with a scripted call order and/or ticket layouts
    pub fn start_scripted(&mut self, script: &RoundScript) -> Result<(), ScenarioError> {
        match self.begin_round(Some(script)) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    fn begin_round(&mut self, script: Option<&RoundScript>) -> Result<(), ScenarioError> {
        if let Some(script) = script {
            script.validate()?;
        }
        self.reset();
        let config = self.config.normalized();

        let mut pool: Vec<u8> = (1..=MAX_NUMBER).collect();
        pool.shuffle(&mut self.rng);
        if let Some(script) = script {
            if !script.calls.is_empty() {
                // Draws pop from the tail, so the scripted prefix goes last,
                // reversed
                pool.retain(|n| !script.calls.contains(n));
                pool.extend(script.calls.iter().rev());
            }
        }
        self.calls_pool = pool;

        for player in 0..config.players() {
            let mut seq: u16 = 1;
            if let Some(script) = script {
                for scripted in script.tickets.iter().filter(|t| t.player == player) {
                    if seq > config.tickets_per_player {
                        break;
                    }
                    let ticket = Ticket::from_numbers(TicketId::new(player, seq), &scripted.numbers)
                        .map_err(|source| ScenarioError::Ticket { player, source })?;
                    self.tickets.push(ticket);
                    seq += 1;
                }
            }
            while seq <= config.tickets_per_player {
                self.tickets
                    .push(Ticket::generate(TicketId::new(player, seq), &mut self.rng));
                seq += 1;
            }
        }

        self.rtp = RtpAmounts::from_config(&config);
        self.phase = RoundPhase::Running;
        self.stats.rounds_started += 1;
        info!(
            "round started: {} tickets across {} players, base stake {:.2}",
            self.tickets.len(),
            config.players(),
            self.rtp.base
        );
        Ok(())
    }

    /// Discard the current round. Any pending call becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.tickets.clear();
        self.calls_pool.clear();
        self.called.clear();
        self.phase = RoundPhase::NotStarted;
        self.full_house_winner = None;
        self.total_score_winner = None;
        self.rtp = RtpAmounts::default();
        self.timestamp_gen.reset();
        debug!("round reset (generation {})", self.generation);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DRAW EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Pop the next number from the pool without applying its effects.
    ///
    /// Returns `None` when no round is running or the pool is empty; an
    /// empty pool ends the round.
    pub fn draw(&mut self) -> Option<PendingCall> {
        if self.phase != RoundPhase::Running {
            return None;
        }
        let Some(number) = self.calls_pool.pop() else {
            self.phase = RoundPhase::Ended;
            debug!("call pool exhausted without a full house");
            return None;
        };
        self.called.push(number);
        Some(PendingCall {
            number,
            call_index: self.called.len() as u8,
            generation: self.generation,
        })
    }

    /// Apply a pending call: mark tickets, advance scores, detect the Full
    /// House and resolve prizes. Stale pendings are discarded.
    pub fn apply(&mut self, pending: PendingCall) -> CallOutcome {
        if pending.generation != self.generation || self.phase != RoundPhase::Running {
            debug!("discarding stale call {}", pending.number);
            return CallOutcome::Stale;
        }

        let number = pending.number;
        self.stats.calls_made += 1;

        let mut updates: Vec<TicketUpdate> = Vec::new();
        let mut full_house: Option<TicketId> = None;

        // Ticket order is the tie-break: human player's tickets first, then
        // opponents in creation order. No further tickets are processed once
        // a winner is recorded.
        for ticket in &mut self.tickets {
            if !ticket.mark(number) {
                continue;
            }
            let change = score::apply(ticket.score(), number);
            ticket.set_score(change.to);
            self.stats.marks_applied += 1;
            if change.wrapped {
                self.stats.score_wraps += 1;
            }
            updates.push(TicketUpdate {
                ticket_id: ticket.id,
                marked_count: ticket.marked_count(),
                score_change: change,
            });
            if ticket.is_full_house() && self.full_house_winner.is_none() {
                full_house = Some(ticket.id);
                break;
            }
        }

        let total_score = if let Some(winner) = full_house {
            self.full_house_winner = Some(winner);
            self.phase = RoundPhase::Ended;
            self.stats.full_houses += 1;
            info!("full house: ticket {winner} on call {}", pending.call_index);

            let standing = prize::resolve_total_score(&self.tickets);
            if let Some(standing) = standing {
                self.total_score_winner = Some(standing.ticket_id);
                info!(
                    "total score prize: ticket {} at {}",
                    standing.ticket_id, standing.score
                );
            }
            standing
        } else {
            None
        };

        let closest = self.closest_to_target();

        CallOutcome::Called(DrawResult {
            call_index: pending.call_index,
            number,
            pool_remaining: self.calls_pool.len() as u8,
            ticket_updates: updates,
            full_house,
            total_score,
            closest,
        })
    }

    /// Draw and apply in one step
    pub fn call_next(&mut self) -> CallOutcome {
        let was_running = self.phase == RoundPhase::Running;
        match self.draw() {
            Some(pending) => self.apply(pending),
            None if was_running => CallOutcome::Exhausted,
            None => CallOutcome::NotRunning,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STAGE GENERATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Generate stage events for a draw result
    pub fn generate_stages(&mut self, result: &DrawResult) -> Vec<StageEvent> {
        self.timestamp_gen.reset();
        result.generate_stages(&mut self.timestamp_gen, &self.rtp)
    }

    /// Execute a call and immediately generate its stages
    pub fn call_with_stages(&mut self) -> (CallOutcome, Vec<StageEvent>) {
        let outcome = self.call_next();
        let stages = match &outcome {
            CallOutcome::Called(result) => {
                let result = result.clone();
                self.generate_stages(&result)
            }
            _ => Vec::new(),
        };
        (outcome, stages)
    }

    /// Stage events announcing the round that was just started
    pub fn round_start_stages(&mut self) -> Vec<StageEvent> {
        self.timestamp_gen.reset();
        vec![StageEvent::new(
            Stage::RoundStart {
                ticket_count: self.tickets.len() as u16,
                player_count: self.config.normalized().players(),
            },
            self.timestamp_gen.current(),
        )]
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE ACCESS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Current round phase
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Is a round accepting draws?
    pub fn running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// All tickets, in creation order
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Look up a single ticket
    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Most recent called number
    pub fn last_called(&self) -> Option<u8> {
        self.called.last().copied()
    }

    /// Recent calls, newest first, capped at `limit`
    pub fn recent_calls(&self, limit: usize) -> Vec<u8> {
        self.called.iter().rev().take(limit).copied().collect()
    }

    /// Numbers called so far, oldest first
    pub fn called(&self) -> &[u8] {
        &self.called
    }

    /// Calls made out of the full pool
    pub fn call_count(&self) -> u8 {
        self.called.len() as u8
    }

    /// Numbers still in the pool
    pub fn calls_remaining(&self) -> u8 {
        self.calls_pool.len() as u8
    }

    /// Full House winner, once recorded
    pub fn full_house_winner(&self) -> Option<TicketId> {
        self.full_house_winner
    }

    /// Total Score winner, once recorded
    pub fn total_score_winner(&self) -> Option<TicketId> {
        self.total_score_winner
    }

    /// Payout amounts for the current round
    pub fn rtp(&self) -> &RtpAmounts {
        &self.rtp
    }

    /// Closest-to-100 standing among the human player's tickets
    pub fn closest_to_target(&self) -> Option<ScoreStanding> {
        prize::closest_to_target(self.tickets.iter().filter(|t| t.id.is_human()))
    }
}

impl Default for BingoEngine {
    fn default() -> Self {
        Self::new()
    }
}
