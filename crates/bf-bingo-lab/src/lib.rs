//! # bf-bingo-lab — Synthetic Bingo Engine for BingoForge
//!
//! Provides a fully deterministic bingo simulator for presentation-first
//! development. Calls numbers without repetition, tracks per-ticket marks
//! and the wrapping Total Score accumulator, and resolves the two prizes.
//!
//! ## Features
//!
//! - **Synthetic Engine**: Pure, synchronous round state machine
//! - **Band-Constrained Tickets**: 2×9 grids over fixed value bands
//! - **Two-Phase Draws**: draw/apply split with a stale-call guard
//! - **Stage Generation**: Automatic STAGE event generation for rendering,
//!   speech, and animation layers
//! - **Timing Profiles**: Normal, Turbo, Studio (instant) timing modes
//! - **Scripted Rounds**: Forced call orders and ticket layouts for tests
//!
//! ## Architecture
//!
//! ```text
//! BingoEngine
//!     │
//!     ├── BingoConfig (tickets, players, price → RtpAmounts)
//!     ├── Ticket (numbers, 2×9 grid, marks, score)
//!     ├── Call pool (unbiased permutation of 1..=100)
//!     └── AutoCaller (cancellable logical-clock schedule)
//!           │
//!           v
//!     DrawResult → Vec<StageEvent>
//! ```

pub mod autocall;
pub mod config;
pub mod draw;
pub mod engine;
pub mod prize;
pub mod scenario;
pub mod score;
pub mod ticket;
pub mod timing;

pub use autocall::*;
pub use config::*;
pub use draw::*;
pub use engine::*;
pub use prize::*;
pub use scenario::*;
pub use score::{ScoreChange, TARGET_SCORE};
pub use ticket::*;
pub use timing::*;
