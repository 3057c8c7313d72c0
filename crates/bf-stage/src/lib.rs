//! # bf-stage — BingoForge Universal Stage System
//!
//! Defines canonical game stages that the bingo engine maps to.
//! Presentation layers never understand engine internals — only STAGES.
//!
//! ## Philosophy
//!
//! Every bingo round, regardless of host surface, passes through the same
//! semantic phases:
//! - Round starts → Numbers called → Tickets marked → Prizes resolved
//!
//! This crate defines these universal stages; the renderer, the speech
//! announcer, and the animation layer all subscribe to the same stream.

pub mod event;
pub mod stage;
pub mod taxonomy;

pub use event::*;
pub use stage::*;
pub use taxonomy::*;
