//! Randomness strategies for period draws
//!
//! The period state machine consumes randomness through the
//! [`RandomnessSource`] trait, so the two historical draw designs sit behind
//! one seam and satisfy the same lifecycle contract:
//!
//! - [`BlockHashRandomness`]: synchronous digest of host block data, resolved
//!   in the same call that requested the draw. Fast, self-contained, and
//!   **not adversarially safe** — see the module docs in [`pseudo`].
//! - [`OracleRandomness`]: asynchronous commit/callback against an external
//!   verifiable-randomness oracle. The request is identified by a fresh
//!   request id; the oracle later fulfills it exactly once. Preferred for
//!   production fairness.

pub mod oracle;
pub mod pseudo;

pub use oracle::OracleRandomness;
pub use pseudo::BlockHashRandomness;

use serde::{Deserialize, Serialize};

/// Host-supplied entropy inputs for a draw request.
///
/// The engine has no ambient clock or chain view; whatever environment hosts
/// it passes the block identifier and timestamp it observes. Only the
/// synchronous strategy reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawContext {
    /// Identifier of the most recent sealed block (or equivalent)
    pub previous_block_id: [u8; 32],

    /// Host timestamp, seconds
    pub timestamp: u64,
}

/// A draw request as seen by a randomness source.
#[derive(Debug, Clone)]
pub struct DrawRequest<'a> {
    /// Period the outcome will resolve
    pub period: u64,

    /// Identifier of the requesting engine instance
    pub engine_id: &'a str,

    /// Account that triggered the draw
    pub caller: &'a str,

    /// Host entropy inputs
    pub context: &'a DrawContext,
}

/// What a randomness source hands back for a draw request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawTicket {
    /// Outcome material available immediately; the draw resolves in this call
    Immediate { word: u64 },

    /// Outcome will arrive later through a fulfillment callback keyed by
    /// this request id
    Pending { request_id: String },
}

/// Strategy seam for the two draw designs.
pub trait RandomnessSource {
    /// Begin a draw for `request`, returning either immediate outcome
    /// material or a pending request id the oracle will fulfill.
    fn begin_draw(&mut self, request: &DrawRequest<'_>) -> DrawTicket;
}
