//! Asynchronous oracle commit/callback strategy
//!
//! `begin_draw` issues a fresh UUID request id and reports the draw as
//! pending. The engine records the request-id-to-period mapping; the external
//! oracle later delivers exactly one fulfillment carrying the random word,
//! which the engine matches back to the originating period.
//!
//! The oracle's internal consensus and proofs are outside this crate. What
//! matters here is the contract: one request, one fulfillment, unknown or
//! already-consumed request ids rejected.

use crate::randomness::{DrawRequest, DrawTicket, RandomnessSource};
use uuid::Uuid;

/// Oracle-backed strategy: draws resolve through a later fulfillment call.
#[derive(Debug, Clone, Default)]
pub struct OracleRandomness;

impl OracleRandomness {
    /// Create the strategy.
    pub fn new() -> Self {
        Self
    }
}

impl RandomnessSource for OracleRandomness {
    fn begin_draw(&mut self, _request: &DrawRequest<'_>) -> DrawTicket {
        DrawTicket::Pending {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}
