//! Synchronous pseudo-randomness from host block data
//!
//! Digests {previous block id, host timestamp, engine id, period counter,
//! caller id} with SHA-256 and folds the first eight bytes into the outcome
//! word. Requesting and resolving happen in a single call.
//!
//! # Not adversarially safe
//!
//! Every input to the digest is observable before the draw, and the caller
//! chooses two of them (its own identity, and the moment it calls — hence
//! the timestamp and block id). An entity allowed to trigger draws can
//! therefore precompute the outcome and time its request. Use
//! [`OracleRandomness`](crate::randomness::OracleRandomness) wherever the
//! draw caller must not be trusted; this strategy is the fallback for hosts
//! without an oracle.

use crate::randomness::{DrawRequest, DrawTicket, RandomnessSource};
use sha2::{Digest, Sha256};

/// Synchronous block-data digest strategy.
///
/// # Example
/// ```
/// use lottery_core_rs::randomness::{
///     BlockHashRandomness, DrawContext, DrawRequest, DrawTicket, RandomnessSource,
/// };
///
/// let context = DrawContext {
///     previous_block_id: [7u8; 32],
///     timestamp: 1_700_000_000,
/// };
/// let request = DrawRequest {
///     period: 1,
///     engine_id: "lottery",
///     caller: "admin",
///     context: &context,
/// };
///
/// let mut source = BlockHashRandomness::new();
/// let first = source.begin_draw(&request);
/// let second = source.begin_draw(&request);
/// // Same inputs, same word: the outcome is a pure function of the request.
/// assert_eq!(first, second);
/// assert!(matches!(first, DrawTicket::Immediate { .. }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlockHashRandomness;

impl BlockHashRandomness {
    /// Create the strategy. Stateless; every draw is derived afresh from the
    /// request.
    pub fn new() -> Self {
        Self
    }

    /// The outcome word for a request, exposed so tests can demonstrate
    /// that anyone holding the inputs can predict the draw.
    pub fn derive_word(request: &DrawRequest<'_>) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(request.context.previous_block_id);
        hasher.update(request.context.timestamp.to_le_bytes());
        hasher.update(request.engine_id.as_bytes());
        hasher.update(request.period.to_le_bytes());
        hasher.update(request.caller.as_bytes());
        let digest = hasher.finalize();

        let mut word_bytes = [0u8; 8];
        word_bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(word_bytes)
    }
}

impl RandomnessSource for BlockHashRandomness {
    fn begin_draw(&mut self, request: &DrawRequest<'_>) -> DrawTicket {
        DrawTicket::Immediate {
            word: Self::derive_word(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::DrawContext;

    fn request_with<'a>(
        context: &'a DrawContext,
        period: u64,
        caller: &'a str,
    ) -> DrawRequest<'a> {
        DrawRequest {
            period,
            engine_id: "engine",
            caller,
            context,
        }
    }

    #[test]
    fn test_same_inputs_same_word() {
        let context = DrawContext {
            previous_block_id: [1u8; 32],
            timestamp: 42,
        };
        let a = BlockHashRandomness::derive_word(&request_with(&context, 1, "admin"));
        let b = BlockHashRandomness::derive_word(&request_with(&context, 1, "admin"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_input_feeds_the_digest() {
        let context = DrawContext {
            previous_block_id: [1u8; 32],
            timestamp: 42,
        };
        let base = BlockHashRandomness::derive_word(&request_with(&context, 1, "admin"));

        let other_context = DrawContext {
            previous_block_id: [2u8; 32],
            timestamp: 42,
        };
        assert_ne!(
            base,
            BlockHashRandomness::derive_word(&request_with(&other_context, 1, "admin"))
        );
        assert_ne!(
            base,
            BlockHashRandomness::derive_word(&request_with(&context, 2, "admin"))
        );
        assert_ne!(
            base,
            BlockHashRandomness::derive_word(&request_with(&context, 1, "other"))
        );
    }
}
