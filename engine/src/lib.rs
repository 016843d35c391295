//! Lottery Settlement Core - Rust Engine
//!
//! Deterministic lottery/rewards accounting core: wagers against a scarce
//! reward-token budget, a verifiably-fair outcome per period, and batched
//! settlement of winnings from a shared prize pool under a halving emission
//! schedule.
//!
//! # Architecture
//!
//! - **models**: Domain types (Bet, Period, LedgerState, Event)
//! - **journal**: Append-only per (period, account) bet storage
//! - **emission**: Halving reward schedule with a hard supply cap
//! - **payout**: Pure outcome evaluator (exact match + digit permutations)
//! - **randomness**: Draw strategies (synchronous digest, oracle callback)
//! - **settlement**: Batched, resumable claim processing
//! - **token**: Fungible-token collaborator seam
//! - **engine**: The orchestrator tying everything together
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor units)
//! 2. Operations are serialized and all-or-nothing
//! 3. The prize pool never goes negative; reward issuance never exceeds
//!    its cap

// Module declarations
pub mod emission;
pub mod engine;
pub mod error;
pub mod journal;
pub mod models;
pub mod payout;
pub mod randomness;
pub mod settlement;
pub mod token;

// Re-exports for convenience
pub use emission::{EmissionConfig, EmissionError, EmissionLedger};
pub use engine::{
    CheckpointError, ClaimProgress, ClaimReceipt, DrawOutcome, DrawResolution, EngineConfig,
    EngineStatus, ExchangeReceipt, LotteryEngine, RandomnessConfig, StateSnapshot, WagerReceipt,
};
pub use error::{
    AuthorizationError, ConfigError, EngineError, InvariantViolation, StateError, ValidationError,
};
pub use journal::WagerJournal;
pub use models::{Bet, Event, EventLog, LedgerState, Period, PeriodPhase};
pub use payout::{evaluate_bet, evaluate_number, PrizeTable};
pub use randomness::{
    BlockHashRandomness, DrawContext, DrawRequest, DrawTicket, OracleRandomness, RandomnessSource,
};
pub use settlement::{apply_claim, prepare_claim, ClaimPlan};
pub use token::{InMemoryToken, TokenError, TokenLedger};
