//! Engine error taxonomy
//!
//! Four classes, each its own enum so callers can match on recoverability:
//!
//! - [`ValidationError`]: malformed input, rejected before any state change;
//!   the caller retries with corrected input.
//! - [`AuthorizationError`]: the caller lacks the required role; no state
//!   change.
//! - [`StateError`]: the operation arrived in the wrong lifecycle phase; no
//!   state change; the caller waits for or triggers the right phase.
//! - [`InvariantViolation`]: accounting that must never happen did. The
//!   triggering operation halts in full rather than clamping, so the fault
//!   surfaces immediately.
//!
//! Every rejection is all-or-nothing: no partial ledger mutation survives a
//! rejected operation.

use crate::emission::EmissionError;
use crate::token::TokenError;
use thiserror::Error;

/// Malformed input, rejected before any state mutation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("bet must contain between 1 and 100 numbers, got {count}")]
    NumberCountOutOfRange { count: usize },

    #[error("chosen number {number} is outside [0, 999]")]
    NumberOutOfRange { number: u16 },

    #[error("multiplier {multiplier} is outside [1, 99]")]
    MultiplierOutOfRange { multiplier: u16 },

    #[error("batch size {batch_size} is outside [1, {max}]")]
    BatchSizeOutOfRange { batch_size: usize, max: usize },

    #[error("amount must be positive")]
    NonPositiveAmount,
}

/// Caller lacks the role an operation requires.
#[derive(Debug, Error, PartialEq)]
pub enum AuthorizationError {
    #[error("operation restricted to the owner or platform wallet, caller was {caller}")]
    AdminRequired { caller: String },

    #[error("randomness fulfillment restricted to the oracle, caller was {caller}")]
    OracleRequired { caller: String },
}

/// Operation arrived in the wrong lifecycle phase.
#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("wagering and draws are paused")]
    Paused,

    #[error("wagering and draws are not paused")]
    NotPaused,

    #[error("period {period} is not open for this operation")]
    PeriodNotOpen { period: u64 },

    #[error("randomness already requested for period {period}")]
    RandomnessAlreadyPending { period: u64 },

    #[error("period {period} is already drawn")]
    PeriodAlreadyDrawn { period: u64 },

    #[error("period {period} is not drawn yet")]
    PeriodNotDrawn { period: u64 },

    #[error("account {account} has no bets in period {period}")]
    NoBets { period: u64, account: String },

    #[error("all {processed} bets of account {account} in period {period} are already processed")]
    NothingToProcess {
        period: u64,
        account: String,
        processed: usize,
    },

    #[error("unknown or already-consumed randomness request {request_id}")]
    UnknownRequest { request_id: String },

    #[error("exchange of {requested} reward units exceeds prize pool {available}")]
    ExchangeExceedsPool { requested: i64, available: i64 },

    #[error("no fees accrued for withdrawal")]
    NoFeesAccrued,
}

/// Accounting faults that correct bookkeeping makes unreachable.
#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("payout of {required} exceeds prize pool {available}")]
    PoolInsufficient { required: i64, available: i64 },

    #[error("emission fault: {0}")]
    Emission(#[from] EmissionError),
}

/// Top-level engine error.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

/// Configuration validation failure at engine construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
}
