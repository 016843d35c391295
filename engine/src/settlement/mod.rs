//! Claim settlement
//!
//! Batched, resumable payout computation over an account's bet journal for a
//! drawn period. Settlement is split into two halves so the engine can keep
//! every operation all-or-nothing:
//!
//! - [`prepare_claim`] reads state and produces a [`ClaimPlan`] — which
//!   journal entries the batch covers, which of them still need settling,
//!   and the total winnings. No mutation.
//! - [`apply_claim`] commits a plan: marks the bets claimed, debits the
//!   pool, advances the cursor. Infallible by construction; the engine runs
//!   its sufficiency check and the token payout between the two halves.
//!
//! Batching exists so an account with an unbounded bet history can never be
//! forced into unbounded work in one call: callers repeat with successive
//! batches until the plan reports completion.
//!
//! # Critical Invariants
//!
//! - **Resumability**: claiming batch-by-batch pays exactly what one
//!   unbounded pass would
//! - **Idempotency**: a bet already flagged claimed contributes zero and is
//!   never paid twice
//! - **Atomicity**: a rejected claim leaves cursor, flags, and pool untouched

use crate::error::StateError;
use crate::models::state::LedgerState;
use crate::payout::{evaluate_bet, PrizeTable};

/// A prepared claim batch: everything [`apply_claim`] needs to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimPlan {
    /// Period being claimed
    pub period: u64,

    /// Claiming account
    pub account: String,

    /// First journal index the batch covers
    pub from_index: usize,

    /// One past the last journal index the batch covers; becomes the new
    /// cursor
    pub to_index: usize,

    /// Total winnings across the batch's unclaimed bets
    pub winnings: i64,

    /// Journal indices in `[from_index, to_index)` that are not yet claimed
    pub unclaimed_indices: Vec<usize>,

    /// Whether the cursor reaches the journal length after this batch
    pub is_completed: bool,
}

/// Evaluate one claim batch without mutating anything.
///
/// # Arguments
///
/// * `state` - Ledger state
/// * `period` - Period to claim; must be drawn
/// * `account` - Claiming account
/// * `batch_size` - Maximum journal entries to cover; bounds the work of
///   this call (the engine validates it against its configured maximum)
/// * `prizes` - Prize table for the evaluation
///
/// # Errors
///
/// - `PeriodNotDrawn` if the period does not exist or is not drawn
/// - `NoBets` if the account placed no bets in the period
/// - `NothingToProcess` if the cursor already covers the whole journal
pub fn prepare_claim(
    state: &LedgerState,
    period: u64,
    account: &str,
    batch_size: usize,
    prizes: &PrizeTable,
) -> Result<ClaimPlan, StateError> {
    let record = state
        .period(period)
        .filter(|p| p.is_drawn())
        .ok_or(StateError::PeriodNotDrawn { period })?;
    let Some(outcome) = record.winning_outcome() else {
        return Err(StateError::PeriodNotDrawn { period });
    };

    let len = state.journal().len(period, account);
    if len == 0 {
        return Err(StateError::NoBets {
            period,
            account: account.to_string(),
        });
    }

    let start = state.processed_count(period, account);
    if start >= len {
        return Err(StateError::NothingToProcess {
            period,
            account: account.to_string(),
            processed: start,
        });
    }

    let end = (start + batch_size).min(len);
    let mut winnings: i64 = 0;
    let mut unclaimed_indices = Vec::new();

    for (offset, bet) in state.journal().scan(period, account, start, end).iter().enumerate() {
        // Entries claimed through another path are tolerated: the cursor
        // advances past them and they contribute zero.
        if bet.is_claimed() {
            continue;
        }
        winnings += evaluate_bet(outcome, bet, prizes);
        unclaimed_indices.push(start + offset);
    }

    Ok(ClaimPlan {
        period,
        account: account.to_string(),
        from_index: start,
        to_index: end,
        winnings,
        unclaimed_indices,
        is_completed: end == len,
    })
}

/// Commit a prepared claim batch.
///
/// Marks the plan's unclaimed bets, debits the pool by the plan's winnings,
/// and advances the cursor to the plan's end. The caller has already
/// verified pool sufficiency and completed the token payout.
///
/// # Panics
/// Panics (via the state mutators' asserts) if the plan does not match the
/// state it was prepared against — that is an accounting bug, never user
/// input.
pub fn apply_claim(state: &mut LedgerState, plan: &ClaimPlan) {
    for &index in &plan.unclaimed_indices {
        state
            .journal_mut()
            .bet_mut(plan.period, &plan.account, index)
            .mark_claimed();
    }
    if plan.winnings > 0 {
        state.debit_prize_pool(plan.winnings);
    }
    state.set_processed_count(plan.period, &plan.account, plan.to_index);
}
