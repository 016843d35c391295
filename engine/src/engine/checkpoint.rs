//! Checkpoint - Save/Load Engine State
//!
//! Serializes the complete ledger state into a versioned snapshot and
//! restores an engine from one. Token ledgers are external collaborators and
//! are not part of the snapshot; the host persists them on its own terms.
//!
//! # Critical Invariants
//!
//! - **Config Matching**: a snapshot restores only against the exact config
//!   it was taken under, verified by a canonical SHA-256 config hash
//! - **Structural Validity**: snapshots are re-validated before restoration
//!   (non-negative balances, cursors within journal bounds, drawn periods
//!   carrying outcomes, pending requests targeting undrawn periods)

use crate::emission::EmissionLedger;
use crate::engine::lottery::{EngineConfig, LotteryEngine};
use crate::models::bet::Bet;
use crate::models::period::Period;
use crate::models::state::LedgerState;
use crate::token::TokenLedger;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during checkpoint operations.
#[derive(Debug, Error, PartialEq)]
pub enum CheckpointError {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("config hash mismatch: snapshot {snapshot}, current {current}")]
    ConfigMismatch { snapshot: String, current: String },

    #[error("snapshot validation failed: {0}")]
    StateValidation(String),
}

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete ledger state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Current period counter
    pub current_period: u64,

    /// Pause flag
    pub paused: bool,

    /// Prize pool balance (reward units)
    pub prize_pool: i64,

    /// Stored base-token balance
    pub stored_base_tokens: i64,

    /// Accrued platform fees
    pub accrued_fees: i64,

    /// Count of bet records across all periods
    pub total_bets: u64,

    /// Emission counter: cumulative bet units
    pub total_bet_units: u64,

    /// Emission counter: cumulative reward issuance
    pub total_reward_minted: i64,

    /// All period records, sorted by counter
    pub periods: Vec<PeriodSnapshot>,

    /// All journal entries, sorted by (period, account)
    pub journal: Vec<JournalEntrySnapshot>,

    /// All claim cursors, sorted by (period, account)
    pub claim_progress: Vec<ClaimCursorSnapshot>,

    /// Outstanding randomness requests, sorted by request id
    pub pending_requests: Vec<PendingRequestSnapshot>,

    /// SHA-256 hash of the config the snapshot was taken under
    pub config_hash: String,
}

/// Period record snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub period: u64,
    pub total_sales: i64,
    pub winning_outcome: Option<u16>,
    pub drawn: bool,
    pub randomness_pending: bool,
}

/// One account's bets for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntrySnapshot {
    pub period: u64,
    pub account: String,
    pub bets: Vec<Bet>,
}

/// One account's claim cursor for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCursorSnapshot {
    pub period: u64,
    pub account: String,
    pub processed: usize,
}

/// One outstanding randomness request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequestSnapshot {
    pub request_id: String,
    pub period: u64,
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute a deterministic SHA-256 hash of a serializable config.
///
/// Serializes through canonical JSON (recursively sorted object keys) so the
/// hash is independent of map iteration order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, CheckpointError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config)
        .map_err(|e| CheckpointError::Serialization(format!("config serialization failed: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| CheckpointError::Serialization(format!("config serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Validate snapshot structural invariants before restoration.
pub fn validate_snapshot(snapshot: &StateSnapshot) -> Result<(), CheckpointError> {
    if snapshot.current_period == 0 {
        return Err(CheckpointError::StateValidation(
            "current period counter starts at 1".to_string(),
        ));
    }
    if snapshot.prize_pool < 0 || snapshot.stored_base_tokens < 0 || snapshot.accrued_fees < 0 {
        return Err(CheckpointError::StateValidation(
            "balances must be non-negative".to_string(),
        ));
    }
    if snapshot.total_reward_minted < 0 {
        return Err(CheckpointError::StateValidation(
            "minted total must be non-negative".to_string(),
        ));
    }

    let mut period_records = HashMap::new();
    for period in &snapshot.periods {
        if period_records
            .insert(period.period, period)
            .is_some()
        {
            return Err(CheckpointError::StateValidation(format!(
                "duplicate record for period {}",
                period.period
            )));
        }
        if period.drawn != period.winning_outcome.is_some() {
            return Err(CheckpointError::StateValidation(format!(
                "period {} drawn flag does not match outcome presence",
                period.period
            )));
        }
        if period.winning_outcome.map_or(false, |o| o > 999) {
            return Err(CheckpointError::StateValidation(format!(
                "period {} outcome out of range",
                period.period
            )));
        }
        if period.total_sales < 0 {
            return Err(CheckpointError::StateValidation(format!(
                "period {} has negative sales",
                period.period
            )));
        }
        if period.drawn && period.randomness_pending {
            return Err(CheckpointError::StateValidation(format!(
                "period {} is drawn but still marked pending",
                period.period
            )));
        }
    }
    if !period_records.contains_key(&snapshot.current_period) {
        return Err(CheckpointError::StateValidation(format!(
            "current period {} has no record",
            snapshot.current_period
        )));
    }

    let mut journal_lengths: HashMap<(u64, &str), usize> = HashMap::new();
    let mut bet_count: u64 = 0;
    for entry in &snapshot.journal {
        if !period_records.contains_key(&entry.period) {
            return Err(CheckpointError::StateValidation(format!(
                "journal entry references unknown period {}",
                entry.period
            )));
        }
        let previous =
            journal_lengths.insert((entry.period, entry.account.as_str()), entry.bets.len());
        if previous.is_some() {
            return Err(CheckpointError::StateValidation(format!(
                "duplicate journal entry for ({}, {})",
                entry.period, entry.account
            )));
        }
        bet_count += entry.bets.len() as u64;
    }
    if bet_count != snapshot.total_bets {
        return Err(CheckpointError::StateValidation(format!(
            "total_bets {} does not match journal content {}",
            snapshot.total_bets, bet_count
        )));
    }

    for cursor in &snapshot.claim_progress {
        let len = journal_lengths
            .get(&(cursor.period, cursor.account.as_str()))
            .copied()
            .unwrap_or(0);
        if cursor.processed > len {
            return Err(CheckpointError::StateValidation(format!(
                "claim cursor for ({}, {}) passes journal length",
                cursor.period, cursor.account
            )));
        }
    }

    let mut request_ids = std::collections::HashSet::new();
    for request in &snapshot.pending_requests {
        if !request_ids.insert(request.request_id.as_str()) {
            return Err(CheckpointError::StateValidation(format!(
                "duplicate pending request id {}",
                request.request_id
            )));
        }
        match period_records.get(&request.period) {
            None => {
                return Err(CheckpointError::StateValidation(format!(
                    "pending request {} references unknown period {}",
                    request.request_id, request.period
                )))
            }
            Some(record) if record.drawn => {
                return Err(CheckpointError::StateValidation(format!(
                    "pending request {} references drawn period {}",
                    request.request_id, request.period
                )))
            }
            _ => {}
        }
    }

    Ok(())
}

// ============================================================================
// Save / Restore
// ============================================================================

impl LotteryEngine {
    /// Capture the complete ledger state as a snapshot.
    pub fn snapshot(&self) -> Result<StateSnapshot, CheckpointError> {
        let state = self.state();
        let config_hash = compute_config_hash(self.config())?;

        let mut periods: Vec<PeriodSnapshot> = state
            .periods()
            .map(|(counter, period)| PeriodSnapshot {
                period: counter,
                total_sales: period.total_sales(),
                winning_outcome: period.winning_outcome(),
                drawn: period.is_drawn(),
                randomness_pending: period.is_randomness_pending(),
            })
            .collect();
        periods.sort_by_key(|p| p.period);

        let mut journal: Vec<JournalEntrySnapshot> = state
            .journal()
            .entries()
            .map(|(period, account, bets)| JournalEntrySnapshot {
                period,
                account: account.to_string(),
                bets: bets.to_vec(),
            })
            .collect();
        journal.sort_by(|a, b| (a.period, &a.account).cmp(&(b.period, &b.account)));

        let mut claim_progress: Vec<ClaimCursorSnapshot> = state
            .claim_cursors()
            .map(|(period, account, processed)| ClaimCursorSnapshot {
                period,
                account: account.to_string(),
                processed,
            })
            .collect();
        claim_progress.sort_by(|a, b| (a.period, &a.account).cmp(&(b.period, &b.account)));

        let mut pending_requests: Vec<PendingRequestSnapshot> = state
            .pending_requests()
            .map(|(request_id, period)| PendingRequestSnapshot {
                request_id: request_id.to_string(),
                period,
            })
            .collect();
        pending_requests.sort_by(|a, b| a.request_id.cmp(&b.request_id));

        Ok(StateSnapshot {
            current_period: state.current_period(),
            paused: state.is_paused(),
            prize_pool: state.prize_pool(),
            stored_base_tokens: state.stored_base_tokens(),
            accrued_fees: state.accrued_fees(),
            total_bets: state.total_bets(),
            total_bet_units: state.emission().total_bet_units(),
            total_reward_minted: state.emission().total_reward_minted(),
            periods,
            journal,
            claim_progress,
            pending_requests,
            config_hash,
        })
    }

    /// Restore an engine from a snapshot taken under the same config.
    ///
    /// Token collaborators are supplied by the host; their balances are not
    /// part of the snapshot.
    pub fn restore(
        config: EngineConfig,
        snapshot: &StateSnapshot,
        base_token: Box<dyn TokenLedger>,
        reward_token: Box<dyn TokenLedger>,
    ) -> Result<Self, CheckpointError> {
        Self::validate_config(&config)
            .map_err(|e| CheckpointError::StateValidation(e.to_string()))?;

        let current_hash = compute_config_hash(&config)?;
        if current_hash != snapshot.config_hash {
            return Err(CheckpointError::ConfigMismatch {
                snapshot: snapshot.config_hash.clone(),
                current: current_hash,
            });
        }
        validate_snapshot(snapshot)?;
        if snapshot.total_reward_minted > config.emission.max_reward_supply {
            return Err(CheckpointError::StateValidation(
                "minted total exceeds the emission supply cap".to_string(),
            ));
        }

        let emission = EmissionLedger::from_snapshot(
            config.emission.clone(),
            snapshot.total_bet_units,
            snapshot.total_reward_minted,
        );
        let mut state = LedgerState::bare(emission);

        for period in &snapshot.periods {
            state.insert_period(
                period.period,
                Period::from_snapshot(
                    period.total_sales,
                    period.winning_outcome,
                    period.drawn,
                    period.randomness_pending,
                ),
            );
        }
        state.set_current_period(snapshot.current_period);

        for entry in &snapshot.journal {
            for bet in &entry.bets {
                state
                    .journal_mut()
                    .append(entry.period, &entry.account, bet.clone());
            }
        }
        for cursor in &snapshot.claim_progress {
            state.set_processed_count(cursor.period, &cursor.account, cursor.processed);
        }
        for request in &snapshot.pending_requests {
            state.register_request(&request.request_id, request.period);
        }

        state.restore_balances(
            snapshot.prize_pool,
            snapshot.stored_base_tokens,
            snapshot.accrued_fees,
        );
        state.set_total_bets(snapshot.total_bets);
        state.set_paused(snapshot.paused);

        Ok(LotteryEngine::assemble(
            config,
            state,
            base_token,
            reward_token,
        ))
    }
}
