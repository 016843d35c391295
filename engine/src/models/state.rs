//! Ledger state
//!
//! The complete mutable state of the lottery core: period records, the wager
//! journal, claim cursors, emission counters, and the shared balances (prize
//! pool, stored base tokens, accrued fees). One `LedgerState` is owned by one
//! engine and passed by `&mut` into the operations that change it — no hidden
//! singletons.
//!
//! # Critical Invariants
//!
//! 1. **Pool Solvency**: the prize pool never goes negative; every debit is
//!    preceded by a sufficiency check within the same call
//! 2. **Period Monotonicity**: the current period counter only advances
//! 3. **Cursor Monotonicity**: claim cursors never move backwards and never
//!    pass the journal length
//! 4. **Request Uniqueness**: each randomness request id maps to exactly one
//!    period and is consumed exactly once

use crate::emission::{EmissionConfig, EmissionLedger};
use crate::journal::WagerJournal;
use crate::models::period::{Period, PeriodPhase};
use std::collections::HashMap;

/// Complete lottery ledger state.
///
/// Mutators assert their preconditions: the engine rejects invalid requests
/// with typed errors first, so an assert firing here is an accounting bug,
/// not bad user input.
#[derive(Debug, Clone)]
pub struct LedgerState {
    /// Monotonically increasing period counter; the current period accepts
    /// wagers while open
    current_period: u64,

    /// All period records, keyed by period counter
    periods: HashMap<u64, Period>,

    /// Append-only bet storage
    journal: WagerJournal,

    /// period -> account -> count of leading journal entries already settled
    claim_progress: HashMap<u64, HashMap<String, usize>>,

    /// Emission schedule and counters
    emission: EmissionLedger,

    /// Reward-token units available for payouts
    prize_pool: i64,

    /// Base tokens retained from drawn periods' pool shares and exchanges
    stored_base_tokens: i64,

    /// Base tokens accrued as platform fees, awaiting withdrawal
    accrued_fees: i64,

    /// Count of bet records placed across all periods
    total_bets: u64,

    /// Outstanding randomness requests: request id -> period
    pending_requests: HashMap<String, u64>,

    /// Whether wagering and draws are paused
    paused: bool,
}

impl LedgerState {
    /// Create a fresh ledger with period 1 open and nothing minted.
    pub fn new(emission_config: EmissionConfig) -> Self {
        let mut state = Self::bare(EmissionLedger::new(emission_config));
        state.periods.insert(1, Period::new());
        state.current_period = 1;
        state
    }

    /// Create a bare ledger with no period records (checkpoint restoration).
    ///
    /// The caller inserts restored period records and sets the current
    /// counter before the state is used.
    pub fn bare(emission: EmissionLedger) -> Self {
        Self {
            current_period: 0,
            periods: HashMap::new(),
            journal: WagerJournal::new(),
            claim_progress: HashMap::new(),
            emission,
            prize_pool: 0,
            stored_base_tokens: 0,
            accrued_fees: 0,
            total_bets: 0,
            pending_requests: HashMap::new(),
            paused: false,
        }
    }

    // ========================================================================
    // Periods
    // ========================================================================

    /// The current period counter.
    pub fn current_period(&self) -> u64 {
        self.current_period
    }

    /// Phase of the current period.
    pub fn current_phase(&self) -> PeriodPhase {
        self.current_period_ref().phase()
    }

    /// Get a period record by counter.
    pub fn period(&self, period: u64) -> Option<&Period> {
        self.periods.get(&period)
    }

    /// The current period record.
    pub fn current_period_ref(&self) -> &Period {
        self.periods
            .get(&self.current_period)
            .expect("current period record always exists")
    }

    /// Mutable access to the current period record.
    pub fn current_period_mut(&mut self) -> &mut Period {
        self.periods
            .get_mut(&self.current_period)
            .expect("current period record always exists")
    }

    /// Mutable access to an arbitrary period record.
    pub fn period_mut(&mut self, period: u64) -> Option<&mut Period> {
        self.periods.get_mut(&period)
    }

    /// Open the next period and make it current.
    ///
    /// # Panics
    /// Panics if the current period is not drawn yet; periods never regress
    /// and are never skipped.
    pub fn advance_period(&mut self) {
        assert!(
            self.current_period_ref().is_drawn(),
            "current period must be drawn before advancing"
        );
        self.current_period += 1;
        self.periods.insert(self.current_period, Period::new());
    }

    /// Insert a restored period record (checkpoint restoration).
    ///
    /// # Panics
    /// Panics on duplicate period counters.
    pub fn insert_period(&mut self, counter: u64, period: Period) {
        let previous = self.periods.insert(counter, period);
        assert!(previous.is_none(), "period {} restored twice", counter);
    }

    /// Force the current period counter (checkpoint restoration).
    ///
    /// # Panics
    /// Panics if no record exists for the counter.
    pub fn set_current_period(&mut self, counter: u64) {
        assert!(
            self.periods.contains_key(&counter),
            "current period {} has no record",
            counter
        );
        self.current_period = counter;
    }

    /// Iterate all (counter, period) records, for snapshotting.
    pub fn periods(&self) -> impl Iterator<Item = (u64, &Period)> {
        self.periods.iter().map(|(counter, period)| (*counter, period))
    }

    // ========================================================================
    // Journal and claim cursors
    // ========================================================================

    /// The wager journal.
    pub fn journal(&self) -> &WagerJournal {
        &self.journal
    }

    /// Mutable access to the wager journal.
    pub fn journal_mut(&mut self) -> &mut WagerJournal {
        &mut self.journal
    }

    /// Claim cursor: leading journal entries already settled for an account
    /// in a period.
    pub fn processed_count(&self, period: u64, account: &str) -> usize {
        self.claim_progress
            .get(&period)
            .and_then(|accounts| accounts.get(account))
            .copied()
            .unwrap_or(0)
    }

    /// Advance a claim cursor.
    ///
    /// # Panics
    /// Panics if the cursor would move backwards or past the journal length.
    pub fn set_processed_count(&mut self, period: u64, account: &str, count: usize) {
        let current = self.processed_count(period, account);
        assert!(count >= current, "claim cursor never moves backwards");
        assert!(
            count <= self.journal.len(period, account),
            "claim cursor never passes the journal length"
        );
        self.claim_progress
            .entry(period)
            .or_default()
            .insert(account.to_string(), count);
    }

    /// Iterate all (period, account, processed) cursors, for snapshotting.
    pub fn claim_cursors(&self) -> impl Iterator<Item = (u64, &str, usize)> {
        self.claim_progress.iter().flat_map(|(period, accounts)| {
            accounts
                .iter()
                .map(move |(account, processed)| (*period, account.as_str(), *processed))
        })
    }

    // ========================================================================
    // Balances
    // ========================================================================

    /// Reward-token units available for payouts.
    pub fn prize_pool(&self) -> i64 {
        self.prize_pool
    }

    /// Credit the prize pool.
    ///
    /// # Panics
    /// Panics on non-positive amounts.
    pub fn credit_prize_pool(&mut self, amount: i64) {
        assert!(amount > 0, "pool credit must be positive");
        self.prize_pool += amount;
    }

    /// Debit the prize pool.
    ///
    /// # Panics
    /// Panics if the debit is non-positive or exceeds the pool. Callers
    /// check sufficiency and reject with a typed error first.
    pub fn debit_prize_pool(&mut self, amount: i64) {
        assert!(amount > 0, "pool debit must be positive");
        assert!(amount <= self.prize_pool, "pool debit exceeds pool");
        self.prize_pool -= amount;
    }

    /// Base tokens retained from drawn periods and exchanges.
    pub fn stored_base_tokens(&self) -> i64 {
        self.stored_base_tokens
    }

    /// Credit the stored base-token balance.
    ///
    /// # Panics
    /// Panics on negative amounts (zero is allowed: a drawn period with no
    /// sales contributes nothing).
    pub fn credit_stored_base(&mut self, amount: i64) {
        assert!(amount >= 0, "stored-base credit must be non-negative");
        self.stored_base_tokens += amount;
    }

    /// Base tokens accrued as platform fees.
    pub fn accrued_fees(&self) -> i64 {
        self.accrued_fees
    }

    /// Accrue platform fees.
    ///
    /// # Panics
    /// Panics on negative amounts.
    pub fn accrue_fees(&mut self, amount: i64) {
        assert!(amount >= 0, "fee accrual must be non-negative");
        self.accrued_fees += amount;
    }

    /// Take the full accrued fee balance, resetting it to zero.
    pub fn take_accrued_fees(&mut self) -> i64 {
        std::mem::take(&mut self.accrued_fees)
    }

    /// Restore balances from snapshot fields (checkpoint restoration).
    ///
    /// # Panics
    /// Panics on negative balances.
    pub fn restore_balances(&mut self, prize_pool: i64, stored_base: i64, accrued_fees: i64) {
        assert!(prize_pool >= 0, "prize pool must be non-negative");
        assert!(stored_base >= 0, "stored base must be non-negative");
        assert!(accrued_fees >= 0, "accrued fees must be non-negative");
        self.prize_pool = prize_pool;
        self.stored_base_tokens = stored_base;
        self.accrued_fees = accrued_fees;
    }

    // ========================================================================
    // Emission and counters
    // ========================================================================

    /// Emission schedule and counters.
    pub fn emission(&self) -> &EmissionLedger {
        &self.emission
    }

    /// Mutable access to the emission ledger.
    pub fn emission_mut(&mut self) -> &mut EmissionLedger {
        &mut self.emission
    }

    /// Replace the emission ledger (checkpoint restoration).
    pub fn restore_emission(&mut self, emission: EmissionLedger) {
        self.emission = emission;
    }

    /// Count of bet records placed across all periods.
    pub fn total_bets(&self) -> u64 {
        self.total_bets
    }

    /// Record one more placed bet.
    pub fn record_bet_placed(&mut self) {
        self.total_bets += 1;
    }

    /// Force the placed-bet counter (checkpoint restoration).
    pub fn set_total_bets(&mut self, total: u64) {
        self.total_bets = total;
    }

    // ========================================================================
    // Randomness requests
    // ========================================================================

    /// Register an outstanding randomness request.
    ///
    /// # Panics
    /// Panics on duplicate request ids.
    pub fn register_request(&mut self, request_id: &str, period: u64) {
        let previous = self.pending_requests.insert(request_id.to_string(), period);
        assert!(
            previous.is_none(),
            "randomness request {} registered twice",
            request_id
        );
    }

    /// Look up the period an outstanding request targets, without
    /// consuming it.
    pub fn pending_request_period(&self, request_id: &str) -> Option<u64> {
        self.pending_requests.get(request_id).copied()
    }

    /// Consume a randomness request, returning its period.
    ///
    /// Returns `None` for unknown or already-consumed ids.
    pub fn take_request(&mut self, request_id: &str) -> Option<u64> {
        self.pending_requests.remove(request_id)
    }

    /// Iterate outstanding (request id, period) pairs, for snapshotting.
    pub fn pending_requests(&self) -> impl Iterator<Item = (&str, u64)> {
        self.pending_requests
            .iter()
            .map(|(id, period)| (id.as_str(), *period))
    }

    // ========================================================================
    // Pause flag
    // ========================================================================

    /// Whether wagering and draws are paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set the pause flag.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
