//! Period model
//!
//! A period is one discrete wagering round. It accumulates ticket sales while
//! open, transitions through an optional pending-randomness stage, and is
//! frozen forever once a winning outcome is recorded.
//!
//! # Lifecycle
//!
//! ```text
//! Open --> PendingRandomness --> Drawn        (asynchronous draw)
//! Open -----------------------> Drawn        (synchronous draw)
//! ```
//!
//! # Critical Invariants
//!
//! 1. `total_sales` only grows while the period is undrawn
//! 2. `winning_outcome` and the drawn flag are set exactly once, never reset
//! 3. At most one randomness request is outstanding per period

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodPhase {
    /// Accepting wagers
    Open,

    /// Draw requested, waiting for randomness fulfillment
    PendingRandomness,

    /// Outcome recorded; immutable except for reads during claims
    Drawn,
}

/// One wagering round: sales total, outcome, lifecycle flags.
///
/// # Example
/// ```
/// use lottery_core_rs::{Period, PeriodPhase};
///
/// let mut period = Period::new();
/// assert_eq!(period.phase(), PeriodPhase::Open);
///
/// period.add_sales(5_000);
/// period.record_outcome(123);
/// assert_eq!(period.phase(), PeriodPhase::Drawn);
/// assert_eq!(period.winning_outcome(), Some(123));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Cumulative wager cost collected while open (i64 minor units)
    total_sales: i64,

    /// Winning outcome in [0, 999], recorded exactly once
    winning_outcome: Option<u16>,

    /// Whether the outcome has been recorded
    drawn: bool,

    /// Whether a randomness request is outstanding
    randomness_pending: bool,
}

impl Period {
    /// Create a fresh open period with no sales.
    pub fn new() -> Self {
        Self {
            total_sales: 0,
            winning_outcome: None,
            drawn: false,
            randomness_pending: false,
        }
    }

    /// Restore a period from snapshot fields (checkpoint restoration).
    ///
    /// # Panics
    /// Panics if the fields are mutually inconsistent: a drawn period must
    /// carry an in-range outcome and no pending request, an undrawn one must
    /// carry no outcome.
    pub fn from_snapshot(
        total_sales: i64,
        winning_outcome: Option<u16>,
        drawn: bool,
        randomness_pending: bool,
    ) -> Self {
        assert!(total_sales >= 0, "total_sales must be non-negative");
        assert_eq!(
            drawn,
            winning_outcome.is_some(),
            "drawn flag must match outcome presence"
        );
        assert!(
            winning_outcome.map_or(true, |o| o <= 999),
            "winning outcome must be in [0, 999]"
        );
        assert!(
            !(drawn && randomness_pending),
            "a drawn period cannot have a pending request"
        );
        Self {
            total_sales,
            winning_outcome,
            drawn,
            randomness_pending,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PeriodPhase {
        if self.drawn {
            PeriodPhase::Drawn
        } else if self.randomness_pending {
            PeriodPhase::PendingRandomness
        } else {
            PeriodPhase::Open
        }
    }

    /// Cumulative ticket sales (minor units).
    pub fn total_sales(&self) -> i64 {
        self.total_sales
    }

    /// Winning outcome, `None` until drawn.
    pub fn winning_outcome(&self) -> Option<u16> {
        self.winning_outcome
    }

    /// Whether the outcome has been recorded.
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// Whether a randomness request is outstanding.
    pub fn is_randomness_pending(&self) -> bool {
        self.randomness_pending
    }

    /// Add wager cost to the sales total.
    ///
    /// # Panics
    /// Panics if the period is already drawn (sales are frozen) or the
    /// amount is not positive. Callers gate on [`Period::phase`] first.
    pub fn add_sales(&mut self, amount: i64) {
        assert!(!self.drawn, "sales are frozen once a period is drawn");
        assert!(amount > 0, "sales amount must be positive");
        self.total_sales += amount;
    }

    /// Mark a randomness request as outstanding.
    ///
    /// # Panics
    /// Panics if the period is drawn or a request is already outstanding.
    /// The engine rejects those cases as state errors before reaching here.
    pub fn begin_randomness(&mut self) {
        assert!(!self.drawn, "cannot request randomness for a drawn period");
        assert!(
            !self.randomness_pending,
            "randomness already requested for this period"
        );
        self.randomness_pending = true;
    }

    /// Record the winning outcome and freeze the period.
    ///
    /// Clears any pending-randomness marker: the request that produced this
    /// outcome is consumed by it.
    ///
    /// # Panics
    /// Panics if the period is already drawn or the outcome exceeds 999.
    /// The engine rejects a second resolution as a state error before
    /// reaching here.
    pub fn record_outcome(&mut self, outcome: u16) {
        assert!(!self.drawn, "winning outcome is recorded exactly once");
        assert!(outcome <= 999, "winning outcome must be in [0, 999]");
        self.winning_outcome = Some(outcome);
        self.drawn = true;
        self.randomness_pending = false;
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_period_is_open() {
        let period = Period::new();
        assert_eq!(period.phase(), PeriodPhase::Open);
        assert_eq!(period.total_sales(), 0);
        assert_eq!(period.winning_outcome(), None);
    }

    #[test]
    fn test_pending_randomness_phase() {
        let mut period = Period::new();
        period.begin_randomness();
        assert_eq!(period.phase(), PeriodPhase::PendingRandomness);
    }

    #[test]
    fn test_record_outcome_freezes_period() {
        let mut period = Period::new();
        period.add_sales(1_000);
        period.begin_randomness();
        period.record_outcome(777);

        assert_eq!(period.phase(), PeriodPhase::Drawn);
        assert_eq!(period.winning_outcome(), Some(777));
        assert!(!period.is_randomness_pending());
    }

    #[test]
    #[should_panic(expected = "winning outcome is recorded exactly once")]
    fn test_second_outcome_panics() {
        let mut period = Period::new();
        period.record_outcome(1);
        period.record_outcome(2);
    }

    #[test]
    #[should_panic(expected = "sales are frozen once a period is drawn")]
    fn test_sales_frozen_after_draw() {
        let mut period = Period::new();
        period.record_outcome(42);
        period.add_sales(100);
    }

    #[test]
    #[should_panic(expected = "randomness already requested")]
    fn test_double_randomness_request_panics() {
        let mut period = Period::new();
        period.begin_randomness();
        period.begin_randomness();
    }

    #[test]
    #[should_panic(expected = "drawn flag must match outcome presence")]
    fn test_inconsistent_snapshot_panics() {
        Period::from_snapshot(0, None, true, false);
    }
}
