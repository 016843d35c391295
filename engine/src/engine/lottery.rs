//! Lottery engine
//!
//! The orchestrator tying all components together. One `LotteryEngine` owns
//! the ledger state, the two token collaborators, the randomness strategy,
//! and the event log, and exposes every external operation:
//!
//! ```text
//! place_wager ---> period sales + journal + emission mint into pool
//! request_draw --> randomness strategy --> resolve (inline or via oracle)
//! fulfill_randomness --> resolve: outcome + sales split + next period
//! claim ---------> bounded journal scan --> evaluator --> pool debit
//! donate/exchange > pool credits and debits
//! admin ops -----> pause/resume, platform wallet, fee withdrawal
//! ```
//!
//! # Execution model
//!
//! Operations are serialized and all-or-nothing. Every state-mutating
//! operation takes `&mut self`: the exclusive borrow is the non-reentrant
//! lock, so nothing the engine calls can re-enter it mid-operation. Each
//! operation performs all validation and fallible external transfers before
//! its first infallible ledger mutation, so a rejected operation leaves no
//! partial state behind.

use crate::emission::EmissionConfig;
use crate::error::{
    AuthorizationError, ConfigError, EngineError, InvariantViolation, StateError, ValidationError,
};
use crate::models::bet::{
    Bet, MAX_MULTIPLIER, MAX_NUMBER, MAX_NUMBERS_PER_BET, MIN_MULTIPLIER, MIN_NUMBERS_PER_BET,
};
use crate::models::event::{Event, EventLog};
use crate::models::period::PeriodPhase;
use crate::models::state::LedgerState;
use crate::payout::PrizeTable;
use crate::randomness::{
    BlockHashRandomness, DrawContext, DrawRequest, DrawTicket, OracleRandomness, RandomnessSource,
};
use crate::settlement::{apply_claim, prepare_claim};
use crate::token::TokenLedger;
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Types
// ============================================================================

/// Randomness strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomnessConfig {
    /// Synchronous digest of host block data. Draws resolve in the
    /// requesting call. Not adversarially safe: the draw caller can
    /// precompute the outcome. Fallback for hosts without an oracle.
    BlockHash,

    /// Asynchronous commit/callback via an external randomness oracle.
    /// Preferred for production fairness.
    Oracle,
}

/// Complete engine configuration.
///
/// # Fields
///
/// * `engine_id` - Identity of this engine instance; doubles as its custody
///   account on both token ledgers and as a digest input for the
///   synchronous randomness strategy
/// * `owner` / `platform_wallet` - The two identities with administrative
///   capability
/// * `oracle_id` - The only identity allowed to fulfill randomness requests
/// * `ticket_unit_cost` - Base-token cost per chosen number per multiplier
///   unit
/// * `prizes` - Payout table for the outcome evaluator
/// * `rollover_ratio` - Per-mille share of a drawn period's sales retained
///   as stored base tokens; the remainder accrues as platform fees
/// * `exchange_rate` - Reward units paid per base unit in an exchange
/// * `max_claim_batch` - Upper bound on claim batch sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub engine_id: String,
    pub owner: String,
    pub platform_wallet: String,
    pub oracle_id: String,
    pub ticket_unit_cost: i64,
    pub prizes: PrizeTable,
    pub rollover_ratio: i64,
    pub exchange_rate: i64,
    pub max_claim_batch: usize,
    pub emission: EmissionConfig,
    pub randomness: RandomnessConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_id: "lottery-pool".to_string(),
            owner: "owner".to_string(),
            platform_wallet: "platform".to_string(),
            oracle_id: "oracle".to_string(),
            ticket_unit_cost: 1_000,
            prizes: PrizeTable::default(),
            rollover_ratio: 800,
            exchange_rate: 1,
            max_claim_batch: 50,
            emission: EmissionConfig::default(),
            randomness: RandomnessConfig::Oracle,
        }
    }
}

// ============================================================================
// Receipts and read views
// ============================================================================

/// Result of placing a wager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WagerReceipt {
    /// Period the bet entered
    pub period: u64,

    /// Index of the bet in the account's journal for that period
    pub bet_index: usize,

    /// Base tokens pulled as payment
    pub cost: i64,

    /// Reward tokens minted into the prize pool for this wager
    pub reward_minted: i64,
}

/// Result of a draw resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawResolution {
    /// Period that was resolved
    pub period: u64,

    /// Winning outcome in [0, 999]
    pub outcome: u16,

    /// Sales share credited to stored base tokens
    pub pool_share: i64,

    /// Sales share accrued as platform fees
    pub fee_share: i64,
}

/// What `request_draw` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Synchronous strategy: the draw resolved in this call
    Resolved(DrawResolution),

    /// Asynchronous strategy: the oracle will fulfill this request id
    Pending { request_id: String },
}

/// Result of one claim batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    /// Period claimed against
    pub period: u64,

    /// Reward tokens paid out for this batch
    pub winnings_paid: i64,

    /// First journal index this batch covered
    pub processed_from: usize,

    /// New cursor position (one past the last covered index)
    pub processed_through: usize,

    /// Total bets the account holds in the period
    pub total_bets: usize,

    /// Whether the account's journal for the period is now fully processed
    pub is_completed: bool,
}

/// Result of an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeReceipt {
    /// Base tokens paid in
    pub base_in: i64,

    /// Reward tokens received from the pool
    pub reward_out: i64,
}

/// Per-account claim progress for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimProgress {
    /// Leading journal entries already settled
    pub processed: usize,

    /// Total bets the account holds in the period
    pub total: usize,

    /// Whether settlement has covered the whole journal
    pub is_completed: bool,
}

/// Public status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStatus {
    pub current_period: u64,
    pub phase: PeriodPhase,
    pub paused: bool,
    pub total_bets: u64,
    pub prize_pool: i64,
    pub stored_base_tokens: i64,
    pub accrued_fees: i64,
    pub total_reward_minted: i64,
    pub total_bet_units: u64,
    pub reward_per_unit: i64,
}

// ============================================================================
// Engine
// ============================================================================

/// The lottery settlement engine.
///
/// # Example
///
/// ```rust
/// use lottery_core_rs::engine::{DrawOutcome, EngineConfig, LotteryEngine, RandomnessConfig};
/// use lottery_core_rs::randomness::DrawContext;
/// use lottery_core_rs::token::{InMemoryToken, TokenLedger};
///
/// let config = EngineConfig {
///     randomness: RandomnessConfig::BlockHash,
///     ..EngineConfig::default()
/// };
///
/// let mut base = InMemoryToken::new();
/// base.mint("alice", 1_000_000).unwrap();
/// base.approve("alice", "lottery-pool", 1_000_000);
///
/// let mut engine =
///     LotteryEngine::new(config, Box::new(base), Box::new(InMemoryToken::new())).unwrap();
///
/// engine.place_wager("alice", &[123, 456], 2).unwrap();
///
/// let ctx = DrawContext { previous_block_id: [9u8; 32], timestamp: 1 };
/// let outcome = engine.request_draw("owner", &ctx).unwrap();
/// assert!(matches!(outcome, DrawOutcome::Resolved(_)));
/// assert_eq!(engine.status().current_period, 2);
/// ```
pub struct LotteryEngine {
    /// Ledger state (periods, journal, pool, emission, cursors)
    state: LedgerState,

    /// Engine configuration
    config: EngineConfig,

    /// Randomness strategy
    randomness: Box<dyn RandomnessSource>,

    /// Base (payment) token collaborator
    base_token: Box<dyn TokenLedger>,

    /// Reward token collaborator
    reward_token: Box<dyn TokenLedger>,

    /// Audit log of committed operations
    event_log: EventLog,
}

impl std::fmt::Debug for LotteryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LotteryEngine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("event_log", &self.event_log)
            .finish_non_exhaustive()
    }
}

impl LotteryEngine {
    /// Create a new engine from configuration and token collaborators.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the configuration fails validation.
    pub fn new(
        config: EngineConfig,
        base_token: Box<dyn TokenLedger>,
        reward_token: Box<dyn TokenLedger>,
    ) -> Result<Self, ConfigError> {
        Self::validate_config(&config)?;
        let state = LedgerState::new(config.emission.clone());
        Ok(Self::assemble(config, state, base_token, reward_token))
    }

    /// Assemble an engine around an existing state (fresh or restored).
    pub(crate) fn assemble(
        config: EngineConfig,
        state: LedgerState,
        base_token: Box<dyn TokenLedger>,
        reward_token: Box<dyn TokenLedger>,
    ) -> Self {
        let randomness: Box<dyn RandomnessSource> = match config.randomness {
            RandomnessConfig::BlockHash => Box::new(BlockHashRandomness::new()),
            RandomnessConfig::Oracle => Box::new(OracleRandomness::new()),
        };
        Self {
            state,
            config,
            randomness,
            base_token,
            reward_token,
            event_log: EventLog::new(),
        }
    }

    /// Validate a configuration.
    pub(crate) fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
        if config.engine_id.is_empty()
            || config.owner.is_empty()
            || config.platform_wallet.is_empty()
            || config.oracle_id.is_empty()
        {
            return Err(ConfigError::Invalid(
                "identity fields must be non-empty".to_string(),
            ));
        }
        if config.ticket_unit_cost <= 0 {
            return Err(ConfigError::Invalid(
                "ticket_unit_cost must be > 0".to_string(),
            ));
        }
        if config.prizes.base_prize <= 0 || config.prizes.consolation_prize < 0 {
            return Err(ConfigError::Invalid(
                "base_prize must be > 0 and consolation_prize >= 0".to_string(),
            ));
        }
        if !(0..=1000).contains(&config.rollover_ratio) {
            return Err(ConfigError::Invalid(
                "rollover_ratio must be in [0, 1000] per mille".to_string(),
            ));
        }
        if config.exchange_rate <= 0 {
            return Err(ConfigError::Invalid(
                "exchange_rate must be > 0".to_string(),
            ));
        }
        if config.max_claim_batch == 0 {
            return Err(ConfigError::Invalid(
                "max_claim_batch must be > 0".to_string(),
            ));
        }
        if config.emission.halving_interval == 0 {
            return Err(ConfigError::Invalid(
                "emission.halving_interval must be > 0".to_string(),
            ));
        }
        if config.emission.initial_reward < 0 || config.emission.max_reward_supply < 0 {
            return Err(ConfigError::Invalid(
                "emission amounts must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The ledger state.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The audit event log.
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// The base token ledger.
    pub fn base_token(&self) -> &dyn TokenLedger {
        self.base_token.as_ref()
    }

    /// Mutable base token ledger.
    ///
    /// Primarily for hosts and tests funding accounts; engine invariants do
    /// not cover direct token mutation.
    pub fn base_token_mut(&mut self) -> &mut dyn TokenLedger {
        self.base_token.as_mut()
    }

    /// The reward token ledger.
    pub fn reward_token(&self) -> &dyn TokenLedger {
        self.reward_token.as_ref()
    }

    /// Mutable reward token ledger.
    ///
    /// Primarily for hosts and tests funding accounts; engine invariants do
    /// not cover direct token mutation.
    pub fn reward_token_mut(&mut self) -> &mut dyn TokenLedger {
        self.reward_token.as_mut()
    }

    // ========================================================================
    // Wagering
    // ========================================================================

    /// Place a wager in the current open period.
    ///
    /// Pulls `numbers.len() x ticket_unit_cost x multiplier` base tokens
    /// from the caller (who must have approved the engine's custody
    /// account), mints the emission reward into the prize pool, and appends
    /// the bet to the journal.
    pub fn place_wager(
        &mut self,
        caller: &str,
        numbers: &[u16],
        multiplier: u16,
    ) -> Result<WagerReceipt, EngineError> {
        if self.state.is_paused() {
            return Err(StateError::Paused.into());
        }
        let period = self.state.current_period();
        if self.state.current_phase() != PeriodPhase::Open {
            return Err(StateError::PeriodNotOpen { period }.into());
        }

        if !(MIN_NUMBERS_PER_BET..=MAX_NUMBERS_PER_BET).contains(&numbers.len()) {
            return Err(ValidationError::NumberCountOutOfRange {
                count: numbers.len(),
            }
            .into());
        }
        if let Some(number) = numbers.iter().copied().find(|n| *n > MAX_NUMBER) {
            return Err(ValidationError::NumberOutOfRange { number }.into());
        }
        if !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&multiplier) {
            return Err(ValidationError::MultiplierOutOfRange { multiplier }.into());
        }

        let cost = numbers.len() as i64 * self.config.ticket_unit_cost * i64::from(multiplier);
        let units = numbers.len() as u64 * u64::from(multiplier);

        // Payment first: the one failure a caller can cause happens before
        // anything else moves.
        self.base_token
            .transfer_from(&self.config.engine_id, caller, &self.config.engine_id, cost)?;

        // Emission mint; the clamp makes the cap guard unreachable, and the
        // reward token's own cap must dominate the emission cap.
        let reward_minted = self
            .state
            .emission_mut()
            .mint_for_units(units)
            .map_err(InvariantViolation::from)?;
        if reward_minted > 0 {
            self.reward_token.mint(&self.config.engine_id, reward_minted)?;
            self.state.credit_prize_pool(reward_minted);
        }

        self.state.current_period_mut().add_sales(cost);
        let bet_index = self
            .state
            .journal_mut()
            .append(period, caller, Bet::new(numbers.to_vec(), multiplier));
        self.state.record_bet_placed();

        self.event_log.log(Event::WagerPlaced {
            period,
            account: caller.to_string(),
            numbers: numbers.len(),
            multiplier,
            cost,
            reward_minted,
        });

        Ok(WagerReceipt {
            period,
            bet_index,
            cost,
            reward_minted,
        })
    }

    // ========================================================================
    // Draws
    // ========================================================================

    /// Request the draw for the current period (admin only).
    ///
    /// Under the synchronous strategy the draw resolves in this call; under
    /// the oracle strategy the period moves to pending-randomness and the
    /// returned request id awaits exactly one fulfillment.
    pub fn request_draw(
        &mut self,
        caller: &str,
        context: &DrawContext,
    ) -> Result<DrawOutcome, EngineError> {
        self.require_admin(caller)?;
        if self.state.is_paused() {
            return Err(StateError::Paused.into());
        }
        let period = self.state.current_period();
        match self.state.current_phase() {
            PeriodPhase::Open => {}
            PeriodPhase::PendingRandomness => {
                return Err(StateError::RandomnessAlreadyPending { period }.into())
            }
            PeriodPhase::Drawn => {
                return Err(StateError::PeriodAlreadyDrawn { period }.into())
            }
        }

        let request = DrawRequest {
            period,
            engine_id: &self.config.engine_id,
            caller,
            context,
        };
        match self.randomness.begin_draw(&request) {
            DrawTicket::Immediate { word } => {
                self.event_log.log(Event::DrawRequested {
                    period,
                    request_id: None,
                });
                let resolution = self.resolve_draw(period, word)?;
                Ok(DrawOutcome::Resolved(resolution))
            }
            DrawTicket::Pending { request_id } => {
                self.state.current_period_mut().begin_randomness();
                self.state.register_request(&request_id, period);
                self.event_log.log(Event::DrawRequested {
                    period,
                    request_id: Some(request_id.clone()),
                });
                Ok(DrawOutcome::Pending { request_id })
            }
        }
    }

    /// Deliver the random word for an outstanding request (oracle only).
    ///
    /// Matched back to the originating period through the request mapping;
    /// unknown, already-consumed, or already-resolved requests are rejected.
    /// Arbitrary delay between request and fulfillment is tolerated.
    pub fn fulfill_randomness(
        &mut self,
        caller: &str,
        request_id: &str,
        word: u64,
    ) -> Result<DrawResolution, EngineError> {
        if caller != self.config.oracle_id {
            return Err(AuthorizationError::OracleRequired {
                caller: caller.to_string(),
            }
            .into());
        }
        let Some(period) = self.state.pending_request_period(request_id) else {
            return Err(StateError::UnknownRequest {
                request_id: request_id.to_string(),
            }
            .into());
        };
        if self.state.period(period).map_or(true, |p| p.is_drawn()) {
            return Err(StateError::PeriodAlreadyDrawn { period }.into());
        }
        let _ = self.state.take_request(request_id);
        self.resolve_draw(period, word)
    }

    /// Record the outcome for a period, split its sales, open the next.
    ///
    /// The fee split follows the fee-accrual design: the pool share joins
    /// the stored base-token balance, the platform share accrues until an
    /// admin withdraws it.
    fn resolve_draw(&mut self, period: u64, word: u64) -> Result<DrawResolution, EngineError> {
        let record = self
            .state
            .period_mut(period)
            .expect("resolved period record exists");
        if record.is_drawn() {
            return Err(StateError::PeriodAlreadyDrawn { period }.into());
        }

        let outcome = (word % 1000) as u16;
        record.record_outcome(outcome);
        let sales = record.total_sales();
        let pool_share = sales * self.config.rollover_ratio / 1000;
        let fee_share = sales - pool_share;

        self.state.credit_stored_base(pool_share);
        self.state.accrue_fees(fee_share);
        if period == self.state.current_period() {
            self.state.advance_period();
        }

        self.event_log.log(Event::DrawResolved {
            period,
            outcome,
            pool_share,
            fee_share,
        });

        Ok(DrawResolution {
            period,
            outcome,
            pool_share,
            fee_share,
        })
    }

    // ========================================================================
    // Claims
    // ========================================================================

    /// Settle one batch of the caller's bets for a drawn period.
    ///
    /// Resumable: repeat with successive batches until the receipt reports
    /// completion. Bets already flagged claimed contribute zero. A payout
    /// exceeding the prize pool is an invariant violation and halts the
    /// claim without paying anything.
    pub fn claim(
        &mut self,
        caller: &str,
        period: u64,
        batch_size: usize,
    ) -> Result<ClaimReceipt, EngineError> {
        if batch_size == 0 || batch_size > self.config.max_claim_batch {
            return Err(ValidationError::BatchSizeOutOfRange {
                batch_size,
                max: self.config.max_claim_batch,
            }
            .into());
        }

        let plan = prepare_claim(&self.state, period, caller, batch_size, &self.config.prizes)?;

        if plan.winnings > self.state.prize_pool() {
            return Err(InvariantViolation::PoolInsufficient {
                required: plan.winnings,
                available: self.state.prize_pool(),
            }
            .into());
        }
        if plan.winnings > 0 {
            self.reward_token
                .transfer(&self.config.engine_id, caller, plan.winnings)?;
        }
        apply_claim(&mut self.state, &plan);

        let total_bets = self.state.journal().len(period, caller);
        self.event_log.log(Event::WinningsClaimed {
            period,
            account: caller.to_string(),
            from_index: plan.from_index,
            to_index: plan.to_index,
            amount: plan.winnings,
            completed: plan.is_completed,
        });

        Ok(ClaimReceipt {
            period,
            winnings_paid: plan.winnings,
            processed_from: plan.from_index,
            processed_through: plan.to_index,
            total_bets,
            is_completed: plan.is_completed,
        })
    }

    // ========================================================================
    // Pool operations
    // ========================================================================

    /// Donate reward tokens into the prize pool.
    pub fn donate(&mut self, caller: &str, amount: i64) -> Result<(), EngineError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        self.reward_token.transfer_from(
            &self.config.engine_id,
            caller,
            &self.config.engine_id,
            amount,
        )?;
        self.state.credit_prize_pool(amount);
        self.event_log.log(Event::PoolDonated {
            period: self.state.current_period(),
            account: caller.to_string(),
            amount,
        });
        Ok(())
    }

    /// Exchange base tokens for reward tokens out of the prize pool.
    ///
    /// The caller pays `base_amount` base tokens (joining the stored
    /// base-token balance) and receives `base_amount x exchange_rate`
    /// reward units from the pool.
    pub fn exchange(&mut self, caller: &str, base_amount: i64) -> Result<ExchangeReceipt, EngineError> {
        if base_amount <= 0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        let reward_out = base_amount.saturating_mul(self.config.exchange_rate);
        if reward_out > self.state.prize_pool() {
            return Err(StateError::ExchangeExceedsPool {
                requested: reward_out,
                available: self.state.prize_pool(),
            }
            .into());
        }

        self.base_token.transfer_from(
            &self.config.engine_id,
            caller,
            &self.config.engine_id,
            base_amount,
        )?;
        self.reward_token
            .transfer(&self.config.engine_id, caller, reward_out)?;

        self.state.debit_prize_pool(reward_out);
        self.state.credit_stored_base(base_amount);
        self.event_log.log(Event::RewardsExchanged {
            period: self.state.current_period(),
            account: caller.to_string(),
            base_in: base_amount,
            reward_out,
        });

        Ok(ExchangeReceipt {
            base_in: base_amount,
            reward_out,
        })
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Pause wagering and draws (admin only).
    pub fn pause(&mut self, caller: &str) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        if self.state.is_paused() {
            return Err(StateError::Paused.into());
        }
        self.state.set_paused(true);
        self.event_log.log(Event::Paused {
            period: self.state.current_period(),
        });
        Ok(())
    }

    /// Resume wagering and draws (admin only).
    pub fn resume(&mut self, caller: &str) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        if !self.state.is_paused() {
            return Err(StateError::NotPaused.into());
        }
        self.state.set_paused(false);
        self.event_log.log(Event::Resumed {
            period: self.state.current_period(),
        });
        Ok(())
    }

    /// Change the platform wallet (admin only).
    pub fn set_platform_wallet(&mut self, caller: &str, wallet: &str) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        let previous = std::mem::replace(&mut self.config.platform_wallet, wallet.to_string());
        self.event_log.log(Event::PlatformWalletChanged {
            period: self.state.current_period(),
            previous,
            current: wallet.to_string(),
        });
        Ok(())
    }

    /// Withdraw the accrued fee balance to the platform wallet (admin only).
    ///
    /// Returns the amount withdrawn.
    pub fn withdraw_fees(&mut self, caller: &str) -> Result<i64, EngineError> {
        self.require_admin(caller)?;
        let amount = self.state.accrued_fees();
        if amount == 0 {
            return Err(StateError::NoFeesAccrued.into());
        }
        self.base_token
            .transfer(&self.config.engine_id, &self.config.platform_wallet, amount)?;
        let _ = self.state.take_accrued_fees();
        self.event_log.log(Event::FeesWithdrawn {
            period: self.state.current_period(),
            to: self.config.platform_wallet.clone(),
            amount,
        });
        Ok(amount)
    }

    fn require_admin(&self, caller: &str) -> Result<(), AuthorizationError> {
        if caller == self.config.owner || caller == self.config.platform_wallet {
            Ok(())
        } else {
            Err(AuthorizationError::AdminRequired {
                caller: caller.to_string(),
            })
        }
    }

    // ========================================================================
    // Public reads
    // ========================================================================

    /// Public status snapshot.
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            current_period: self.state.current_period(),
            phase: self.state.current_phase(),
            paused: self.state.is_paused(),
            total_bets: self.state.total_bets(),
            prize_pool: self.state.prize_pool(),
            stored_base_tokens: self.state.stored_base_tokens(),
            accrued_fees: self.state.accrued_fees(),
            total_reward_minted: self.state.emission().total_reward_minted(),
            total_bet_units: self.state.emission().total_bet_units(),
            reward_per_unit: self.state.emission().reward_per_unit(),
        }
    }

    /// An account's bets in a period, in insertion order.
    pub fn bets_of(&self, period: u64, account: &str) -> &[Bet] {
        self.state.journal().bets_of(period, account)
    }

    /// An account's claim progress for a period.
    pub fn claim_progress(&self, period: u64, account: &str) -> ClaimProgress {
        let total = self.state.journal().len(period, account);
        let processed = self.state.processed_count(period, account);
        ClaimProgress {
            processed,
            total,
            is_completed: total > 0 && processed >= total,
        }
    }
}
