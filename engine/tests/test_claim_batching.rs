//! Claim settlement tests
//!
//! Resumable batching, idempotency, cursor discipline, and the
//! insufficient-pool halt. The batch-by-batch path must pay exactly what a
//! single unbounded pass pays.

use lottery_core_rs::{
    Bet, DrawContext, DrawOutcome, EmissionConfig, EngineConfig, EngineError, InMemoryToken,
    InvariantViolation, LedgerState, LotteryEngine, PrizeTable, RandomnessConfig, StateError,
    TokenLedger, ValidationError,
};
use lottery_core_rs::{apply_claim, prepare_claim};

const ENGINE_ID: &str = "lottery-pool";

fn funded_engine(emission: EmissionConfig) -> LotteryEngine {
    let config = EngineConfig {
        emission,
        randomness: RandomnessConfig::Oracle,
        ..EngineConfig::default()
    };
    let mut base = InMemoryToken::new();
    for account in ["alice", "bob"] {
        base.mint(account, 1_000_000_000).unwrap();
        base.approve(account, ENGINE_ID, 1_000_000_000);
    }
    LotteryEngine::new(config, Box::new(base), Box::new(InMemoryToken::new())).unwrap()
}

/// Place a fixed bet book for alice (seven bets, mixed winners against
/// outcome 123) plus a large losing wager from bob that funds the pool,
/// then resolve period 1 to 123.
fn settled_scenario() -> LotteryEngine {
    let mut engine = funded_engine(EmissionConfig::default());

    engine.place_wager("alice", &[123], 1).unwrap(); // exact: 5_200
    engine.place_wager("alice", &[321], 2).unwrap(); // consolation: 40
    engine.place_wager("alice", &[999], 1).unwrap(); // miss
    engine.place_wager("alice", &[123, 213], 3).unwrap(); // exact + consolation: 15_660
    engine.place_wager("alice", &[42], 1).unwrap(); // miss
    engine.place_wager("alice", &[555], 1).unwrap(); // miss
    engine.place_wager("alice", &[312], 4).unwrap(); // consolation: 80
    engine.place_wager("bob", &[7, 8, 9], 99).unwrap(); // pool funding

    let ctx = DrawContext {
        previous_block_id: [0u8; 32],
        timestamp: 0,
    };
    let DrawOutcome::Pending { request_id } = engine.request_draw("owner", &ctx).unwrap() else {
        panic!("oracle strategy must return a pending ticket");
    };
    engine.fulfill_randomness("oracle", &request_id, 123).unwrap();
    engine
}

const ALICE_TOTAL_WINNINGS: i64 = 5_200 + 40 + 15_660 + 80;

#[test]
fn test_batched_claims_resume_and_complete() {
    let mut engine = settled_scenario();

    let first = engine.claim("alice", 1, 3).unwrap();
    assert_eq!(first.processed_from, 0);
    assert_eq!(first.processed_through, 3);
    assert_eq!(first.winnings_paid, 5_240);
    assert!(!first.is_completed);

    let second = engine.claim("alice", 1, 3).unwrap();
    assert_eq!(second.processed_from, 3);
    assert_eq!(second.processed_through, 6);
    assert_eq!(second.winnings_paid, 15_660);
    assert!(!second.is_completed);

    let third = engine.claim("alice", 1, 3).unwrap();
    assert_eq!(third.processed_from, 6);
    assert_eq!(third.processed_through, 7);
    assert_eq!(third.winnings_paid, 80);
    assert!(third.is_completed);

    assert_eq!(
        engine.reward_token().balance_of("alice"),
        ALICE_TOTAL_WINNINGS
    );
    let progress = engine.claim_progress(1, "alice");
    assert_eq!(progress.processed, 7);
    assert_eq!(progress.total, 7);
    assert!(progress.is_completed);

    // Nothing left: a fourth call is a state error, not a zero payout.
    assert_eq!(
        engine.claim("alice", 1, 3).unwrap_err(),
        EngineError::State(StateError::NothingToProcess {
            period: 1,
            account: "alice".to_string(),
            processed: 7
        })
    );
}

#[test]
fn test_batched_total_equals_single_pass() {
    let mut batched = settled_scenario();
    let mut single = settled_scenario();

    let mut batched_total = 0;
    loop {
        let receipt = batched.claim("alice", 1, 2).unwrap();
        batched_total += receipt.winnings_paid;
        if receipt.is_completed {
            break;
        }
    }

    let receipt = single.claim("alice", 1, 50).unwrap();
    assert!(receipt.is_completed);

    assert_eq!(batched_total, receipt.winnings_paid);
    assert_eq!(batched_total, ALICE_TOTAL_WINNINGS);
    assert_eq!(
        batched.reward_token().balance_of("alice"),
        single.reward_token().balance_of("alice")
    );
    assert_eq!(batched.status().prize_pool, single.status().prize_pool);
}

#[test]
fn test_already_claimed_bets_contribute_zero() {
    // Settlement-level: a journal entry claimed through another path is
    // skipped by the scan, advancing the cursor without paying twice.
    let mut state = LedgerState::new(EmissionConfig::default());
    state.journal_mut().append(1, "alice", Bet::new(vec![123], 1));
    state.journal_mut().append(1, "alice", Bet::new(vec![123], 2));
    state.journal_mut().bet_mut(1, "alice", 0).mark_claimed();
    state.current_period_mut().record_outcome(123);
    state.advance_period();
    state.credit_prize_pool(100_000);

    let prizes = PrizeTable::default();
    let plan = prepare_claim(&state, 1, "alice", 10, &prizes).unwrap();
    assert_eq!(plan.winnings, 5_200 * 2);
    assert_eq!(plan.unclaimed_indices, vec![1]);
    apply_claim(&mut state, &plan);

    assert_eq!(state.processed_count(1, "alice"), 2);
    assert_eq!(state.prize_pool(), 100_000 - 10_400);
}

#[test]
fn test_zero_winning_batches_still_advance() {
    let mut engine = funded_engine(EmissionConfig::default());
    engine.place_wager("alice", &[500], 1).unwrap();
    engine.place_wager("alice", &[501], 1).unwrap();

    let ctx = DrawContext {
        previous_block_id: [0u8; 32],
        timestamp: 0,
    };
    let DrawOutcome::Pending { request_id } = engine.request_draw("owner", &ctx).unwrap() else {
        panic!("oracle strategy must return a pending ticket");
    };
    engine.fulfill_randomness("oracle", &request_id, 123).unwrap();

    let receipt = engine.claim("alice", 1, 10).unwrap();
    assert_eq!(receipt.winnings_paid, 0);
    assert!(receipt.is_completed);
    assert_eq!(engine.reward_token().balance_of("alice"), 0);
    assert_eq!(engine.claim_progress(1, "alice").processed, 2);
}

#[test]
fn test_claim_guards() {
    let mut engine = settled_scenario();

    // Batch bounds.
    assert_eq!(
        engine.claim("alice", 1, 0).unwrap_err(),
        EngineError::Validation(ValidationError::BatchSizeOutOfRange {
            batch_size: 0,
            max: 50
        })
    );
    assert_eq!(
        engine.claim("alice", 1, 51).unwrap_err(),
        EngineError::Validation(ValidationError::BatchSizeOutOfRange {
            batch_size: 51,
            max: 50
        })
    );

    // Undrawn period (period 2 is the open successor).
    assert_eq!(
        engine.claim("alice", 2, 10).unwrap_err(),
        EngineError::State(StateError::PeriodNotDrawn { period: 2 })
    );

    // Unknown period.
    assert_eq!(
        engine.claim("alice", 99, 10).unwrap_err(),
        EngineError::State(StateError::PeriodNotDrawn { period: 99 })
    );

    // Account without bets.
    assert_eq!(
        engine.claim("owner", 1, 10).unwrap_err(),
        EngineError::State(StateError::NoBets {
            period: 1,
            account: "owner".to_string()
        })
    );
}

#[test]
fn test_insufficient_pool_halts_without_partial_payment() {
    // Zero emission: winners exist but the pool holds nothing.
    let mut engine = funded_engine(EmissionConfig {
        initial_reward: 0,
        halving_interval: 1_000_000,
        max_reward_supply: 0,
    });
    engine.place_wager("alice", &[123], 1).unwrap();

    let ctx = DrawContext {
        previous_block_id: [0u8; 32],
        timestamp: 0,
    };
    let DrawOutcome::Pending { request_id } = engine.request_draw("owner", &ctx).unwrap() else {
        panic!("oracle strategy must return a pending ticket");
    };
    engine.fulfill_randomness("oracle", &request_id, 123).unwrap();

    let err = engine.claim("alice", 1, 10).unwrap_err();
    assert_eq!(
        err,
        EngineError::Invariant(InvariantViolation::PoolInsufficient {
            required: 5_200,
            available: 0
        })
    );

    // Halted in full: no cursor movement, no claimed flag, no payout.
    assert_eq!(engine.claim_progress(1, "alice").processed, 0);
    assert!(!engine.bets_of(1, "alice")[0].is_claimed());
    assert_eq!(engine.reward_token().balance_of("alice"), 0);
    assert_eq!(engine.status().prize_pool, 0);
}
