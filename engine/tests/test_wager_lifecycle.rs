//! Wager placement tests
//!
//! Happy-path accounting plus the rejection matrix: every rejected wager
//! must leave sales, emission, journal, and token balances exactly as they
//! were.

use lottery_core_rs::{
    DrawContext, EngineConfig, EngineError, EngineStatus, InMemoryToken, LotteryEngine,
    RandomnessConfig, StateError, TokenError, TokenLedger, ValidationError,
};

const ENGINE_ID: &str = "lottery-pool";

fn funded_engine() -> LotteryEngine {
    let config = EngineConfig {
        randomness: RandomnessConfig::Oracle,
        ..EngineConfig::default()
    };
    let mut base = InMemoryToken::new();
    for account in ["alice", "bob"] {
        base.mint(account, 100_000_000).unwrap();
        base.approve(account, ENGINE_ID, 100_000_000);
    }
    LotteryEngine::new(config, Box::new(base), Box::new(InMemoryToken::new())).unwrap()
}

fn assert_untouched(engine: &LotteryEngine, before: &EngineStatus, account: &str) {
    let after = engine.status();
    assert_eq!(&after, before, "status moved on a rejected wager");
    assert!(
        engine.bets_of(before.current_period, account).is_empty(),
        "journal moved on a rejected wager"
    );
}

#[test]
fn test_wager_accounting() {
    let mut engine = funded_engine();

    let receipt = engine.place_wager("alice", &[123, 456, 789], 4).unwrap();
    assert_eq!(receipt.period, 1);
    assert_eq!(receipt.bet_index, 0);
    assert_eq!(receipt.cost, 3 * 1_000 * 4);
    assert_eq!(receipt.reward_minted, 12 * 1_000);

    let status = engine.status();
    assert_eq!(status.total_bets, 1);
    assert_eq!(status.total_bet_units, 12);
    assert_eq!(status.prize_pool, 12_000);
    assert_eq!(engine.base_token().balance_of("alice"), 100_000_000 - 12_000);
    assert_eq!(engine.base_token().balance_of(ENGINE_ID), 12_000);

    // A second wager appends behind the first.
    let receipt = engine.place_wager("alice", &[5], 1).unwrap();
    assert_eq!(receipt.bet_index, 1);
    assert_eq!(engine.bets_of(1, "alice").len(), 2);
}

#[test]
fn test_oversized_number_list_rejected() {
    let mut engine = funded_engine();
    let before = engine.status();

    let numbers: Vec<u16> = vec![1; 101];
    let err = engine.place_wager("alice", &numbers, 1).unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation(ValidationError::NumberCountOutOfRange { count: 101 })
    );
    assert_untouched(&engine, &before, "alice");
}

#[test]
fn test_empty_number_list_rejected() {
    let mut engine = funded_engine();
    let before = engine.status();

    let err = engine.place_wager("alice", &[], 1).unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation(ValidationError::NumberCountOutOfRange { count: 0 })
    );
    assert_untouched(&engine, &before, "alice");
}

#[test]
fn test_number_out_of_range_rejected() {
    let mut engine = funded_engine();
    let before = engine.status();

    let err = engine.place_wager("alice", &[999, 1_000], 1).unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation(ValidationError::NumberOutOfRange { number: 1_000 })
    );
    assert_untouched(&engine, &before, "alice");
}

#[test]
fn test_multiplier_bounds_rejected() {
    let mut engine = funded_engine();
    let before = engine.status();

    for multiplier in [0u16, 100] {
        let err = engine.place_wager("alice", &[5], multiplier).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation(ValidationError::MultiplierOutOfRange { multiplier })
        );
    }
    assert_untouched(&engine, &before, "alice");
}

#[test]
fn test_wager_rejected_while_paused() {
    let mut engine = funded_engine();
    engine.pause("owner").unwrap();
    let before = engine.status();

    let err = engine.place_wager("alice", &[5], 1).unwrap_err();
    assert_eq!(err, EngineError::State(StateError::Paused));
    assert_untouched(&engine, &before, "alice");
}

#[test]
fn test_wager_rejected_while_randomness_pending() {
    let mut engine = funded_engine();
    engine.place_wager("bob", &[1], 1).unwrap();

    let ctx = DrawContext {
        previous_block_id: [0u8; 32],
        timestamp: 0,
    };
    engine.request_draw("owner", &ctx).unwrap();
    let before = engine.status();

    let err = engine.place_wager("alice", &[5], 1).unwrap_err();
    assert_eq!(
        err,
        EngineError::State(StateError::PeriodNotOpen { period: 1 })
    );
    assert_untouched(&engine, &before, "alice");
}

#[test]
fn test_unfunded_wager_rejected_without_side_effects() {
    let mut engine = funded_engine();
    let before = engine.status();

    // carol never approved the engine.
    engine.base_token_mut().mint("carol", 1_000_000).unwrap();
    let err = engine.place_wager("carol", &[5], 1).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Token(TokenError::InsufficientAllowance { .. })
    ));
    assert_untouched(&engine, &before, "carol");
    assert_eq!(engine.base_token().balance_of("carol"), 1_000_000);
}
