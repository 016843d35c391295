//! Reward emission ledger
//!
//! Tracks cumulative reward-token issuance against a hard supply cap and
//! computes the current per-unit reward under a halving schedule tied to
//! cumulative wager volume:
//!
//! ```text
//! halvings        = total_bet_units / halving_interval
//! reward_per_unit = initial_reward >> halvings      (0 once halvings >= 63)
//! ```
//!
//! The right-shift floors to zero once the halving count exceeds the bit
//! width. That terminal decay is intentional: emission winds down smoothly to
//! nothing rather than stepping to a final nonzero plateau.
//!
//! # Critical Invariants
//!
//! 1. `total_reward_minted` is monotonically non-decreasing
//! 2. `total_reward_minted` never exceeds `max_reward_supply`
//! 3. Mints happen only inside wager placement
//!
//! CRITICAL: All money values are i64 (minor units)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during emission operations.
#[derive(Debug, Error, PartialEq)]
pub enum EmissionError {
    #[error("mint of {requested} would exceed remaining reward supply {remaining}")]
    SupplyExhausted { requested: i64, remaining: i64 },
}

/// Emission schedule parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionConfig {
    /// Reward units minted per bet unit before any halving
    pub initial_reward: i64,

    /// Bet units between halving steps
    pub halving_interval: u64,

    /// Hard cap on cumulative reward issuance (minor units)
    pub max_reward_supply: i64,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self {
            initial_reward: 1_000,
            halving_interval: 1_000_000,
            max_reward_supply: 20_000_000_000,
        }
    }
}

/// Cumulative emission state plus the schedule that governs it.
///
/// # Example
/// ```
/// use lottery_core_rs::{EmissionConfig, EmissionLedger};
///
/// let config = EmissionConfig {
///     initial_reward: 100,
///     halving_interval: 1_000,
///     max_reward_supply: 1_000_000,
/// };
/// let mut emission = EmissionLedger::new(config);
///
/// assert_eq!(emission.reward_per_unit(), 100);
/// let minted = emission.mint_for_units(10).unwrap();
/// assert_eq!(minted, 1_000);
/// assert_eq!(emission.total_bet_units(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionLedger {
    config: EmissionConfig,

    /// Sum of numbers x multiplier across all placed bets
    total_bet_units: u64,

    /// Cumulative reward issuance (monotonic, hard-capped)
    total_reward_minted: i64,
}

impl EmissionLedger {
    /// Create a fresh ledger with nothing minted.
    ///
    /// # Panics
    /// Panics if the schedule is degenerate: a zero halving interval, a
    /// negative initial reward, or a negative supply cap.
    pub fn new(config: EmissionConfig) -> Self {
        assert!(config.halving_interval > 0, "halving_interval must be > 0");
        assert!(config.initial_reward >= 0, "initial_reward must be >= 0");
        assert!(
            config.max_reward_supply >= 0,
            "max_reward_supply must be >= 0"
        );
        Self {
            config,
            total_bet_units: 0,
            total_reward_minted: 0,
        }
    }

    /// Restore ledger counters from snapshot fields (checkpoint restoration).
    ///
    /// # Panics
    /// Panics if the counters violate the supply cap.
    pub fn from_snapshot(
        config: EmissionConfig,
        total_bet_units: u64,
        total_reward_minted: i64,
    ) -> Self {
        assert!(total_reward_minted >= 0, "minted total must be >= 0");
        assert!(
            total_reward_minted <= config.max_reward_supply,
            "minted total exceeds supply cap"
        );
        let mut ledger = Self::new(config);
        ledger.total_bet_units = total_bet_units;
        ledger.total_reward_minted = total_reward_minted;
        ledger
    }

    /// Current reward per bet unit.
    ///
    /// Zero once the supply cap is reached; otherwise the halved initial
    /// reward, clamped so a single unit can never overrun the remaining
    /// supply. Pure: reads state, mutates nothing.
    pub fn reward_per_unit(&self) -> i64 {
        let remaining = self.remaining_supply();
        if remaining == 0 {
            return 0;
        }
        let halvings = self.total_bet_units / self.config.halving_interval;
        let reward = if halvings >= 63 {
            0
        } else {
            self.config.initial_reward >> halvings
        };
        reward.min(remaining)
    }

    /// Mint the reward for a wager of `units` bet units.
    ///
    /// The reward is `reward_per_unit() x units`, clamped to the remaining
    /// supply, and `total_bet_units` advances by `units`. Returns the minted
    /// amount so the caller credits the prize pool by exactly that much.
    ///
    /// The cap guard is defense-in-depth: the clamp makes it unreachable,
    /// and a hit aborts the enclosing wager as an accounting fault.
    pub fn mint_for_units(&mut self, units: u64) -> Result<i64, EmissionError> {
        let remaining = self.remaining_supply();
        let gross = self.reward_per_unit().saturating_mul(units as i64);
        let amount = gross.min(remaining);

        if self.total_reward_minted + amount > self.config.max_reward_supply {
            return Err(EmissionError::SupplyExhausted {
                requested: amount,
                remaining,
            });
        }

        self.total_reward_minted += amount;
        self.total_bet_units += units;
        Ok(amount)
    }

    /// Reward supply still mintable.
    pub fn remaining_supply(&self) -> i64 {
        self.config.max_reward_supply - self.total_reward_minted
    }

    /// Cumulative bet units across all wagers.
    pub fn total_bet_units(&self) -> u64 {
        self.total_bet_units
    }

    /// Cumulative reward issuance.
    pub fn total_reward_minted(&self) -> i64 {
        self.total_reward_minted
    }

    /// Schedule parameters.
    pub fn config(&self) -> &EmissionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_schedule() -> EmissionConfig {
        EmissionConfig {
            initial_reward: 100,
            halving_interval: 10,
            max_reward_supply: 10_000,
        }
    }

    #[test]
    fn test_reward_halves_at_interval() {
        let mut emission = EmissionLedger::new(small_schedule());
        assert_eq!(emission.reward_per_unit(), 100);

        emission.mint_for_units(10).unwrap();
        assert_eq!(emission.reward_per_unit(), 50);

        emission.mint_for_units(10).unwrap();
        assert_eq!(emission.reward_per_unit(), 25);
    }

    #[test]
    fn test_reward_floors_to_zero_after_many_halvings() {
        let config = EmissionConfig {
            initial_reward: 100,
            halving_interval: 1,
            max_reward_supply: i64::MAX,
        };
        let mut emission = EmissionLedger::new(config);
        for _ in 0..100 {
            emission.mint_for_units(1).unwrap();
        }
        assert_eq!(emission.reward_per_unit(), 0);
    }

    #[test]
    fn test_mint_clamps_to_remaining_supply() {
        let config = EmissionConfig {
            initial_reward: 100,
            halving_interval: 1_000,
            max_reward_supply: 150,
        };
        let mut emission = EmissionLedger::new(config);

        // Gross reward would be 200; only 150 remain.
        let minted = emission.mint_for_units(2).unwrap();
        assert_eq!(minted, 150);
        assert_eq!(emission.total_reward_minted(), 150);
        assert_eq!(emission.reward_per_unit(), 0);

        // Further mints are zero-valued but still advance units.
        let minted = emission.mint_for_units(5).unwrap();
        assert_eq!(minted, 0);
        assert_eq!(emission.total_bet_units(), 7);
    }

    #[test]
    fn test_minted_total_is_monotonic() {
        let mut emission = EmissionLedger::new(small_schedule());
        let mut previous = 0;
        for _ in 0..50 {
            emission.mint_for_units(3).unwrap();
            let minted = emission.total_reward_minted();
            assert!(minted >= previous);
            assert!(minted <= emission.config().max_reward_supply);
            previous = minted;
        }
    }

    #[test]
    #[should_panic(expected = "halving_interval must be > 0")]
    fn test_zero_interval_panics() {
        EmissionLedger::new(EmissionConfig {
            initial_reward: 1,
            halving_interval: 0,
            max_reward_supply: 1,
        });
    }
}
