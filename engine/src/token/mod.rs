//! Fungible-token collaborator
//!
//! The engine consumes token mechanics through the [`TokenLedger`] trait:
//! transfers for wager payment and payouts, allowance-checked pulls for
//! deposits, and cap-checked minting for the reward token. The host decides
//! what stands behind the trait; [`InMemoryToken`] is the in-crate
//! implementation used by the CLI and tests.
//!
//! # Critical Invariants
//!
//! 1. **Atomicity**: debit and credit happen together, or neither
//! 2. **Conservation**: transfers never change total supply
//! 3. **Cap**: mints never push total supply past the configured cap
//!
//! CRITICAL: All money values are i64 (minor units)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during token operations.
#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: i64, approved: i64 },

    #[error("mint of {requested} would exceed supply cap: remaining {remaining}")]
    CapExceeded { requested: i64, remaining: i64 },

    #[error("token amount must be positive")]
    NonPositiveAmount,
}

/// Fungible-token capability set the engine consumes.
///
/// Authorization is the host's concern: the engine is handed ledgers it is
/// entitled to operate (custody transfers out of its own account, mints for
/// the reward token it controls).
pub trait TokenLedger {
    /// Move `amount` from `from` to `to`.
    fn transfer(&mut self, from: &str, to: &str, amount: i64) -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance `from` granted to `spender`.
    fn transfer_from(
        &mut self,
        spender: &str,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<(), TokenError>;

    /// Set the allowance `owner` grants `spender`.
    fn approve(&mut self, owner: &str, spender: &str, amount: i64);

    /// Remaining allowance `owner` has granted `spender`.
    fn allowance(&self, owner: &str, spender: &str) -> i64;

    /// Balance of an account (zero for unknown accounts).
    fn balance_of(&self, account: &str) -> i64;

    /// Create `amount` new tokens in `to`, subject to the supply cap.
    fn mint(&mut self, to: &str, amount: i64) -> Result<(), TokenError>;

    /// Total tokens in existence.
    fn total_supply(&self) -> i64;
}

/// In-memory token ledger.
///
/// # Example
/// ```
/// use lottery_core_rs::token::{InMemoryToken, TokenLedger};
///
/// let mut token = InMemoryToken::new();
/// token.mint("alice", 1_000).unwrap();
/// token.transfer("alice", "bob", 400).unwrap();
///
/// assert_eq!(token.balance_of("alice"), 600);
/// assert_eq!(token.balance_of("bob"), 400);
/// assert_eq!(token.total_supply(), 1_000);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryToken {
    /// account -> balance
    balances: HashMap<String, i64>,

    /// owner -> spender -> remaining allowance
    allowances: HashMap<String, HashMap<String, i64>>,

    /// Total tokens in existence
    total_supply: i64,

    /// Hard cap on total supply; `None` means uncapped
    supply_cap: Option<i64>,
}

impl InMemoryToken {
    /// Create an uncapped token with no balances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token whose total supply may never exceed `cap`.
    ///
    /// # Panics
    /// Panics if `cap` is negative.
    pub fn with_supply_cap(cap: i64) -> Self {
        assert!(cap >= 0, "supply cap must be non-negative");
        Self {
            supply_cap: Some(cap),
            ..Self::default()
        }
    }

    /// The configured supply cap, if any.
    pub fn supply_cap(&self) -> Option<i64> {
        self.supply_cap
    }

    fn debit(&mut self, account: &str, amount: i64) -> Result<(), TokenError> {
        let balance = self.balances.entry(account.to_string()).or_insert(0);
        if *balance < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        Ok(())
    }

    fn credit(&mut self, account: &str, amount: i64) {
        *self.balances.entry(account.to_string()).or_insert(0) += amount;
    }
}

impl TokenLedger for InMemoryToken {
    fn transfer(&mut self, from: &str, to: &str, amount: i64) -> Result<(), TokenError> {
        if amount <= 0 {
            return Err(TokenError::NonPositiveAmount);
        }
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &str,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<(), TokenError> {
        if amount <= 0 {
            return Err(TokenError::NonPositiveAmount);
        }
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                required: amount,
                approved,
            });
        }
        // Balance check happens before the allowance is consumed so a failed
        // transfer leaves the allowance untouched.
        self.debit(from, amount)?;
        self.credit(to, amount);
        if let Some(spenders) = self.allowances.get_mut(from) {
            if let Some(remaining) = spenders.get_mut(spender) {
                *remaining -= amount;
            }
        }
        Ok(())
    }

    fn approve(&mut self, owner: &str, spender: &str, amount: i64) {
        self.allowances
            .entry(owner.to_string())
            .or_default()
            .insert(spender.to_string(), amount);
    }

    fn allowance(&self, owner: &str, spender: &str) -> i64 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    fn balance_of(&self, account: &str) -> i64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn mint(&mut self, to: &str, amount: i64) -> Result<(), TokenError> {
        if amount <= 0 {
            return Err(TokenError::NonPositiveAmount);
        }
        if let Some(cap) = self.supply_cap {
            let remaining = cap - self.total_supply;
            if amount > remaining {
                return Err(TokenError::CapExceeded {
                    requested: amount,
                    remaining,
                });
            }
        }
        self.total_supply += amount;
        self.credit(to, amount);
        Ok(())
    }

    fn total_supply(&self) -> i64 {
        self.total_supply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_conserves_supply() {
        let mut token = InMemoryToken::new();
        token.mint("a", 500).unwrap();
        token.transfer("a", "b", 200).unwrap();
        assert_eq!(token.balance_of("a") + token.balance_of("b"), 500);
        assert_eq!(token.total_supply(), 500);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut token = InMemoryToken::new();
        token.mint("a", 100).unwrap();
        let err = token.transfer("a", "b", 101).unwrap_err();
        assert_eq!(
            err,
            TokenError::InsufficientBalance {
                required: 101,
                available: 100
            }
        );
        // No partial movement.
        assert_eq!(token.balance_of("a"), 100);
        assert_eq!(token.balance_of("b"), 0);
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let mut token = InMemoryToken::new();
        token.mint("owner", 1_000).unwrap();
        token.approve("owner", "spender", 300);

        token
            .transfer_from("spender", "owner", "sink", 200)
            .unwrap();
        assert_eq!(token.allowance("owner", "spender"), 100);
        assert_eq!(token.balance_of("sink"), 200);

        let err = token
            .transfer_from("spender", "owner", "sink", 200)
            .unwrap_err();
        assert_eq!(
            err,
            TokenError::InsufficientAllowance {
                required: 200,
                approved: 100
            }
        );
    }

    #[test]
    fn test_failed_transfer_from_preserves_allowance() {
        let mut token = InMemoryToken::new();
        token.mint("owner", 50).unwrap();
        token.approve("owner", "spender", 100);

        let err = token
            .transfer_from("spender", "owner", "sink", 80)
            .unwrap_err();
        assert!(matches!(err, TokenError::InsufficientBalance { .. }));
        assert_eq!(token.allowance("owner", "spender"), 100);
    }

    #[test]
    fn test_mint_respects_cap() {
        let mut token = InMemoryToken::with_supply_cap(1_000);
        token.mint("a", 900).unwrap();
        let err = token.mint("a", 101).unwrap_err();
        assert_eq!(
            err,
            TokenError::CapExceeded {
                requested: 101,
                remaining: 100
            }
        );
        token.mint("a", 100).unwrap();
        assert_eq!(token.total_supply(), 1_000);
    }

    #[test]
    fn test_zero_amounts_rejected() {
        let mut token = InMemoryToken::new();
        assert_eq!(
            token.transfer("a", "b", 0).unwrap_err(),
            TokenError::NonPositiveAmount
        );
        assert_eq!(
            token.mint("a", 0).unwrap_err(),
            TokenError::NonPositiveAmount
        );
    }
}
