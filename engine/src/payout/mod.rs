//! Outcome evaluator
//!
//! Pure payout computation: maps a drawn three-digit outcome and a bet record
//! to the bet's total winnings. No state, no side effects; the same inputs
//! always produce the same output.
//!
//! # Prize rules
//!
//! Per chosen number:
//! - Exact match pays `base_prize x multiplier`, doubled when the outcome is
//!   a jackpot (all three digits identical: 000, 111, ... 999).
//! - A digit-permutation match (same digit multiset, different number) pays
//!   `consolation_prize x multiplier`, but only when the outcome has two or
//!   three distinct digits. No other number shares a triple-repeat outcome's
//!   digit multiset, so the consolation path is naturally unreachable there;
//!   the guard keeps that explicit.
//! - Anything else pays zero.
//!
//! Bet winnings are the sum over its chosen numbers.

use crate::models::bet::Bet;
use serde::{Deserialize, Serialize};

/// Prize amounts per winning class (i64 minor units), multiplied by the
/// bet's stake multiplier on every win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTable {
    /// Payout per unit stake for an exact match
    pub base_prize: i64,

    /// Payout per unit stake for a digit-permutation match
    pub consolation_prize: i64,
}

impl Default for PrizeTable {
    fn default() -> Self {
        Self {
            base_prize: 5_200,
            consolation_prize: 20,
        }
    }
}

/// Decompose a number in [0, 999] into its three decimal digits,
/// most significant first.
///
/// # Panics
/// Panics if `number > 999`.
pub fn digits(number: u16) -> [u8; 3] {
    assert!(number <= 999, "number must be in [0, 999]");
    [
        (number / 100) as u8,
        (number / 10 % 10) as u8,
        (number % 10) as u8,
    ]
}

/// The digit multiset of a number, as sorted digits.
fn digit_multiset(number: u16) -> [u8; 3] {
    let mut d = digits(number);
    d.sort_unstable();
    d
}

/// Count of distinct digits in a number: 1, 2, or 3.
pub fn unique_digit_count(number: u16) -> u8 {
    let d = digit_multiset(number);
    1 + u8::from(d[0] != d[1]) + u8::from(d[1] != d[2])
}

/// Whether an outcome is a jackpot: all three digits identical.
pub fn is_jackpot(outcome: u16) -> bool {
    unique_digit_count(outcome) == 1
}

/// Winnings for a single chosen number against a drawn outcome.
///
/// # Example
/// ```
/// use lottery_core_rs::payout::{evaluate_number, PrizeTable};
///
/// let prizes = PrizeTable::default();
/// // Exact match on a jackpot outcome pays double.
/// assert_eq!(evaluate_number(555, 555, 3, &prizes), 5_200 * 3 * 2);
/// // Permutation of a two-distinct-digit outcome wins consolation.
/// assert_eq!(evaluate_number(112, 211, 1, &prizes), 20);
/// // No relation: nothing.
/// assert_eq!(evaluate_number(123, 456, 9, &prizes), 0);
/// ```
pub fn evaluate_number(outcome: u16, chosen: u16, multiplier: u16, prizes: &PrizeTable) -> i64 {
    assert!(outcome <= 999, "outcome must be in [0, 999]");
    assert!(chosen <= 999, "chosen number must be in [0, 999]");
    let multiplier = i64::from(multiplier);

    if chosen == outcome {
        let exact = prizes.base_prize * multiplier;
        return if is_jackpot(outcome) { exact * 2 } else { exact };
    }

    if digit_multiset(chosen) == digit_multiset(outcome) && unique_digit_count(outcome) >= 2 {
        return prizes.consolation_prize * multiplier;
    }

    0
}

/// Total winnings for a bet: the sum over its chosen numbers.
///
/// Pure and reproducible bit-for-bit for a given (outcome, bet) pair.
pub fn evaluate_bet(outcome: u16, bet: &Bet, prizes: &PrizeTable) -> i64 {
    bet.numbers()
        .iter()
        .map(|chosen| evaluate_number(outcome, *chosen, bet.multiplier(), prizes))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(digits(0), [0, 0, 0]);
        assert_eq!(digits(123), [1, 2, 3]);
        assert_eq!(digits(907), [9, 0, 7]);
    }

    #[test]
    fn test_unique_digit_count() {
        assert_eq!(unique_digit_count(777), 1);
        assert_eq!(unique_digit_count(112), 2);
        assert_eq!(unique_digit_count(123), 3);
        assert_eq!(unique_digit_count(0), 1);
    }

    #[test]
    fn test_exact_match_without_jackpot() {
        let prizes = PrizeTable::default();
        assert_eq!(evaluate_number(123, 123, 2, &prizes), 10_400);
    }

    #[test]
    fn test_exact_match_on_jackpot_doubles() {
        let prizes = PrizeTable::default();
        assert_eq!(evaluate_number(555, 555, 3, &prizes), 31_200);
    }

    #[test]
    fn test_permutation_consolation() {
        let prizes = PrizeTable::default();
        assert_eq!(evaluate_number(123, 321, 1, &prizes), 20);
        assert_eq!(evaluate_number(112, 211, 1, &prizes), 20);
    }

    #[test]
    fn test_no_consolation_on_jackpot_outcome() {
        let prizes = PrizeTable::default();
        // Nothing but 111 itself shares 111's digit multiset; every other
        // number loses outright.
        for chosen in 0..=999u16 {
            if chosen == 111 {
                continue;
            }
            assert_eq!(evaluate_number(111, chosen, 1, &prizes), 0);
        }
    }

    #[test]
    fn test_bet_sums_over_numbers() {
        let prizes = PrizeTable::default();
        let bet = Bet::new(vec![123, 321, 999], 2);
        // 123 exact (10_400) + 321 consolation (40) + 999 miss (0)
        assert_eq!(evaluate_bet(123, &bet, &prizes), 10_440);
    }
}
