//! Wager journal
//!
//! Append-only storage of bet records keyed by (period, account). The journal
//! is the source of truth for settlement: claims scan an account's bets for a
//! period in insertion order, resuming from a stored cursor.
//!
//! # Critical Invariants
//!
//! 1. **Append-only**: bets are never deleted or reordered
//! 2. **Insertion order**: `scan` returns bets exactly as appended
//! 3. The only post-append mutation is the claimed flag, via
//!    [`WagerJournal::bet_mut`] during settlement

use crate::models::bet::Bet;
use std::collections::HashMap;

/// Append-only per (period, account) bet storage.
///
/// # Example
/// ```
/// use lottery_core_rs::{Bet, WagerJournal};
///
/// let mut journal = WagerJournal::new();
/// journal.append(1, "alice", Bet::new(vec![123], 2));
/// journal.append(1, "alice", Bet::new(vec![456, 789], 1));
///
/// assert_eq!(journal.len(1, "alice"), 2);
/// assert_eq!(journal.scan(1, "alice", 0, 10).len(), 2);
/// assert_eq!(journal.len(2, "alice"), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WagerJournal {
    /// period -> account -> bets in insertion order
    bets: HashMap<u64, HashMap<String, Vec<Bet>>>,
}

impl WagerJournal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bet to an account's journal for a period.
    ///
    /// Returns the index the bet was stored at.
    pub fn append(&mut self, period: u64, account: &str, bet: Bet) -> usize {
        let entries = self
            .bets
            .entry(period)
            .or_default()
            .entry(account.to_string())
            .or_default();
        entries.push(bet);
        entries.len() - 1
    }

    /// Number of bets an account placed in a period.
    pub fn len(&self, period: u64, account: &str) -> usize {
        self.account_bets(period, account).len()
    }

    /// Whether an account placed any bets in a period.
    pub fn is_empty(&self, period: u64, account: &str) -> bool {
        self.len(period, account) == 0
    }

    /// Get a bet by index.
    pub fn get(&self, period: u64, account: &str, index: usize) -> Option<&Bet> {
        self.account_bets(period, account).get(index)
    }

    /// Mutable access to a bet, for settlement to set the claimed flag.
    ///
    /// # Panics
    /// Panics if no bet exists at the index. Settlement derives indices from
    /// the same journal in the same call, so a miss is a logic bug.
    pub fn bet_mut(&mut self, period: u64, account: &str, index: usize) -> &mut Bet {
        self.bets
            .get_mut(&period)
            .and_then(|accounts| accounts.get_mut(account))
            .and_then(|entries| entries.get_mut(index))
            .unwrap_or_else(|| {
                panic!(
                    "no bet at index {} for account {} in period {}",
                    index, account, period
                )
            })
    }

    /// Bounded range scan: bets in `[start, end)` in insertion order.
    ///
    /// `end` is clamped to the journal length; a `start` at or past the end
    /// yields an empty slice.
    pub fn scan(&self, period: u64, account: &str, start: usize, end: usize) -> &[Bet] {
        let entries = self.account_bets(period, account);
        let end = end.min(entries.len());
        if start >= end {
            return &[];
        }
        &entries[start..end]
    }

    /// All bets an account placed in a period, in insertion order.
    pub fn bets_of(&self, period: u64, account: &str) -> &[Bet] {
        self.account_bets(period, account)
    }

    /// Iterate every (period, account, bets) entry, for snapshotting.
    pub fn entries(&self) -> impl Iterator<Item = (u64, &str, &[Bet])> {
        self.bets.iter().flat_map(|(period, accounts)| {
            accounts
                .iter()
                .map(move |(account, bets)| (*period, account.as_str(), bets.as_slice()))
        })
    }

    fn account_bets(&self, period: u64, account: &str) -> &[Bet] {
        self.bets
            .get(&period)
            .and_then(|accounts| accounts.get(account))
            .map(|entries| entries.as_slice())
            .unwrap_or(&[])
    }
}
