//! Event logging for audits and replay.
//!
//! Every externally observable state change appends one event. The log
//! enables:
//! - Auditing (verify settlement against the recorded history)
//! - Debugging (understand what happened and in which period)
//! - Analysis (per-account and per-period queries)
//!
//! Events are in-memory and ordered: within one period, events appear in the
//! order the operations committed.

/// A recorded state change.
///
/// All events carry the period that was current when they occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A wager entered the journal
    WagerPlaced {
        period: u64,
        account: String,
        numbers: usize,
        multiplier: u16,
        cost: i64,
        reward_minted: i64,
    },

    /// A draw was requested for the period
    DrawRequested {
        period: u64,
        /// Present for oracle draws, absent for synchronous ones
        request_id: Option<String>,
    },

    /// The period's outcome was recorded and its sales split
    DrawResolved {
        period: u64,
        outcome: u16,
        pool_share: i64,
        fee_share: i64,
    },

    /// A claim batch settled
    WinningsClaimed {
        period: u64,
        account: String,
        from_index: usize,
        to_index: usize,
        amount: i64,
        completed: bool,
    },

    /// Reward tokens were donated into the pool
    PoolDonated {
        period: u64,
        account: String,
        amount: i64,
    },

    /// Base tokens were exchanged for pool reward tokens
    RewardsExchanged {
        period: u64,
        account: String,
        base_in: i64,
        reward_out: i64,
    },

    /// Accrued platform fees were withdrawn
    FeesWithdrawn {
        period: u64,
        to: String,
        amount: i64,
    },

    /// Wagering and draws were paused
    Paused { period: u64 },

    /// Wagering and draws were resumed
    Resumed { period: u64 },

    /// The platform wallet changed
    PlatformWalletChanged {
        period: u64,
        previous: String,
        current: String,
    },
}

impl Event {
    /// The period that was current when the event occurred.
    pub fn period(&self) -> u64 {
        match self {
            Event::WagerPlaced { period, .. } => *period,
            Event::DrawRequested { period, .. } => *period,
            Event::DrawResolved { period, .. } => *period,
            Event::WinningsClaimed { period, .. } => *period,
            Event::PoolDonated { period, .. } => *period,
            Event::RewardsExchanged { period, .. } => *period,
            Event::FeesWithdrawn { period, .. } => *period,
            Event::Paused { period } => *period,
            Event::Resumed { period } => *period,
            Event::PlatformWalletChanged { period, .. } => *period,
        }
    }

    /// Short name of the event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::WagerPlaced { .. } => "WagerPlaced",
            Event::DrawRequested { .. } => "DrawRequested",
            Event::DrawResolved { .. } => "DrawResolved",
            Event::WinningsClaimed { .. } => "WinningsClaimed",
            Event::PoolDonated { .. } => "PoolDonated",
            Event::RewardsExchanged { .. } => "RewardsExchanged",
            Event::FeesWithdrawn { .. } => "FeesWithdrawn",
            Event::Paused { .. } => "Paused",
            Event::Resumed { .. } => "Resumed",
            Event::PlatformWalletChanged { .. } => "PlatformWalletChanged",
        }
    }

    /// The account the event concerns, if any.
    pub fn account(&self) -> Option<&str> {
        match self {
            Event::WagerPlaced { account, .. } => Some(account),
            Event::WinningsClaimed { account, .. } => Some(account),
            Event::PoolDonated { account, .. } => Some(account),
            Event::RewardsExchanged { account, .. } => Some(account),
            Event::FeesWithdrawn { to, .. } => Some(to),
            _ => None,
        }
    }
}

/// Event log: an ordered record of everything the engine committed.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event.
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events logged.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in commit order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events recorded for a specific period.
    pub fn events_for_period(&self, period: u64) -> Vec<&Event> {
        self.events.iter().filter(|e| e.period() == period).collect()
    }

    /// Events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events concerning a specific account.
    pub fn events_for_account(&self, account: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.account() == Some(account))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_query() {
        let mut log = EventLog::new();
        log.log(Event::WagerPlaced {
            period: 1,
            account: "alice".to_string(),
            numbers: 2,
            multiplier: 3,
            cost: 6_000,
            reward_minted: 600,
        });
        log.log(Event::DrawResolved {
            period: 1,
            outcome: 123,
            pool_share: 4_800,
            fee_share: 1_200,
        });
        log.log(Event::Paused { period: 2 });

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_for_period(1).len(), 2);
        assert_eq!(log.events_of_type("DrawResolved").len(), 1);
        assert_eq!(log.events_for_account("alice").len(), 1);
        assert_eq!(log.events()[2].event_type(), "Paused");
    }
}
