//! Domain models: bets, periods, events, and the ledger state that owns them.

pub mod bet;
pub mod event;
pub mod period;
pub mod state;

pub use bet::Bet;
pub use event::{Event, EventLog};
pub use period::{Period, PeriodPhase};
pub use state::LedgerState;
