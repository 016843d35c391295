//! Engine orchestration: configuration, external operations, checkpointing.

pub mod checkpoint;
pub mod lottery;

pub use checkpoint::{
    compute_config_hash, validate_snapshot, CheckpointError, ClaimCursorSnapshot,
    JournalEntrySnapshot, PendingRequestSnapshot, PeriodSnapshot, StateSnapshot,
};
pub use lottery::{
    ClaimProgress, ClaimReceipt, DrawOutcome, DrawResolution, EngineConfig, EngineStatus,
    ExchangeReceipt, LotteryEngine, RandomnessConfig, WagerReceipt,
};
