//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each handler takes a command plus request metadata, drives one aggregate
//! through its repository, and publishes the resulting domain events.

pub mod handlers;

pub use handlers::{
    // Session handlers
    ExpireSessionCommand, ExpireSessionHandler, ExpireSessionResult,
    GrantBonusCommand, GrantBonusHandler, GrantBonusResult,
    RecordUsageCommand, RecordUsageHandler, RecordUsageResult,
    StartSessionCommand, StartSessionHandler, StartSessionResult,
    // Analytics handlers
    ProcessEventCommand, ProcessEventHandler, ProcessEventResult, ProcessPendingResult,
    TrackEventCommand, TrackEventHandler, TrackEventResult,
    // Incentive handlers
    CreateIncentiveCommand, CreateIncentiveHandler, CreateIncentiveResult,
    PayoutOutcome, ProcessPayoutCommand, ProcessPayoutHandler, ProcessPayoutResult,
};
