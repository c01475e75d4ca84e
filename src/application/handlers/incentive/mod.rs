//! Incentive command handlers.

mod create_incentive;
mod process_payout;

pub use create_incentive::{
    CreateIncentiveCommand, CreateIncentiveHandler, CreateIncentiveResult,
};
pub use process_payout::{
    PayoutOutcome, ProcessPayoutCommand, ProcessPayoutHandler, ProcessPayoutResult,
};
