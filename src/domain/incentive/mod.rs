//! Incentive domain module.
//!
//! Handles participant payouts: creation, policy validation, payment
//! settlement, and rejection.
//!
//! # Events
//!
//! - `IncentiveCreated` - Published when a new incentive is created
//! - `IncentiveValidated` - Published when policy checks pass
//! - `IncentivePaid` - Published when payment settles
//! - `IncentiveRejected` - Published when the incentive is refused

mod aggregate;
mod events;
mod status;
mod validation;

pub use aggregate::{Incentive, MAX_AMOUNT_CENTS};
pub use events::{
    IncentiveCreated, IncentiveEvent, IncentivePaid, IncentiveRejected, IncentiveValidated,
};
pub use status::IncentiveStatus;
pub use validation::{IncentiveValidation, IncentiveValidationService};
