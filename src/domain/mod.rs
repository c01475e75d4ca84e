//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, events, errors)
//! - `session` - Questionnaire session lifecycle, quotas, and validation
//! - `analytics` - Analytics event records and retention
//! - `incentive` - Participant payouts and payout policy

pub mod analytics;
pub mod foundation;
pub mod incentive;
pub mod session;
