//! Session domain module.
//!
//! Handles the per-IP questionnaire session lifecycle: creation, quota
//! accounting, bonus grants, and expiry.
//!
//! # Events
//!
//! - `SessionCreated` - Published when a new session is opened
//! - `SessionUsageRecorded` - Published when a use is charged
//! - `SessionExpired` - Published when a session is expired
//! - `SessionBonusGranted` - Published when a quota bonus is applied

mod aggregate;
mod events;
mod quota;
mod status;
mod validation;

pub use aggregate::{DailyUsage, UserSession, SESSION_TTL_HOURS};
pub use events::{
    SessionBonusGranted, SessionCreated, SessionEvent, SessionExpired, SessionUsageRecorded,
};
pub use quota::{
    BonusType, UsageFailure, UsageQuota, UsageResult, BONUS_INCREMENT, DEFAULT_DAILY_QUOTA,
};
pub use status::SessionStatus;
pub use validation::{SessionValidation, SessionValidationService};
