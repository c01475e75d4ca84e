//! Session lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a questionnaire session.
///
/// Sessions start `Active` and move to `Expired` exactly once in terms of
/// state; the reverse transition never happens. `expire()` on the aggregate
/// is unconditional, so the status itself carries no transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Session accepts usage while quota and age allow.
    Active,

    /// Session has been expired. Terminal.
    Expired,
}

impl SessionStatus {
    /// Returns true if the session has not been expired.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}
