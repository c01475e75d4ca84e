//! Usage quota value object and usage attempt outcomes.
//!
//! `UsageQuota` is immutable: every mutation returns a new instance and
//! leaves the receiver untouched. The session aggregate swaps its held
//! quota for the returned copy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base daily allotment for a fresh session.
pub const DEFAULT_DAILY_QUOTA: u32 = 5;

/// Fixed amount added per bonus grant, both bonus kinds.
pub const BONUS_INCREMENT: u32 = 5;

/// Kind of quota bonus granted to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusType {
    /// Granted for completing a questionnaire.
    Questionnaire,

    /// Granted after a successful payment.
    Payment,
}

impl fmt::Display for BonusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusType::Questionnaire => write!(f, "questionnaire"),
            BonusType::Payment => write!(f, "payment"),
        }
    }
}

/// Usage allotment for a session.
///
/// Total limit is the sum of the base daily allotment and both bonus
/// counters. No cap is enforced at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageQuota {
    daily: u32,
    used: u32,
    questionnaire_bonuses: u32,
    payment_bonuses: u32,
}

impl UsageQuota {
    /// Creates a fresh quota with the given base allotment and no usage.
    pub fn new(daily: u32) -> Self {
        Self {
            daily,
            used: 0,
            questionnaire_bonuses: 0,
            payment_bonuses: 0,
        }
    }

    /// Rebuilds a quota from stored counters.
    pub fn from_parts(daily: u32, used: u32, questionnaire_bonuses: u32, payment_bonuses: u32) -> Self {
        Self {
            daily,
            used,
            questionnaire_bonuses,
            payment_bonuses,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the base daily allotment.
    pub fn daily(&self) -> u32 {
        self.daily
    }

    /// Returns the number of uses recorded.
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Returns the accumulated questionnaire bonus allotment.
    pub fn questionnaire_bonuses(&self) -> u32 {
        self.questionnaire_bonuses
    }

    /// Returns the accumulated payment bonus allotment.
    pub fn payment_bonuses(&self) -> u32 {
        self.payment_bonuses
    }

    /// Returns the total allotment: daily plus both bonus counters.
    pub fn total_limit(&self) -> u32 {
        self.daily + self.questionnaire_bonuses + self.payment_bonuses
    }

    /// Returns the remaining allotment, never negative.
    pub fn remaining(&self) -> u32 {
        self.total_limit().saturating_sub(self.used)
    }

    /// Returns true if at least one use remains.
    pub fn has_remaining(&self) -> bool {
        self.used < self.total_limit()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Copy-on-write mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns a copy with one more use recorded.
    pub fn increment_usage(&self) -> Self {
        Self {
            used: self.used + 1,
            ..*self
        }
    }

    /// Returns a copy with the questionnaire bonus counter raised.
    pub fn add_questionnaire_bonus(&self) -> Self {
        Self {
            questionnaire_bonuses: self.questionnaire_bonuses + BONUS_INCREMENT,
            ..*self
        }
    }

    /// Returns a copy with the payment bonus counter raised.
    pub fn add_payment_bonus(&self) -> Self {
        Self {
            payment_bonuses: self.payment_bonuses + BONUS_INCREMENT,
            ..*self
        }
    }

    /// Returns a copy with the given bonus counter raised.
    pub fn add_bonus(&self, bonus_type: BonusType) -> Self {
        match bonus_type {
            BonusType::Questionnaire => self.add_questionnaire_bonus(),
            BonusType::Payment => self.add_payment_bonus(),
        }
    }
}

impl Default for UsageQuota {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_QUOTA)
    }
}

/// Reason a usage attempt was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageFailure {
    /// All allotted uses are consumed.
    QuotaExceeded,

    /// The session aged past its lifetime.
    SessionExpired,
}

impl fmt::Display for UsageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageFailure::QuotaExceeded => write!(f, "Usage quota exceeded"),
            UsageFailure::SessionExpired => write!(f, "Session expired"),
        }
    }
}

/// Outcome of a usage attempt on a session.
///
/// Denials are expected runtime conditions, not errors, so they travel
/// as values rather than through the error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UsageResult {
    /// Usage was recorded; counters reflect the new state.
    Granted { used: u32, remaining: u32 },

    /// Usage was denied for the given reason.
    Denied { reason: UsageFailure },
}

impl UsageResult {
    /// Returns true if the attempt was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, UsageResult::Granted { .. })
    }

    /// Returns true if the attempt was denied specifically for quota
    /// exhaustion.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(
            self,
            UsageResult::Denied {
                reason: UsageFailure::QuotaExceeded
            }
        )
    }

    /// Returns the denial reason, if denied.
    pub fn failure(&self) -> Option<UsageFailure> {
        match self {
            UsageResult::Granted { .. } => None,
            UsageResult::Denied { reason } => Some(*reason),
        }
    }
}
