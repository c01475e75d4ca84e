//! Incentive payout status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an incentive in the payout lifecycle.
///
/// Created `Pending`, checked into `Validated`, then settled as `Paid`.
/// Rejection is possible from either non-terminal state. `Paid` and
/// `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncentiveStatus {
    /// Created, awaiting validation against the payout policy.
    Pending,

    /// Validation passed, eligible for payment.
    Validated,

    /// Payment settled. Terminal.
    Paid,

    /// Refused before payment. Terminal.
    Rejected,
}

impl IncentiveStatus {
    /// Returns true if the incentive may be sent to the payment gateway.
    pub fn is_payable(&self) -> bool {
        matches!(self, IncentiveStatus::Validated)
    }
}

impl StateMachine for IncentiveStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use IncentiveStatus::*;
        matches!(
            (self, target),
            (Pending, Validated) | (Pending, Rejected) | (Validated, Paid) | (Validated, Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use IncentiveStatus::*;
        match self {
            Pending => vec![Validated, Rejected],
            Validated => vec![Paid, Rejected],
            Paid => vec![],
            Rejected => vec![],
        }
    }
}

impl fmt::Display for IncentiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IncentiveStatus::Pending => "PENDING",
            IncentiveStatus::Validated => "VALIDATED",
            IncentiveStatus::Paid => "PAID",
            IncentiveStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", s)
    }
}
