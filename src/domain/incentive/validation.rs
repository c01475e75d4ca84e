//! Incentive payout validation service.
//!
//! Stateless policy check run before an incentive is sent to the payment
//! gateway. The limits come from configuration; the service itself holds
//! plain values so the domain stays free of config machinery.

use serde::{Deserialize, Serialize};

use super::aggregate::is_plausible_email;
use super::Incentive;
use crate::domain::foundation::StateMachine;

/// Outcome of validating an incentive: empty error list means valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveValidation {
    errors: Vec<String>,
}

impl IncentiveValidation {
    /// Returns true if no errors were collected.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the collected error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consumes the report, yielding the error messages.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Stateless payout policy check.
///
/// Collects every violated rule rather than stopping at the first, so a
/// rejection reason can name all of them.
#[derive(Debug, Clone)]
pub struct IncentiveValidationService {
    currency: String,
    min_amount_cents: i64,
    max_amount_cents: i64,
}

impl IncentiveValidationService {
    /// Creates the service with the configured payout limits.
    pub fn new(currency: impl Into<String>, min_amount_cents: i64, max_amount_cents: i64) -> Self {
        Self {
            currency: currency.into().trim().to_uppercase(),
            min_amount_cents,
            max_amount_cents,
        }
    }

    /// Collects policy violations for the given incentive.
    pub fn validate(&self, incentive: &Incentive) -> IncentiveValidation {
        let mut errors = Vec::new();

        if incentive.status.is_terminal() {
            errors.push("Incentive is not payable".to_string());
        }
        if incentive.amount_cents < self.min_amount_cents {
            errors.push(format!(
                "Payout amount {} is below the minimum {}",
                incentive.amount_cents, self.min_amount_cents
            ));
        }
        if incentive.amount_cents > self.max_amount_cents {
            errors.push(format!(
                "Payout amount {} exceeds the maximum {}",
                incentive.amount_cents, self.max_amount_cents
            ));
        }
        if incentive.currency != self.currency {
            errors.push(format!(
                "Payout currency {} does not match {}",
                incentive.currency, self.currency
            ));
        }
        if !is_plausible_email(&incentive.recipient_email) {
            errors.push("Recipient email is not a valid address".to_string());
        }

        IncentiveValidation { errors }
    }
}
