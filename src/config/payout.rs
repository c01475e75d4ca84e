//! Payout policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::incentive::IncentiveValidationService;

/// Payout policy limits
///
/// Applied by the validation service before an incentive reaches the
/// payment gateway. Amounts are in cents.
#[derive(Debug, Clone, Deserialize)]
pub struct PayoutConfig {
    /// Currency every payout must be denominated in
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Smallest payable amount in cents
    #[serde(default = "default_min_amount_cents")]
    pub min_amount_cents: i64,

    /// Largest payable amount in cents
    #[serde(default = "default_max_amount_cents")]
    pub max_amount_cents: i64,
}

impl PayoutConfig {
    /// Build the validation service enforcing these limits
    pub fn validation_service(&self) -> IncentiveValidationService {
        IncentiveValidationService::new(
            self.currency.clone(),
            self.min_amount_cents,
            self.max_amount_cents,
        )
    }

    /// Validate payout configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidPayoutCurrency(
                self.currency.clone(),
            ));
        }
        if self.min_amount_cents < 1 {
            return Err(ValidationError::NonPositivePayoutMinimum);
        }
        if self.min_amount_cents > self.max_amount_cents {
            return Err(ValidationError::InvalidPayoutRange);
        }
        Ok(())
    }
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            min_amount_cents: default_min_amount_cents(),
            max_amount_cents: default_max_amount_cents(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_min_amount_cents() -> i64 {
    100
}

fn default_max_amount_cents() -> i64 {
    10_000
}
