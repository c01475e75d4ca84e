//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid payout currency {0:?}: expected a 3-letter code")]
    InvalidPayoutCurrency(String),

    #[error("Payout minimum must be at least 1 cent")]
    NonPositivePayoutMinimum,

    #[error("Payout min_amount_cents exceeds max_amount_cents")]
    InvalidPayoutRange,
}
