//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `TALENTLENS_` prefix and nested values use underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use talentlens_core::config::DomainConfig;
//!
//! let config = DomainConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Payouts capped at {} cents", config.payout.max_amount_cents);
//! ```

mod error;
mod payout;

pub use error::{ConfigError, ValidationError};
pub use payout::PayoutConfig;

use serde::Deserialize;

/// Root domain configuration
///
/// Every section carries defaults, so the crate works with an empty
/// environment. Load using [`DomainConfig::load()`] which reads from
/// environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainConfig {
    /// Payout policy limits (currency, min/max amounts)
    #[serde(default)]
    pub payout: PayoutConfig,
}

impl DomainConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TALENTLENS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TALENTLENS__PAYOUT__CURRENCY=USD` -> `payout.currency = USD`
    /// - `TALENTLENS__PAYOUT__MAX_AMOUNT_CENTS=10000` -> `payout.max_amount_cents = 10000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TALENTLENS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.payout.validate()?;
        Ok(())
    }
}
