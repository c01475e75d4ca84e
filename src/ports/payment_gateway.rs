//! Payment gateway port for external payout processing.
//!
//! Defines the contract for the payment provider that settles incentive
//! payouts. Implementations handle the actual provider API calls.
//!
//! # Design
//!
//! - **Gateway agnostic**: Interface works with any payment provider
//! - **Single-shot payouts**: No subscriptions, no recurring billing
//! - **Idempotent**: Requests carry an idempotency key for safe retries

use crate::domain::foundation::{DomainError, ErrorCode, IncentiveId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Process one payout.
    ///
    /// Returns the gateway's transaction reference on success.
    ///
    /// # Errors
    ///
    /// - `Declined` if the gateway refused the payout
    /// - `InvalidRequest` if the request was malformed
    /// - `Gateway` on provider or transport failure
    async fn process_payment(&self, request: PaymentRequest)
        -> Result<PaymentResponse, PaymentError>;
}

/// Request to pay out one incentive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Incentive being settled (stored as gateway metadata).
    pub incentive_id: IncentiveId,

    /// Where the payout goes.
    pub recipient_email: String,

    /// Payout amount in cents.
    pub amount_cents: i64,

    /// Payout currency code.
    pub currency: String,

    /// Idempotency key for safe retries.
    pub idempotency_key: Option<String>,
}

/// Successful payout result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Gateway's transaction reference.
    pub transaction_id: String,

    /// When the gateway settled the payout (provider Unix timestamp).
    pub processed_at: i64,
}

/// Errors from payout processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The gateway refused the payout.
    #[error("payment declined: {reason}")]
    Declined { reason: String },

    /// The request itself was malformed.
    #[error("invalid payment request: {reason}")]
    InvalidRequest { reason: String },

    /// Provider or transport failure.
    #[error("payment gateway error: {message}")]
    Gateway { message: String },
}

impl PaymentError {
    /// Create a declined error.
    pub fn declined(reason: impl Into<String>) -> Self {
        PaymentError::Declined { reason: reason.into() }
    }

    /// Create an invalid request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        PaymentError::InvalidRequest { reason: reason.into() }
    }

    /// Create a gateway error.
    pub fn gateway(message: impl Into<String>) -> Self {
        PaymentError::Gateway { message: message.into() }
    }

    /// Returns true if the payout was refused rather than failed.
    pub fn is_declined(&self) -> bool {
        matches!(self, PaymentError::Declined { .. })
    }

    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Gateway { .. })
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Declined { reason } => {
                DomainError::new(ErrorCode::PaymentDeclined, reason)
            }
            PaymentError::InvalidRequest { reason } => {
                DomainError::new(ErrorCode::ValidationFailed, reason)
            }
            PaymentError::Gateway { message } => {
                DomainError::new(ErrorCode::PaymentGatewayError, message)
            }
        }
    }
}
