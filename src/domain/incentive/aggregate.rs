//! Incentive aggregate entity.
//!
//! An incentive is a payout owed to a questionnaire participant. Each one
//! moves through a one-way lifecycle: created pending, validated against
//! the payout policy, then paid through the gateway. Rejection is possible
//! from either non-terminal state.
//!
//! # Design Decisions
//!
//! - **Money in cents**: amounts are i64 cents, never floats
//! - **Construction validates shape**: a malformed email or non-positive
//!   amount aborts creation; policy limits are the validation service's job
//! - **Event-sourced transitions**: state changes append domain events

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, IncentiveId, SessionId, Timestamp, ValidationError,
};
use serde::{Deserialize, Serialize};

use super::events::{
    IncentiveCreated, IncentiveEvent, IncentivePaid, IncentiveRejected, IncentiveValidated,
};
use super::IncentiveStatus;

/// Hard upper bound on a single payout, in cents.
///
/// A sanity cap, not policy. The configured policy maximum is tighter and
/// enforced by the validation service.
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000;

/// Incentive aggregate - one payout owed to a participant.
///
/// # Invariants
///
/// - `amount_cents` is positive and at most [`MAX_AMOUNT_CENTS`]
/// - Status transitions follow state machine rules
/// - `paid_at` and `transaction_id` are set iff status is `Paid`
/// - `rejection_reason` is set iff status is `Rejected`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incentive {
    /// Unique identifier for this incentive.
    pub id: IncentiveId,

    /// Session that earned the payout.
    pub session_id: SessionId,

    /// Where the payout goes.
    pub recipient_email: String,

    /// Payout amount in cents.
    pub amount_cents: i64,

    /// Payout currency, normalized to an uppercase 3-letter code.
    pub currency: String,

    /// Position in the payout lifecycle.
    pub status: IncentiveStatus,

    /// When the incentive was created.
    pub created_at: Timestamp,

    /// When the incentive was last updated.
    pub updated_at: Timestamp,

    /// When payment settled, if it has.
    pub paid_at: Option<Timestamp>,

    /// Gateway transaction reference, once paid.
    pub transaction_id: Option<String>,

    /// Why the incentive was refused, if it was.
    pub rejection_reason: Option<String>,

    /// Events awaiting publication by the unit-of-work layer.
    #[serde(skip)]
    uncommitted_events: Vec<IncentiveEvent>,
}

impl Incentive {
    /// Creates a new pending incentive.
    ///
    /// Appends an `IncentiveCreated` domain event.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the recipient email is empty or
    /// malformed, the amount is outside `1..=MAX_AMOUNT_CENTS`, or the
    /// currency is not a 3-letter code.
    pub fn create(
        session_id: SessionId,
        recipient_email: impl Into<String>,
        amount_cents: i64,
        currency: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let recipient_email = recipient_email.into().trim().to_string();
        if recipient_email.is_empty() {
            return Err(ValidationError::empty_field("recipient_email"));
        }
        if !is_plausible_email(&recipient_email) {
            return Err(ValidationError::invalid_format(
                "recipient_email",
                "expected a name@domain address",
            ));
        }

        if amount_cents < 1 || amount_cents > MAX_AMOUNT_CENTS {
            return Err(ValidationError::out_of_range(
                "amount_cents",
                1,
                MAX_AMOUNT_CENTS,
                amount_cents,
            ));
        }

        let currency = currency.into().trim().to_uppercase();
        if currency.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "expected a 3-letter ISO code",
            ));
        }

        let id = IncentiveId::new();
        let now = Timestamp::now();

        let mut incentive = Self {
            id,
            session_id: session_id.clone(),
            recipient_email: recipient_email.clone(),
            amount_cents,
            currency: currency.clone(),
            status: IncentiveStatus::Pending,
            created_at: now,
            updated_at: now,
            paid_at: None,
            transaction_id: None,
            rejection_reason: None,
            uncommitted_events: Vec::new(),
        };
        incentive.record_event(IncentiveEvent::Created(IncentiveCreated {
            event_id: EventId::new(),
            incentive_id: id,
            session_id,
            recipient_email,
            amount_cents,
            currency,
            created_at: now,
        }));
        Ok(incentive)
    }

    /// Reconstitutes an incentive from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: IncentiveId,
        session_id: SessionId,
        recipient_email: String,
        amount_cents: i64,
        currency: String,
        status: IncentiveStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
        paid_at: Option<Timestamp>,
        transaction_id: Option<String>,
        rejection_reason: Option<String>,
    ) -> Self {
        Self {
            id,
            session_id,
            recipient_email,
            amount_cents,
            currency,
            status,
            created_at,
            updated_at,
            paid_at,
            transaction_id,
            rejection_reason,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns true if this incentive may be sent to the payment gateway.
    pub fn is_payable(&self) -> bool {
        self.status.is_payable()
    }

    /// Marks the incentive as validated against the payout policy.
    ///
    /// Appends an `IncentiveValidated` domain event.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if the incentive is not `Pending`; the
    /// message names the current status.
    pub fn mark_validated(&mut self) -> Result<(), DomainError> {
        self.transition_status(IncentiveStatus::Validated)?;

        let now = Timestamp::now();
        self.updated_at = now;
        self.record_event(IncentiveEvent::Validated(IncentiveValidated {
            event_id: EventId::new(),
            incentive_id: self.id,
            validated_at: now,
        }));
        Ok(())
    }

    /// Marks the incentive as paid, keeping the gateway reference.
    ///
    /// Appends an `IncentivePaid` domain event.
    ///
    /// # Errors
    ///
    /// `NotPayable` if the incentive is not `Validated`; the message
    /// names the current status.
    pub fn mark_paid(&mut self, transaction_id: impl Into<String>) -> Result<(), DomainError> {
        if !self.status.is_payable() {
            return Err(DomainError::new(
                ErrorCode::NotPayable,
                format!("Cannot pay incentive in status {}", self.status),
            ));
        }
        self.transition_status(IncentiveStatus::Paid)?;

        let transaction_id = transaction_id.into();
        let now = Timestamp::now();
        self.paid_at = Some(now);
        self.transaction_id = Some(transaction_id.clone());
        self.updated_at = now;
        self.record_event(IncentiveEvent::Paid(IncentivePaid {
            event_id: EventId::new(),
            incentive_id: self.id,
            transaction_id,
            paid_at: now,
        }));
        Ok(())
    }

    /// Rejects the incentive, keeping the reason.
    ///
    /// Appends an `IncentiveRejected` domain event.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if the incentive already reached a
    /// terminal status; the message names the current status.
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.transition_status(IncentiveStatus::Rejected)?;

        let reason = reason.into();
        let now = Timestamp::now();
        self.rejection_reason = Some(reason.clone());
        self.updated_at = now;
        self.record_event(IncentiveEvent::Rejected(IncentiveRejected {
            event_id: EventId::new(),
            incentive_id: self.id,
            reason,
            rejected_at: now,
        }));
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event buffer
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns a defensive copy of the uncommitted event buffer.
    pub fn uncommitted_events(&self) -> Vec<IncentiveEvent> {
        self.uncommitted_events.clone()
    }

    /// Clears the uncommitted event buffer.
    pub fn mark_events_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn record_event(&mut self, event: IncentiveEvent) {
        self.uncommitted_events.push(event);
    }

    /// Transition to a new status using the state machine.
    fn transition_status(&mut self, target: IncentiveStatus) -> Result<(), DomainError> {
        use crate::domain::foundation::StateMachine;

        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition incentive from {} to {}",
                    self.status, target
                ),
            )
        })?;
        Ok(())
    }
}

/// Loose shape check for a payout address. Full deliverability is the
/// gateway's problem.
pub(crate) fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
