//! Incentive domain events.
//!
//! Events published as an incentive moves through the payout lifecycle:
//! - `IncentiveCreated` - New incentive awaiting validation
//! - `IncentiveValidated` - Policy checks passed
//! - `IncentivePaid` - Payment settled through the gateway
//! - `IncentiveRejected` - Refused before payment

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventEnvelope, EventId, IncentiveId, SerializableDomainEvent, SessionId,
    Timestamp,
};

// ════════════════════════════════════════════════════════════════════════════
// IncentiveCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new incentive is created for a completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveCreated {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the created incentive.
    pub incentive_id: IncentiveId,

    /// Session that earned the incentive.
    pub session_id: SessionId,

    /// Where the payout goes.
    pub recipient_email: String,

    /// Payout amount in cents.
    pub amount_cents: i64,

    /// Payout currency code.
    pub currency: String,

    /// When the incentive was created.
    pub created_at: Timestamp,
}

domain_event!(
    IncentiveCreated,
    event_type = "incentive.created",
    aggregate_id = incentive_id,
    aggregate_type = "Incentive",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// IncentiveValidated
// ════════════════════════════════════════════════════════════════════════════

/// Published when an incentive passes the payout policy checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveValidated {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the validated incentive.
    pub incentive_id: IncentiveId,

    /// When validation passed.
    pub validated_at: Timestamp,
}

domain_event!(
    IncentiveValidated,
    event_type = "incentive.validated",
    aggregate_id = incentive_id,
    aggregate_type = "Incentive",
    occurred_at = validated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// IncentivePaid
// ════════════════════════════════════════════════════════════════════════════

/// Published when the payment gateway settles an incentive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentivePaid {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the paid incentive.
    pub incentive_id: IncentiveId,

    /// Gateway transaction reference.
    pub transaction_id: String,

    /// When payment settled.
    pub paid_at: Timestamp,
}

domain_event!(
    IncentivePaid,
    event_type = "incentive.paid",
    aggregate_id = incentive_id,
    aggregate_type = "Incentive",
    occurred_at = paid_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// IncentiveRejected
// ════════════════════════════════════════════════════════════════════════════

/// Published when an incentive is refused before payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveRejected {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the rejected incentive.
    pub incentive_id: IncentiveId,

    /// Why the incentive was refused.
    pub reason: String,

    /// When the rejection was recorded.
    pub rejected_at: Timestamp,
}

domain_event!(
    IncentiveRejected,
    event_type = "incentive.rejected",
    aggregate_id = incentive_id,
    aggregate_type = "Incentive",
    occurred_at = rejected_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// IncentiveEvent
// ════════════════════════════════════════════════════════════════════════════

/// Union of all incentive events, as buffered by the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IncentiveEvent {
    Created(IncentiveCreated),
    Validated(IncentiveValidated),
    Paid(IncentivePaid),
    Rejected(IncentiveRejected),
}

impl IncentiveEvent {
    /// Returns the event type string of the wrapped event.
    pub fn event_type(&self) -> &'static str {
        use crate::domain::foundation::DomainEvent;
        match self {
            IncentiveEvent::Created(e) => e.event_type(),
            IncentiveEvent::Validated(e) => e.event_type(),
            IncentiveEvent::Paid(e) => e.event_type(),
            IncentiveEvent::Rejected(e) => e.event_type(),
        }
    }

    /// Wraps the event in a transport envelope.
    pub fn to_envelope(&self) -> EventEnvelope {
        match self {
            IncentiveEvent::Created(e) => e.to_envelope(),
            IncentiveEvent::Validated(e) => e.to_envelope(),
            IncentiveEvent::Paid(e) => e.to_envelope(),
            IncentiveEvent::Rejected(e) => e.to_envelope(),
        }
    }
}
