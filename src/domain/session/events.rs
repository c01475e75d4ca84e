//! Session domain events.
//!
//! Events published when session lifecycle changes occur:
//! - `SessionCreated` - New session opened for a client IP
//! - `SessionUsageRecorded` - A use was charged against the quota
//! - `SessionExpired` - Session transitioned to expired
//! - `SessionBonusGranted` - Quota bonus applied

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventEnvelope, EventId, IpAddress, SerializableDomainEvent, SessionId, Timestamp,
};
use crate::domain::session::BonusType;

// ════════════════════════════════════════════════════════════════════════════
// SessionCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new questionnaire session is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the created session.
    pub session_id: SessionId,

    /// Client IP the session is keyed by.
    pub ip_address: IpAddress,

    /// When the session was created.
    pub created_at: Timestamp,
}

domain_event!(
    SessionCreated,
    event_type = "session.created",
    aggregate_id = session_id,
    aggregate_type = "UserSession",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionUsageRecorded
// ════════════════════════════════════════════════════════════════════════════

/// Published when a use is successfully charged against the session quota.
///
/// Carries the counters as they stood after the charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUsageRecorded {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the session that was charged.
    pub session_id: SessionId,

    /// Uses recorded so far, including this one.
    pub used: u32,

    /// Uses still available.
    pub remaining: u32,

    /// When the usage was recorded.
    pub recorded_at: Timestamp,
}

domain_event!(
    SessionUsageRecorded,
    event_type = "session.usage_recorded",
    aggregate_id = session_id,
    aggregate_type = "UserSession",
    occurred_at = recorded_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionExpired
// ════════════════════════════════════════════════════════════════════════════

/// Published when a session transitions to expired.
///
/// `expire()` emits one of these per call, including repeat calls on an
/// already-expired session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExpired {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the expired session.
    pub session_id: SessionId,

    /// When the expiry was applied.
    pub expired_at: Timestamp,
}

domain_event!(
    SessionExpired,
    event_type = "session.expired",
    aggregate_id = session_id,
    aggregate_type = "UserSession",
    occurred_at = expired_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionBonusGranted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a quota bonus is applied to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBonusGranted {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the session receiving the bonus.
    pub session_id: SessionId,

    /// Kind of bonus granted.
    pub bonus_type: BonusType,

    /// Uses added by this grant.
    pub amount: u32,

    /// Total allotment after the grant.
    pub total_limit: u32,

    /// When the bonus was granted.
    pub granted_at: Timestamp,
}

domain_event!(
    SessionBonusGranted,
    event_type = "session.bonus_granted",
    aggregate_id = session_id,
    aggregate_type = "UserSession",
    occurred_at = granted_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionEvent
// ════════════════════════════════════════════════════════════════════════════

/// Union of all session events, as buffered by the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    Created(SessionCreated),
    UsageRecorded(SessionUsageRecorded),
    Expired(SessionExpired),
    BonusGranted(SessionBonusGranted),
}

impl SessionEvent {
    /// Returns the event type string of the wrapped event.
    pub fn event_type(&self) -> &'static str {
        use crate::domain::foundation::DomainEvent;
        match self {
            SessionEvent::Created(e) => e.event_type(),
            SessionEvent::UsageRecorded(e) => e.event_type(),
            SessionEvent::Expired(e) => e.event_type(),
            SessionEvent::BonusGranted(e) => e.event_type(),
        }
    }

    /// Wraps the event in a transport envelope.
    pub fn to_envelope(&self) -> EventEnvelope {
        match self {
            SessionEvent::Created(e) => e.to_envelope(),
            SessionEvent::UsageRecorded(e) => e.to_envelope(),
            SessionEvent::Expired(e) => e.to_envelope(),
            SessionEvent::BonusGranted(e) => e.to_envelope(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Unit Tests
// ════════════════════════════════════════════════════════════════════════════
