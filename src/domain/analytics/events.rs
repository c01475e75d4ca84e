//! Analytics domain events.
//!
//! Events published when analytics aggregate state changes:
//! - `AnalyticsEventRecorded` - A new analytics event entered the system
//! - `AnalyticsEventProcessed` - Processing completed
//! - `AnalyticsEventFailed` - Processing failed

use serde::{Deserialize, Serialize};

use crate::domain::analytics::AnalyticsEventType;
use crate::domain::foundation::{
    domain_event, AnalyticsEventId, EventEnvelope, EventId, SerializableDomainEvent, SessionId,
    Timestamp,
};

// ════════════════════════════════════════════════════════════════════════════
// AnalyticsEventRecorded
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new analytics event is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEventRecorded {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the recorded analytics event.
    pub analytics_event_id: AnalyticsEventId,

    /// Classification of the recorded event.
    pub event_type: AnalyticsEventType,

    /// Session the event belongs to, if any.
    pub session_id: Option<SessionId>,

    /// When the event was recorded.
    pub recorded_at: Timestamp,
}

domain_event!(
    AnalyticsEventRecorded,
    event_type = "analytics.event_recorded",
    aggregate_id = analytics_event_id,
    aggregate_type = "AnalyticsEvent",
    occurred_at = recorded_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AnalyticsEventProcessed
// ════════════════════════════════════════════════════════════════════════════

/// Published when an analytics event finishes processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEventProcessed {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the processed analytics event.
    pub analytics_event_id: AnalyticsEventId,

    /// When processing completed.
    pub processed_at: Timestamp,
}

domain_event!(
    AnalyticsEventProcessed,
    event_type = "analytics.event_processed",
    aggregate_id = analytics_event_id,
    aggregate_type = "AnalyticsEvent",
    occurred_at = processed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AnalyticsEventFailed
// ════════════════════════════════════════════════════════════════════════════

/// Published when processing an analytics event fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEventFailed {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the analytics event that failed processing.
    pub analytics_event_id: AnalyticsEventId,

    /// Why processing failed.
    pub reason: String,

    /// When the failure was recorded.
    pub failed_at: Timestamp,
}

domain_event!(
    AnalyticsEventFailed,
    event_type = "analytics.event_failed",
    aggregate_id = analytics_event_id,
    aggregate_type = "AnalyticsEvent",
    occurred_at = failed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AnalyticsDomainEvent
// ════════════════════════════════════════════════════════════════════════════

/// Union of all analytics events, as buffered by the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnalyticsDomainEvent {
    Recorded(AnalyticsEventRecorded),
    Processed(AnalyticsEventProcessed),
    Failed(AnalyticsEventFailed),
}

impl AnalyticsDomainEvent {
    /// Returns the event type string of the wrapped event.
    pub fn event_type(&self) -> &'static str {
        use crate::domain::foundation::DomainEvent;
        match self {
            AnalyticsDomainEvent::Recorded(e) => e.event_type(),
            AnalyticsDomainEvent::Processed(e) => e.event_type(),
            AnalyticsDomainEvent::Failed(e) => e.event_type(),
        }
    }

    /// Wraps the event in a transport envelope.
    pub fn to_envelope(&self) -> EventEnvelope {
        match self {
            AnalyticsDomainEvent::Recorded(e) => e.to_envelope(),
            AnalyticsDomainEvent::Processed(e) => e.to_envelope(),
            AnalyticsDomainEvent::Failed(e) => e.to_envelope(),
        }
    }
}
