//! AnalyticsEvent aggregate entity.
//!
//! Records of platform activity, kept until their retention window
//! lapses. Each record moves through a one-way processing pipeline:
//! recorded pending, then marked processed or failed exactly once.
//!
//! # Design Decisions
//!
//! - **Opaque payload**: event data is carried as JSON and never
//!   interpreted here; downstream consumers own its shape
//! - **Retention by classification**: the event type alone decides how
//!   long the record lives
//! - **Loud reprocessing failures**: a second `mark_processed` is a
//!   programmer error and raises, unlike expected quota denials

use crate::domain::analytics::events::{
    AnalyticsDomainEvent, AnalyticsEventFailed, AnalyticsEventProcessed, AnalyticsEventRecorded,
};
use crate::domain::analytics::{AnalyticsEventType, ProcessingStatus};
use crate::domain::foundation::{
    AnalyticsEventId, DomainError, ErrorCode, EventId, SessionId, Timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// AnalyticsEvent aggregate - one recorded platform activity.
///
/// # Invariants
///
/// - `status` leaves `Pending` at most once, to `Processed` or `Failed`
/// - `processed_at` is set iff status is `Processed`
/// - `failure_reason` is set iff status is `Failed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Unique identifier for this record.
    pub id: AnalyticsEventId,

    /// Classification, drives retention.
    pub event_type: AnalyticsEventType,

    /// Session the activity belongs to, if any.
    pub session_id: Option<SessionId>,

    /// Opaque event data.
    pub payload: JsonValue,

    /// Position in the processing pipeline.
    pub status: ProcessingStatus,

    /// When the record was created. Retention is measured from here.
    pub created_at: Timestamp,

    /// When processing completed, if it has.
    pub processed_at: Option<Timestamp>,

    /// Why processing failed, if it did.
    pub failure_reason: Option<String>,

    /// Events awaiting publication by the unit-of-work layer.
    #[serde(skip)]
    uncommitted_events: Vec<AnalyticsDomainEvent>,
}

impl AnalyticsEvent {
    /// Records a new pending analytics event.
    ///
    /// Appends an `AnalyticsEventRecorded` domain event.
    pub fn create(
        event_type: AnalyticsEventType,
        session_id: Option<SessionId>,
        payload: JsonValue,
    ) -> Self {
        let id = AnalyticsEventId::new();
        let now = Timestamp::now();

        let mut event = Self {
            id,
            event_type,
            session_id: session_id.clone(),
            payload,
            status: ProcessingStatus::Pending,
            created_at: now,
            processed_at: None,
            failure_reason: None,
            uncommitted_events: Vec::new(),
        };
        event.record_event(AnalyticsDomainEvent::Recorded(AnalyticsEventRecorded {
            event_id: EventId::new(),
            analytics_event_id: id,
            event_type,
            session_id,
            recorded_at: now,
        }));
        event
    }

    /// Reconstitutes a record from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AnalyticsEventId,
        event_type: AnalyticsEventType,
        session_id: Option<SessionId>,
        payload: JsonValue,
        status: ProcessingStatus,
        created_at: Timestamp,
        processed_at: Option<Timestamp>,
        failure_reason: Option<String>,
    ) -> Self {
        Self {
            id,
            event_type,
            session_id,
            payload,
            status,
            created_at,
            processed_at,
            failure_reason,
            uncommitted_events: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// When this record's retention window lapses.
    pub fn retention_expires_at(&self) -> Timestamp {
        self.created_at.add_days(self.event_type.retention_days())
    }

    /// Returns true once the retention window has lapsed.
    pub fn is_retention_expired(&self) -> bool {
        Timestamp::now().is_after(&self.retention_expires_at())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Marks the record as processed.
    ///
    /// Appends an `AnalyticsEventProcessed` domain event.
    ///
    /// # Errors
    ///
    /// `AlreadyProcessed` if the record already left `Pending`; the
    /// message names the current status.
    pub fn mark_processed(&mut self) -> Result<(), DomainError> {
        self.transition_status(ProcessingStatus::Processed)?;

        let now = Timestamp::now();
        self.processed_at = Some(now);
        self.record_event(AnalyticsDomainEvent::Processed(AnalyticsEventProcessed {
            event_id: EventId::new(),
            analytics_event_id: self.id,
            processed_at: now,
        }));
        Ok(())
    }

    /// Marks the record as failed, keeping the reason.
    ///
    /// Appends an `AnalyticsEventFailed` domain event.
    ///
    /// # Errors
    ///
    /// `AlreadyProcessed` if the record already left `Pending`; the
    /// message names the current status.
    pub fn mark_failed(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.transition_status(ProcessingStatus::Failed)?;

        let reason = reason.into();
        let now = Timestamp::now();
        self.failure_reason = Some(reason.clone());
        self.record_event(AnalyticsDomainEvent::Failed(AnalyticsEventFailed {
            event_id: EventId::new(),
            analytics_event_id: self.id,
            reason,
            failed_at: now,
        }));
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event buffer
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns a defensive copy of the uncommitted event buffer.
    pub fn uncommitted_events(&self) -> Vec<AnalyticsDomainEvent> {
        self.uncommitted_events.clone()
    }

    /// Clears the uncommitted event buffer.
    pub fn mark_events_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn record_event(&mut self, event: AnalyticsDomainEvent) {
        self.uncommitted_events.push(event);
    }

    /// Transition to a new status using the state machine.
    fn transition_status(&mut self, target: ProcessingStatus) -> Result<(), DomainError> {
        use crate::domain::foundation::StateMachine;

        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::AlreadyProcessed,
                format!("Cannot process event in status {}", self.status),
            )
        })?;
        Ok(())
    }
}
