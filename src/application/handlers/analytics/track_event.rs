//! TrackEventHandler - Command handler for recording analytics events.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::application::handlers::stamp_envelopes;
use crate::domain::analytics::{AnalyticsEvent, AnalyticsEventType};
use crate::domain::foundation::{CommandMetadata, DomainError, SessionId};
use crate::ports::{AnalyticsEventRepository, EventPublisher};

/// Command to record one analytics event.
#[derive(Debug, Clone)]
pub struct TrackEventCommand {
    pub event_type: AnalyticsEventType,
    pub session_id: Option<SessionId>,
    pub payload: JsonValue,
}

/// Result of recording an analytics event.
#[derive(Debug, Clone)]
pub struct TrackEventResult {
    pub event: AnalyticsEvent,
    /// Events recorded since the start of the current UTC day,
    /// including this one.
    pub recorded_today: u64,
}

/// Handler for recording analytics events.
///
/// Recording never inspects the payload; whatever the caller sends is
/// stored as-is and interpreted downstream during processing.
pub struct TrackEventHandler {
    repository: Arc<dyn AnalyticsEventRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl TrackEventHandler {
    pub fn new(
        repository: Arc<dyn AnalyticsEventRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: TrackEventCommand,
        metadata: CommandMetadata,
    ) -> Result<TrackEventResult, DomainError> {
        // 1. Record the event as pending
        let mut event = AnalyticsEvent::create(cmd.event_type, cmd.session_id, cmd.payload);

        // 2. Persist
        self.repository.save(&event).await?;

        // 3. Publish the buffered events
        let envelopes = stamp_envelopes(
            event
                .uncommitted_events()
                .iter()
                .map(|e| e.to_envelope())
                .collect(),
            &metadata,
        );
        self.event_publisher.publish_all(envelopes).await?;
        event.mark_events_committed();

        // 4. Report today's volume
        let recorded_today = self.repository.count_today().await?;

        Ok(TrackEventResult {
            event,
            recorded_today,
        })
    }
}
