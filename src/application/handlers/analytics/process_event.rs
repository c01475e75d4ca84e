//! ProcessEventHandler - Command handler for the analytics pipeline.
//!
//! Covers the three maintenance operations on recorded events: marking a
//! single event processed, sweeping the pending backlog, and purging
//! records past their retention window.

use std::sync::Arc;

use serde_json::json;

use crate::application::handlers::stamp_envelopes;
use crate::domain::analytics::AnalyticsEvent;
use crate::domain::foundation::{
    AnalyticsEventId, CommandMetadata, DomainError, ErrorCode, Timestamp,
};
use crate::ports::{AnalyticsEventRepository, AuditLogger, EventPublisher};

/// Command to mark one analytics event processed.
#[derive(Debug, Clone)]
pub struct ProcessEventCommand {
    pub analytics_event_id: AnalyticsEventId,
}

/// Result of processing one event.
#[derive(Debug, Clone)]
pub struct ProcessEventResult {
    pub event: AnalyticsEvent,
}

/// Result of a backlog sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessPendingResult {
    pub processed: u64,
    pub failed: u64,
}

/// Handler for the analytics processing pipeline.
pub struct ProcessEventHandler {
    repository: Arc<dyn AnalyticsEventRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    audit_logger: Arc<dyn AuditLogger>,
}

impl ProcessEventHandler {
    pub fn new(
        repository: Arc<dyn AnalyticsEventRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        audit_logger: Arc<dyn AuditLogger>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            audit_logger,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessEventCommand,
        metadata: CommandMetadata,
    ) -> Result<ProcessEventResult, DomainError> {
        // 1. Load the record
        let mut event = self
            .repository
            .find_by_id(&cmd.analytics_event_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::AnalyticsEventNotFound,
                    format!("Analytics event {} not found", cmd.analytics_event_id),
                )
            })?;

        // 2. Mark processed; reprocessing raises AlreadyProcessed
        event.mark_processed()?;

        // 3. Persist
        self.repository.save(&event).await?;

        // 4. Publish the buffered events
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

        Ok(ProcessEventResult { event })
    }

    /// Sweeps the pending backlog, processing each event in turn.
    ///
    /// One bad record never stalls the sweep: an event whose processing
    /// fails is marked failed (best effort) and counted, and the sweep
    /// moves on.
    pub async fn handle_pending(
        &self,
        metadata: CommandMetadata,
    ) -> Result<ProcessPendingResult, DomainError> {
        let pending = self.repository.find_pending().await?;

        let mut processed = 0u64;
        let mut failed = 0u64;

        for event in pending {
            match self.process_one(event.clone(), &metadata).await {
                Ok(()) => processed += 1,
                Err(err) => {
                    failed += 1;
                    self.record_failure(event, &err, &metadata).await;
                }
            }
        }

        Ok(ProcessPendingResult { processed, failed })
    }

    /// Deletes all records past their retention window and returns the
    /// count.
    pub async fn purge_expired(&self) -> Result<u64, DomainError> {
        let deleted = self.repository.delete_expired(Timestamp::now()).await?;

        tracing::info!(deleted = deleted, "Purged expired analytics events");
        self.audit_logger
            .log_business("analytics.retention_purged", json!({ "deleted": deleted }))
            .await?;

        Ok(deleted)
    }

    async fn process_one(
        &self,
        mut event: AnalyticsEvent,
        metadata: &CommandMetadata,
    ) -> Result<(), DomainError> {
        event.mark_processed()?;
        self.repository.save(&event).await?;

        let envelopes = stamp_envelopes(
            event
                .uncommitted_events()
                .iter()
                .map(|e| e.to_envelope())
                .collect(),
            metadata,
        );
        self.event_publisher.publish_all(envelopes).await?;
        Ok(())
    }

    /// Marks a swept event failed. Best effort: trouble here is logged
    /// and swallowed so the sweep keeps moving.
    async fn record_failure(
        &self,
        mut event: AnalyticsEvent,
        err: &DomainError,
        metadata: &CommandMetadata,
    ) {
        if event.mark_failed(err.message.clone()).is_err() {
            // Already left the pipeline; nothing to record.
            return;
        }

        if let Err(save_err) = self.repository.save(&event).await {
            tracing::warn!(
                analytics_event_id = %event.id,
                error = %save_err,
                "Failed to persist failure state for analytics event"
            );
            return;
        }

        let envelopes = stamp_envelopes(
            event
                .uncommitted_events()
                .iter()
                .map(|e| e.to_envelope())
                .collect(),
            metadata,
        );
        if let Err(publish_err) = self.event_publisher.publish_all(envelopes).await {
            tracing::warn!(
                analytics_event_id = %event.id,
                error = %publish_err,
                "Failed to publish failure event for analytics event"
            );
        }
    }
}
