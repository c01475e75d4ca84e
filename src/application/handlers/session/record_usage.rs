//! RecordUsageHandler - Command handler for charging quota usage.

use std::sync::Arc;

use serde_json::json;

use crate::application::handlers::stamp_envelopes;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, SessionId};
use crate::domain::session::{UsageResult, UserSession};
use crate::ports::{AuditLogger, EventPublisher, SessionRepository};

/// Command to charge one use against a session's quota.
#[derive(Debug, Clone)]
pub struct RecordUsageCommand {
    pub session_id: SessionId,
}

/// Result of a usage attempt.
///
/// Denials are part of the result, not the error channel; the caller
/// inspects `outcome` to tell a granted charge from an exhausted quota.
#[derive(Debug, Clone)]
pub struct RecordUsageResult {
    pub session: UserSession,
    pub outcome: UsageResult,
}

/// Handler for charging quota usage.
pub struct RecordUsageHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    audit_logger: Arc<dyn AuditLogger>,
}

impl RecordUsageHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
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
        cmd: RecordUsageCommand,
        metadata: CommandMetadata,
    ) -> Result<RecordUsageResult, DomainError> {
        // 1. Load the session
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Session {} not found", cmd.session_id),
                )
            })?;

        // 2. Attempt the charge
        let outcome = session.record_usage();

        if outcome.is_granted() {
            // 3. Persist and publish the charge
            self.repository.save(&session).await?;

            let envelopes = stamp_envelopes(
                session
                    .uncommitted_events()
                    .iter()
                    .map(|e| e.to_envelope())
                    .collect(),
                &metadata,
            );
            self.event_publisher.publish_all(envelopes).await?;
            session.mark_events_committed();
        } else if outcome.is_quota_exhausted() {
            // 3. Denials change nothing; exhaustion attempts leave a
            //    security trail since they often precede abuse
            self.audit_logger
                .log_security(
                    "session.quota_exceeded",
                    json!({
                        "session_id": session.id().to_string(),
                        "ip_address": session.ip_address().as_str(),
                        "used": session.quota().used(),
                        "limit": session.quota().total_limit(),
                    }),
                )
                .await?;
        }

        Ok(RecordUsageResult { session, outcome })
    }
}
