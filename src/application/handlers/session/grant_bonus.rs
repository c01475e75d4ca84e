//! GrantBonusHandler - Command handler for applying quota bonuses.

use std::sync::Arc;

use serde_json::json;

use crate::application::handlers::stamp_envelopes;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, SessionId};
use crate::domain::session::{BonusType, UserSession};
use crate::ports::{AuditLogger, EventPublisher, SessionRepository};

/// Command to grant a quota bonus to a session.
#[derive(Debug, Clone)]
pub struct GrantBonusCommand {
    pub session_id: SessionId,
    pub bonus_type: BonusType,
}

/// Result of a bonus grant.
#[derive(Debug, Clone)]
pub struct GrantBonusResult {
    pub session: UserSession,
    /// Total allotment after the grant.
    pub new_total: u32,
}

/// Handler for granting quota bonuses.
///
/// Grants are unconditional once the session is found; whether the
/// caller earned the bonus (questionnaire completed, payment settled)
/// is decided upstream.
pub struct GrantBonusHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    audit_logger: Arc<dyn AuditLogger>,
}

impl GrantBonusHandler {
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
        cmd: GrantBonusCommand,
        metadata: CommandMetadata,
    ) -> Result<GrantBonusResult, DomainError> {
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

        // 2. Apply the bonus
        let new_total = session.grant_bonus(cmd.bonus_type);

        // 3. Persist
        self.repository.save(&session).await?;

        // 4. Publish the buffered events
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

        // 5. Audit trail
        self.audit_logger
            .log_business(
                "session.bonus_granted",
                json!({
                    "session_id": session.id().to_string(),
                    "bonus_type": cmd.bonus_type.to_string(),
                    "new_total": new_total,
                }),
            )
            .await?;

        Ok(GrantBonusResult { session, new_total })
    }
}
