//! ExpireSessionHandler - Command handler for expiring and purging sessions.

use std::sync::Arc;

use serde_json::json;

use crate::application::handlers::stamp_envelopes;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, SessionId, Timestamp};
use crate::domain::session::{UserSession, SESSION_TTL_HOURS};
use crate::ports::{AuditLogger, EventPublisher, SessionRepository};

/// Command to expire one session.
#[derive(Debug, Clone)]
pub struct ExpireSessionCommand {
    pub session_id: SessionId,
}

/// Result of an expiry.
#[derive(Debug, Clone)]
pub struct ExpireSessionResult {
    pub session: UserSession,
}

/// Handler for session expiry and the TTL purge sweep.
pub struct ExpireSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    audit_logger: Arc<dyn AuditLogger>,
}

impl ExpireSessionHandler {
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
        cmd: ExpireSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<ExpireSessionResult, DomainError> {
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

        // 2. Expire it; repeat calls re-emit by contract
        session.expire();

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
                "session.expired",
                json!({ "session_id": session.id().to_string() }),
            )
            .await?;

        Ok(ExpireSessionResult { session })
    }

    /// Deletes all sessions older than the TTL and returns the count.
    ///
    /// Meant for a scheduler, not a request path; deleted rows never
    /// yield `SessionExpired` events, only an audit entry with the
    /// count.
    pub async fn purge_expired(&self) -> Result<u64, DomainError> {
        let cutoff = Timestamp::now().minus_hours(SESSION_TTL_HOURS);
        let deleted = self.repository.delete_expired(cutoff).await?;

        tracing::info!(deleted = deleted, "Purged expired sessions");
        self.audit_logger
            .log_business("session.purged", json!({ "deleted": deleted }))
            .await?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventEnvelope, IpAddress};
    use crate::domain::session::{SessionStatus, UsageQuota};
    use crate::ports::AuditEntry;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSessionRepository {
        sessions: Mutex<Vec<UserSession>>,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                sessions: Mutex::new(Vec::new()),
            }
        }

        fn with_sessions(sessions: Vec<UserSession>) -> Self {
            Self {
                sessions: Mutex::new(sessions),
            }
        }

        fn stored_sessions(&self) -> Vec<UserSession> {
            self.sessions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn save(&self, session: &UserSession) -> Result<(), DomainError> {
            let mut sessions = self.sessions.lock().unwrap();
            if let Some(existing) = sessions.iter_mut().find(|s| s.id() == session.id()) {
                *existing = session.clone();
            } else {
                sessions.push(session.clone());
            }
            Ok(())
        }

        async fn find_by_id(&self, id: &SessionId) -> Result<Option<UserSession>, DomainError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id() == id)
                .cloned())
        }

        async fn find_by_ip(&self, ip: &IpAddress) -> Result<Option<UserSession>, DomainError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|s| s.ip_address() == ip)
                .cloned())
        }

        async fn delete_expired(&self, cutoff: Timestamp) -> Result<u64, DomainError> {
            let mut sessions = self.sessions.lock().unwrap();
            let before = sessions.len();
            sessions.retain(|s| !s.created_at().is_before(&cutoff));
            Ok((before - sessions.len()) as u64)
        }
    }

    struct MockEventPublisher {
        published_events: Mutex<Vec<EventEnvelope>>,
    }

    impl MockEventPublisher {
        fn new() -> Self {
            Self {
                published_events: Mutex::new(Vec::new()),
            }
        }

        fn published_events(&self) -> Vec<EventEnvelope> {
            self.published_events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for MockEventPublisher {
        async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
            self.published_events.lock().unwrap().push(event);
            Ok(())
        }

        async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
            for event in events {
                self.publish(event).await?;
            }
            Ok(())
        }
    }

    struct MockAuditLogger {
        entries: Mutex<Vec<AuditEntry>>,
    }

    impl MockAuditLogger {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
            }
        }

        fn entries(&self) -> Vec<AuditEntry> {
            self.entries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuditLogger for MockAuditLogger {
        async fn log(&self, entry: AuditEntry) -> Result<(), DomainError> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }
    }

    fn test_metadata() -> CommandMetadata {
        CommandMetadata::test_fixture()
    }

    fn committed_session() -> UserSession {
        let mut session = UserSession::create("203.0.113.7").unwrap();
        session.mark_events_committed();
        session
    }

    fn aged_session(hours_old: i64) -> UserSession {
        let created = Timestamp::now().minus_hours(hours_old);
        UserSession::reconstitute(
            SessionId::generate(),
            IpAddress::new("203.0.113.8").unwrap(),
            SessionStatus::Active,
            UsageQuota::default(),
            created,
            created,
        )
    }

    #[tokio::test]
    async fn expires_and_publishes() {
        let session = committed_session();
        let session_id = session.id().clone();
        let repo = Arc::new(MockSessionRepository::with_sessions(vec![session]));
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = ExpireSessionHandler::new(repo.clone(), publisher.clone(), audit.clone());

        let cmd = ExpireSessionCommand { session_id };

        let result = handler.handle(cmd, test_metadata()).await.unwrap();

        assert_eq!(result.session.status(), SessionStatus::Expired);
        assert_eq!(repo.stored_sessions()[0].status(), SessionStatus::Expired);
        let events = publisher.published_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "session.expired");
        assert_eq!(audit.entries()[0].event_type, "session.expired");
    }

    #[tokio::test]
    async fn repeat_expiry_re_emits() {
        let session = committed_session();
        let session_id = session.id().clone();
        let repo = Arc::new(MockSessionRepository::with_sessions(vec![session]));
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = ExpireSessionHandler::new(repo, publisher.clone(), audit);

        for _ in 0..2 {
            let cmd = ExpireSessionCommand {
                session_id: session_id.clone(),
            };
            handler.handle(cmd, test_metadata()).await.unwrap();
        }

        let expired: Vec<_> = publisher
            .published_events()
            .into_iter()
            .filter(|e| e.event_type == "session.expired")
            .collect();
        assert_eq!(expired.len(), 2);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let repo = Arc::new(MockSessionRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = ExpireSessionHandler::new(repo, publisher, audit);

        let cmd = ExpireSessionCommand {
            session_id: SessionId::generate(),
        };

        let err = handler.handle(cmd, test_metadata()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn purge_deletes_only_aged_sessions() {
        let fresh = committed_session();
        let old = aged_session(25);
        let repo = Arc::new(MockSessionRepository::with_sessions(vec![fresh, old]));
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = ExpireSessionHandler::new(repo.clone(), publisher.clone(), audit.clone());

        let deleted = handler.purge_expired().await.unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(repo.stored_sessions().len(), 1);
        assert!(publisher.published_events().is_empty());
        let entries = audit.entries();
        assert_eq!(entries[0].event_type, "session.purged");
        assert_eq!(entries[0].payload["deleted"], 1);
    }

    #[tokio::test]
    async fn purge_with_nothing_aged_reports_zero() {
        let repo = Arc::new(MockSessionRepository::with_sessions(vec![
            committed_session(),
        ]));
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = ExpireSessionHandler::new(repo.clone(), publisher, audit);

        let deleted = handler.purge_expired().await.unwrap();

        assert_eq!(deleted, 0);
        assert_eq!(repo.stored_sessions().len(), 1);
    }
}
