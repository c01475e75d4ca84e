//! StartSessionHandler - Command handler for opening per-IP sessions.

use std::sync::Arc;

use serde_json::json;

use crate::application::handlers::stamp_envelopes;
use crate::domain::foundation::{CommandMetadata, DomainError, IpAddress};
use crate::domain::session::UserSession;
use crate::ports::{AuditLogger, EventPublisher, SessionRepository};

/// Command to start the session for a client IP.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub ip_address: String,
}

/// Result of a session start.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: UserSession,
    /// True when an existing valid session was returned instead of a new one.
    pub reused: bool,
}

/// Handler for starting sessions.
///
/// An IP that already holds a valid session gets that session back; a
/// fresh one is opened otherwise. Expired or aged-out sessions are left
/// in place for the purge sweep and simply superseded.
pub struct StartSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    audit_logger: Arc<dyn AuditLogger>,
}

impl StartSessionHandler {
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
        cmd: StartSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<StartSessionResult, DomainError> {
        // 1. Validate the IP before touching storage
        let ip = IpAddress::new(cmd.ip_address)?;

        // 2. Reuse the existing session while it is still valid
        if let Some(existing) = self.repository.find_by_ip(&ip).await? {
            if existing.is_valid() {
                return Ok(StartSessionResult {
                    session: existing,
                    reused: true,
                });
            }
        }

        // 3. Open a fresh session for this IP
        let mut session = UserSession::create(ip.as_str())?;

        // 4. Persist before announcing
        self.repository.save(&session).await?;

        // 5. Publish the buffered events
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

        // 6. Audit trail
        self.audit_logger
            .log_business(
                "session.started",
                json!({
                    "session_id": session.id().to_string(),
                    "ip_address": session.ip_address().as_str(),
                }),
            )
            .await?;

        Ok(StartSessionResult {
            session,
            reused: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, EventEnvelope, SessionId, Timestamp};
    use crate::domain::session::{SessionStatus, UsageQuota};
    use crate::ports::AuditEntry;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSessionRepository {
        sessions: Mutex<Vec<UserSession>>,
        fail_save: bool,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                sessions: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                sessions: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn with_session(session: UserSession) -> Self {
            Self {
                sessions: Mutex::new(vec![session]),
                fail_save: false,
            }
        }

        fn stored_sessions(&self) -> Vec<UserSession> {
            self.sessions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn save(&self, session: &UserSession) -> Result<(), DomainError> {
            if self.fail_save {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated save failure",
                ));
            }
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
        fail_publish: bool,
    }

    impl MockEventPublisher {
        fn new() -> Self {
            Self {
                published_events: Mutex::new(Vec::new()),
                fail_publish: false,
            }
        }

        fn published_events(&self) -> Vec<EventEnvelope> {
            self.published_events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for MockEventPublisher {
        async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
            if self.fail_publish {
                return Err(DomainError::new(
                    ErrorCode::InternalError,
                    "Simulated publish failure",
                ));
            }
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

    fn committed_session(ip: &str) -> UserSession {
        let mut session = UserSession::create(ip).unwrap();
        session.mark_events_committed();
        session
    }

    fn aged_session(ip: &str, hours_old: i64) -> UserSession {
        let created = Timestamp::now().minus_hours(hours_old);
        UserSession::reconstitute(
            SessionId::generate(),
            IpAddress::new(ip).unwrap(),
            SessionStatus::Active,
            UsageQuota::default(),
            created,
            created,
        )
    }

    #[tokio::test]
    async fn starts_a_new_session_for_an_unknown_ip() {
        let repo = Arc::new(MockSessionRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = StartSessionHandler::new(repo.clone(), publisher, audit);

        let cmd = StartSessionCommand {
            ip_address: "203.0.113.7".to_string(),
        };

        let result = handler.handle(cmd, test_metadata()).await.unwrap();

        assert!(!result.reused);
        assert_eq!(result.session.ip_address().as_str(), "203.0.113.7");
        assert_eq!(result.session.remaining_quota(), 5);
        assert_eq!(repo.stored_sessions().len(), 1);
    }

    #[tokio::test]
    async fn publishes_session_created_event() {
        let repo = Arc::new(MockSessionRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = StartSessionHandler::new(repo, publisher.clone(), audit);

        let cmd = StartSessionCommand {
            ip_address: "203.0.113.7".to_string(),
        };

        let result = handler.handle(cmd, test_metadata()).await.unwrap();

        let events = publisher.published_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "session.created");
        assert_eq!(events[0].aggregate_id, result.session.id().to_string());
    }

    #[tokio::test]
    async fn reuses_a_valid_existing_session() {
        let existing = committed_session("203.0.113.7");
        let existing_id = existing.id().clone();
        let repo = Arc::new(MockSessionRepository::with_session(existing));
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = StartSessionHandler::new(repo.clone(), publisher.clone(), audit.clone());

        let cmd = StartSessionCommand {
            ip_address: "203.0.113.7".to_string(),
        };

        let result = handler.handle(cmd, test_metadata()).await.unwrap();

        assert!(result.reused);
        assert_eq!(result.session.id(), &existing_id);
        assert_eq!(repo.stored_sessions().len(), 1);
        assert!(publisher.published_events().is_empty());
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn supersedes_an_aged_out_session() {
        let old = aged_session("203.0.113.7", 25);
        let old_id = old.id().clone();
        let repo = Arc::new(MockSessionRepository::with_session(old));
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = StartSessionHandler::new(repo.clone(), publisher, audit);

        let cmd = StartSessionCommand {
            ip_address: "203.0.113.7".to_string(),
        };

        let result = handler.handle(cmd, test_metadata()).await.unwrap();

        assert!(!result.reused);
        assert_ne!(result.session.id(), &old_id);
        assert_eq!(repo.stored_sessions().len(), 2);
    }

    #[tokio::test]
    async fn rejects_a_malformed_ip() {
        let repo = Arc::new(MockSessionRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = StartSessionHandler::new(repo.clone(), publisher.clone(), audit);

        let cmd = StartSessionCommand {
            ip_address: "not-an-ip".to_string(),
        };

        let err = handler.handle(cmd, test_metadata()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(repo.stored_sessions().is_empty());
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn stamps_metadata_onto_published_events() {
        let repo = Arc::new(MockSessionRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = StartSessionHandler::new(repo, publisher.clone(), audit);

        let cmd = StartSessionCommand {
            ip_address: "198.51.100.4".to_string(),
        };

        handler.handle(cmd, test_metadata()).await.unwrap();

        let events = publisher.published_events();
        assert_eq!(
            events[0].metadata.correlation_id,
            Some("test-correlation-id".to_string())
        );
        assert_eq!(
            events[0].metadata.ip_address,
            Some("203.0.113.7".to_string())
        );
    }

    #[tokio::test]
    async fn does_not_publish_on_save_failure() {
        let repo = Arc::new(MockSessionRepository::failing());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = StartSessionHandler::new(repo, publisher.clone(), audit);

        let cmd = StartSessionCommand {
            ip_address: "203.0.113.7".to_string(),
        };

        let err = handler.handle(cmd, test_metadata()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn records_a_business_audit_entry() {
        let repo = Arc::new(MockSessionRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = StartSessionHandler::new(repo, publisher, audit.clone());

        let cmd = StartSessionCommand {
            ip_address: "203.0.113.7".to_string(),
        };

        let result = handler.handle(cmd, test_metadata()).await.unwrap();

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, "session.started");
        assert_eq!(
            entries[0].payload["session_id"],
            result.session.id().to_string()
        );
    }
}
