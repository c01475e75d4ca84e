//! CreateIncentiveHandler - Command handler for creating payout incentives.

use std::sync::Arc;

use serde_json::json;

use crate::application::handlers::stamp_envelopes;
use crate::domain::foundation::{CommandMetadata, DomainError, SessionId};
use crate::domain::incentive::Incentive;
use crate::ports::{AuditLogger, EventPublisher, IncentiveRepository};

/// Command to create a pending incentive.
#[derive(Debug, Clone)]
pub struct CreateIncentiveCommand {
    pub session_id: SessionId,
    pub recipient_email: String,
    pub amount_cents: i64,
    pub currency: String,
}

/// Result of incentive creation.
#[derive(Debug, Clone)]
pub struct CreateIncentiveResult {
    pub incentive: Incentive,
}

/// Handler for creating incentives.
///
/// Creation checks shape only (plausible email, positive amount, ISO
/// currency); the payout policy limits are enforced later when the
/// payout is processed.
pub struct CreateIncentiveHandler {
    repository: Arc<dyn IncentiveRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    audit_logger: Arc<dyn AuditLogger>,
}

impl CreateIncentiveHandler {
    pub fn new(
        repository: Arc<dyn IncentiveRepository>,
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
        cmd: CreateIncentiveCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateIncentiveResult, DomainError> {
        // 1. Create the aggregate; shape violations abort here
        let mut incentive = Incentive::create(
            cmd.session_id,
            cmd.recipient_email,
            cmd.amount_cents,
            cmd.currency,
        )?;

        // 2. Persist
        self.repository.save(&incentive).await?;

        // 3. Publish the buffered events
        let envelopes = stamp_envelopes(
            incentive
                .uncommitted_events()
                .iter()
                .map(|e| e.to_envelope())
                .collect(),
            &metadata,
        );
        self.event_publisher.publish_all(envelopes).await?;
        incentive.mark_events_committed();

        // 4. Audit trail
        self.audit_logger
            .log_business(
                "incentive.created",
                json!({
                    "incentive_id": incentive.id.to_string(),
                    "session_id": incentive.session_id.to_string(),
                    "amount_cents": incentive.amount_cents,
                    "currency": incentive.currency,
                }),
            )
            .await?;

        Ok(CreateIncentiveResult { incentive })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, EventEnvelope, IncentiveId};
    use crate::domain::incentive::IncentiveStatus;
    use crate::ports::AuditEntry;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockIncentiveRepository {
        incentives: Mutex<Vec<Incentive>>,
        fail_save: bool,
    }

    impl MockIncentiveRepository {
        fn new() -> Self {
            Self {
                incentives: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                incentives: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn stored_incentives(&self) -> Vec<Incentive> {
            self.incentives.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IncentiveRepository for MockIncentiveRepository {
        async fn save(&self, incentive: &Incentive) -> Result<(), DomainError> {
            if self.fail_save {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated save failure",
                ));
            }
            let mut incentives = self.incentives.lock().unwrap();
            if let Some(existing) = incentives.iter_mut().find(|i| i.id == incentive.id) {
                *existing = incentive.clone();
            } else {
                incentives.push(incentive.clone());
            }
            Ok(())
        }

        async fn find_by_id(&self, id: &IncentiveId) -> Result<Option<Incentive>, DomainError> {
            Ok(self
                .incentives
                .lock()
                .unwrap()
                .iter()
                .find(|i| &i.id == id)
                .cloned())
        }

        async fn find_pending(&self) -> Result<Vec<Incentive>, DomainError> {
            Ok(self
                .incentives
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.status == IncentiveStatus::Pending)
                .cloned()
                .collect())
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

    fn test_command() -> CreateIncentiveCommand {
        CreateIncentiveCommand {
            session_id: SessionId::generate(),
            recipient_email: "winner@example.com".to_string(),
            amount_cents: 500,
            currency: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_a_pending_incentive() {
        let repo = Arc::new(MockIncentiveRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = CreateIncentiveHandler::new(repo.clone(), publisher.clone(), audit);

        let result = handler.handle(test_command(), test_metadata()).await.unwrap();

        assert_eq!(result.incentive.status, IncentiveStatus::Pending);
        assert_eq!(result.incentive.amount_cents, 500);
        assert_eq!(repo.stored_incentives().len(), 1);
        let events = publisher.published_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "incentive.created");
    }

    #[tokio::test]
    async fn normalizes_the_currency() {
        let repo = Arc::new(MockIncentiveRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = CreateIncentiveHandler::new(repo, publisher, audit);

        let cmd = CreateIncentiveCommand {
            currency: "usd".to_string(),
            ..test_command()
        };

        let result = handler.handle(cmd, test_metadata()).await.unwrap();

        assert_eq!(result.incentive.currency, "USD");
    }

    #[tokio::test]
    async fn rejects_an_implausible_email() {
        let repo = Arc::new(MockIncentiveRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = CreateIncentiveHandler::new(repo.clone(), publisher.clone(), audit);

        let cmd = CreateIncentiveCommand {
            recipient_email: "not-an-email".to_string(),
            ..test_command()
        };

        let err = handler.handle(cmd, test_metadata()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(repo.stored_incentives().is_empty());
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn rejects_a_non_positive_amount() {
        let repo = Arc::new(MockIncentiveRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = CreateIncentiveHandler::new(repo, publisher, audit);

        let cmd = CreateIncentiveCommand {
            amount_cents: 0,
            ..test_command()
        };

        let err = handler.handle(cmd, test_metadata()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfRange);
    }

    #[tokio::test]
    async fn audit_entry_links_the_session() {
        let repo = Arc::new(MockIncentiveRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = CreateIncentiveHandler::new(repo, publisher, audit.clone());

        let cmd = test_command();
        let session_id = cmd.session_id.clone();

        handler.handle(cmd, test_metadata()).await.unwrap();

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, "incentive.created");
        assert_eq!(entries[0].payload["session_id"], session_id.to_string());
        assert_eq!(entries[0].payload["amount_cents"], 500);
    }

    #[tokio::test]
    async fn does_not_publish_on_save_failure() {
        let repo = Arc::new(MockIncentiveRepository::failing());
        let publisher = Arc::new(MockEventPublisher::new());
        let audit = Arc::new(MockAuditLogger::new());
        let handler = CreateIncentiveHandler::new(repo, publisher.clone(), audit);

        let err = handler
            .handle(test_command(), test_metadata())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(publisher.published_events().is_empty());
    }
}
