//! Integration tests for the incentive payout pipeline.
//!
//! These tests verify the end-to-end flow:
//! 1. CreateIncentiveHandler records a pending payout for a session
//! 2. ProcessPayoutHandler validates it against the payout policy
//! 3. The payment gateway settles, declines, or fails the payout
//! 4. The incentive lands in its terminal state with a full event trail
//!
//! Uses in-memory implementations plus a scripted gateway so every branch
//! of the pipeline can be exercised without external dependencies.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use talentlens_core::adapters::{InMemoryAuditLogger, InMemoryEventBus};
use talentlens_core::application::{
    CreateIncentiveCommand, CreateIncentiveHandler, PayoutOutcome, ProcessPayoutCommand,
    ProcessPayoutHandler,
};
use talentlens_core::config::PayoutConfig;
use talentlens_core::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, IncentiveId, SessionId,
};
use talentlens_core::domain::incentive::{Incentive, IncentiveStatus};
use talentlens_core::ports::{
    AuditCategory, IncentiveRepository, PaymentError, PaymentGateway, PaymentRequest,
    PaymentResponse,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory incentive store for testing
struct TestIncentiveStore {
    incentives: RwLock<Vec<Incentive>>,
}

impl TestIncentiveStore {
    fn new() -> Self {
        Self {
            incentives: RwLock::new(Vec::new()),
        }
    }

    async fn get(&self, id: &IncentiveId) -> Option<Incentive> {
        self.incentives
            .read()
            .await
            .iter()
            .find(|i| &i.id == id)
            .cloned()
    }
}

#[async_trait]
impl IncentiveRepository for TestIncentiveStore {
    async fn save(&self, incentive: &Incentive) -> Result<(), DomainError> {
        let mut incentives = self.incentives.write().await;
        if let Some(existing) = incentives.iter_mut().find(|i| i.id == incentive.id) {
            *existing = incentive.clone();
        } else {
            incentives.push(incentive.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &IncentiveId) -> Result<Option<Incentive>, DomainError> {
        Ok(self.get(id).await)
    }

    async fn find_pending(&self) -> Result<Vec<Incentive>, DomainError> {
        Ok(self
            .incentives
            .read()
            .await
            .iter()
            .filter(|i| i.status == IncentiveStatus::Pending)
            .cloned()
            .collect())
    }
}

/// Gateway that replays a scripted sequence of responses
struct ScriptedGateway {
    script: Mutex<VecDeque<Result<PaymentResponse, PaymentError>>>,
    requests: Mutex<Vec<PaymentRequest>>,
}

impl ScriptedGateway {
    fn new(script: Vec<Result<PaymentResponse, PaymentError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn process_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentResponse, PaymentError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedGateway: script exhausted")
    }
}

fn settled(transaction_id: &str) -> Result<PaymentResponse, PaymentError> {
    Ok(PaymentResponse {
        transaction_id: transaction_id.to_string(),
        processed_at: 1_700_000_000,
    })
}

fn metadata() -> CommandMetadata {
    CommandMetadata::new().with_correlation_id("it-payout-flow")
}

fn create_command(amount_cents: i64) -> CreateIncentiveCommand {
    CreateIncentiveCommand {
        session_id: SessionId::generate(),
        recipient_email: "winner@example.com".to_string(),
        amount_cents,
        currency: "USD".to_string(),
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

/// Tests the happy path: create a pending incentive, validate it against
/// the default policy, settle it through the gateway.
#[tokio::test]
async fn incentive_flows_from_creation_to_payment() {
    let store = Arc::new(TestIncentiveStore::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let audit = Arc::new(InMemoryAuditLogger::new());
    let gateway = Arc::new(ScriptedGateway::new(vec![settled("txn_flow_1")]));

    let create = CreateIncentiveHandler::new(store.clone(), bus.clone(), audit.clone());
    let payout = ProcessPayoutHandler::new(
        store.clone(),
        bus.clone(),
        audit.clone(),
        gateway.clone(),
        PayoutConfig::default().validation_service(),
    );

    let created = create.handle(create_command(500), metadata()).await.unwrap();
    assert_eq!(created.incentive.status, IncentiveStatus::Pending);

    let result = payout
        .handle(
            ProcessPayoutCommand {
                incentive_id: created.incentive.id,
            },
            metadata(),
        )
        .await
        .unwrap();

    assert_eq!(
        result.outcome,
        PayoutOutcome::Paid {
            transaction_id: "txn_flow_1".to_string()
        }
    );

    let stored = store.get(&created.incentive.id).await.unwrap();
    assert_eq!(stored.status, IncentiveStatus::Paid);
    assert_eq!(stored.transaction_id.as_deref(), Some("txn_flow_1"));

    let types: Vec<_> = bus
        .published_events()
        .iter()
        .map(|e| e.event_type.clone())
        .collect();
    assert_eq!(
        types,
        vec!["incentive.created", "incentive.validated", "incentive.paid"]
    );
    assert!(audit.has_entry("incentive.created"));
    assert!(audit.has_entry("incentive.paid"));
}

/// Tests that a policy violation rejects the incentive before the gateway
/// is ever contacted.
#[tokio::test]
async fn policy_violation_short_circuits_the_gateway() {
    let store = Arc::new(TestIncentiveStore::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let audit = Arc::new(InMemoryAuditLogger::new());
    let gateway = Arc::new(ScriptedGateway::new(vec![settled("txn_never")]));

    let create = CreateIncentiveHandler::new(store.clone(), bus.clone(), audit.clone());
    let payout = ProcessPayoutHandler::new(
        store.clone(),
        bus.clone(),
        audit.clone(),
        gateway.clone(),
        PayoutConfig::default().validation_service(),
    );

    // 50 cents passes construction but sits below the policy minimum
    let created = create.handle(create_command(50), metadata()).await.unwrap();

    let result = payout
        .handle(
            ProcessPayoutCommand {
                incentive_id: created.incentive.id,
            },
            metadata(),
        )
        .await
        .unwrap();

    match result.outcome {
        PayoutOutcome::Rejected { reasons } => {
            assert!(reasons[0].contains("below the minimum"));
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
    assert!(gateway.requests().is_empty());

    let stored = store.get(&created.incentive.id).await.unwrap();
    assert_eq!(stored.status, IncentiveStatus::Rejected);
    assert!(stored.rejection_reason.is_some());
    assert_eq!(
        audit.entries_of_category(AuditCategory::Security)[0].event_type,
        "incentive.rejected"
    );
}

/// Tests that a gateway outage surfaces as an error while keeping the
/// incentive validated, so a later attempt can settle it.
#[tokio::test]
async fn gateway_outage_leaves_a_retryable_incentive() {
    let store = Arc::new(TestIncentiveStore::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let audit = Arc::new(InMemoryAuditLogger::new());
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Err(PaymentError::gateway("connection reset")),
        settled("txn_retry_9"),
    ]));

    let create = CreateIncentiveHandler::new(store.clone(), bus.clone(), audit.clone());
    let payout = ProcessPayoutHandler::new(
        store.clone(),
        bus.clone(),
        audit.clone(),
        gateway.clone(),
        PayoutConfig::default().validation_service(),
    );

    let created = create.handle(create_command(500), metadata()).await.unwrap();
    let cmd = ProcessPayoutCommand {
        incentive_id: created.incentive.id,
    };

    // First attempt hits the outage
    let err = payout.handle(cmd.clone(), metadata()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentGatewayError);
    assert_eq!(
        store.get(&created.incentive.id).await.unwrap().status,
        IncentiveStatus::Validated
    );

    // Second attempt settles
    let result = payout.handle(cmd, metadata()).await.unwrap();
    assert_eq!(
        result.outcome,
        PayoutOutcome::Paid {
            transaction_id: "txn_retry_9".to_string()
        }
    );
    assert_eq!(gateway.requests().len(), 2);

    // Validation happened exactly once across both attempts
    let types: Vec<_> = bus
        .published_events()
        .iter()
        .map(|e| e.event_type.clone())
        .collect();
    assert_eq!(
        types,
        vec!["incentive.created", "incentive.validated", "incentive.paid"]
    );
}

/// Tests that a gateway decline is terminal: the incentive is rejected
/// and cannot be processed again.
#[tokio::test]
async fn declined_payout_is_final() {
    let store = Arc::new(TestIncentiveStore::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let audit = Arc::new(InMemoryAuditLogger::new());
    let gateway = Arc::new(ScriptedGateway::new(vec![Err(PaymentError::declined(
        "account closed",
    ))]));

    let create = CreateIncentiveHandler::new(store.clone(), bus.clone(), audit.clone());
    let payout = ProcessPayoutHandler::new(
        store.clone(),
        bus.clone(),
        audit.clone(),
        gateway.clone(),
        PayoutConfig::default().validation_service(),
    );

    let created = create.handle(create_command(500), metadata()).await.unwrap();
    let cmd = ProcessPayoutCommand {
        incentive_id: created.incentive.id,
    };

    let result = payout.handle(cmd.clone(), metadata()).await.unwrap();
    match result.outcome {
        PayoutOutcome::Rejected { reasons } => {
            assert!(reasons[0].contains("account closed"));
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
    assert!(audit.has_entry("incentive.payment_declined"));

    // Settled records refuse reprocessing
    let err = payout.handle(cmd, metadata()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AlreadyProcessed);
    assert_eq!(gateway.requests().len(), 1);
}
