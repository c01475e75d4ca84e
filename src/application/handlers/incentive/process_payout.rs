//! ProcessPayoutHandler - Command handler for settling incentive payouts.
//!
//! Runs the full payout pipeline for one incentive: policy validation,
//! the gateway call, and the resulting state transition. Policy
//! rejections and gateway declines are expected outcomes and come back
//! as [`PayoutOutcome::Rejected`]; only infrastructure trouble surfaces
//! as an error.

use std::sync::Arc;

use serde_json::json;

use crate::application::handlers::stamp_envelopes;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, IncentiveId, StateMachine};
use crate::domain::incentive::{Incentive, IncentiveValidationService};
use crate::ports::{
    AuditLogger, EventPublisher, IncentiveRepository, PaymentGateway, PaymentRequest,
};

/// Command to process one incentive payout.
#[derive(Debug, Clone)]
pub struct ProcessPayoutCommand {
    pub incentive_id: IncentiveId,
}

/// How the payout ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayoutOutcome {
    /// The gateway settled the payout.
    Paid { transaction_id: String },

    /// The payout was refused, either by policy or by the gateway.
    Rejected { reasons: Vec<String> },
}

/// Result of a payout attempt.
#[derive(Debug, Clone)]
pub struct ProcessPayoutResult {
    pub incentive: Incentive,
    pub outcome: PayoutOutcome,
}

/// Handler for processing incentive payouts.
pub struct ProcessPayoutHandler {
    repository: Arc<dyn IncentiveRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    audit_logger: Arc<dyn AuditLogger>,
    payment_gateway: Arc<dyn PaymentGateway>,
    validation: IncentiveValidationService,
}

impl ProcessPayoutHandler {
    pub fn new(
        repository: Arc<dyn IncentiveRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        audit_logger: Arc<dyn AuditLogger>,
        payment_gateway: Arc<dyn PaymentGateway>,
        validation: IncentiveValidationService,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            audit_logger,
            payment_gateway,
            validation,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessPayoutCommand,
        metadata: CommandMetadata,
    ) -> Result<ProcessPayoutResult, DomainError> {
        // 1. Load the incentive
        let mut incentive = self
            .repository
            .find_by_id(&cmd.incentive_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::IncentiveNotFound,
                    format!("Incentive {} not found", cmd.incentive_id),
                )
            })?;

        // 2. Settled records cannot be processed again
        if incentive.status.is_terminal() {
            return Err(DomainError::new(
                ErrorCode::AlreadyProcessed,
                format!(
                    "Incentive {} already settled as {}",
                    incentive.id, incentive.status
                ),
            ));
        }

        // 3. Policy check; violations reject the incentive for good
        let validation = self.validation.validate(&incentive);
        if !validation.is_valid() {
            let reasons = validation.into_errors();
            incentive.reject(reasons.join("; "))?;
            self.save_and_publish(&mut incentive, &metadata).await?;
            self.audit_logger
                .log_security(
                    "incentive.rejected",
                    json!({
                        "incentive_id": incentive.id.to_string(),
                        "reasons": reasons,
                    }),
                )
                .await?;
            return Ok(ProcessPayoutResult {
                incentive,
                outcome: PayoutOutcome::Rejected { reasons },
            });
        }

        // 4. Mark validated; a record left validated by an earlier
        //    gateway failure goes straight to the retry
        if !incentive.is_payable() {
            incentive.mark_validated()?;
        }

        // 5. Ask the gateway to settle
        let request = PaymentRequest {
            incentive_id: incentive.id,
            recipient_email: incentive.recipient_email.clone(),
            amount_cents: incentive.amount_cents,
            currency: incentive.currency.clone(),
            idempotency_key: Some(incentive.id.to_string()),
        };

        match self.payment_gateway.process_payment(request).await {
            Ok(response) => {
                // 6a. Settled: record the transaction
                incentive.mark_paid(response.transaction_id.clone())?;
                self.save_and_publish(&mut incentive, &metadata).await?;
                self.audit_logger
                    .log_business(
                        "incentive.paid",
                        json!({
                            "incentive_id": incentive.id.to_string(),
                            "transaction_id": response.transaction_id.clone(),
                            "amount_cents": incentive.amount_cents,
                        }),
                    )
                    .await?;
                Ok(ProcessPayoutResult {
                    incentive,
                    outcome: PayoutOutcome::Paid {
                        transaction_id: response.transaction_id,
                    },
                })
            }
            Err(err) if err.is_declined() => {
                // 6b. Declined: the gateway's refusal is final
                let reason = err.to_string();
                incentive.reject(reason.clone())?;
                self.save_and_publish(&mut incentive, &metadata).await?;
                self.audit_logger
                    .log_error(
                        "incentive.payment_declined",
                        json!({
                            "incentive_id": incentive.id.to_string(),
                            "reason": reason.clone(),
                        }),
                    )
                    .await?;
                Ok(ProcessPayoutResult {
                    incentive,
                    outcome: PayoutOutcome::Rejected {
                        reasons: vec![reason],
                    },
                })
            }
            Err(err) => {
                // 6c. Gateway trouble: keep the validated state so a
                //     later attempt can settle it
                self.save_and_publish(&mut incentive, &metadata).await?;
                self.audit_logger
                    .log_error(
                        "incentive.payment_failed",
                        json!({
                            "incentive_id": incentive.id.to_string(),
                            "error": err.to_string(),
                        }),
                    )
                    .await?;
                Err(err.into())
            }
        }
    }

    async fn save_and_publish(
        &self,
        incentive: &mut Incentive,
        metadata: &CommandMetadata,
    ) -> Result<(), DomainError> {
        self.repository.save(incentive).await?;

        let envelopes = stamp_envelopes(
            incentive
                .uncommitted_events()
                .iter()
                .map(|e| e.to_envelope())
                .collect(),
            metadata,
        );
        self.event_publisher.publish_all(envelopes).await?;
        incentive.mark_events_committed();
        Ok(())
    }
}
