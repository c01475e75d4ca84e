//! Application handlers.
//!
//! Command handlers that orchestrate domain operations. Each handler
//! loads or creates an aggregate, invokes domain behavior, persists the
//! result, and publishes the events the aggregate buffered.

pub mod analytics;
pub mod incentive;
pub mod session;

pub use analytics::{
    ProcessEventCommand, ProcessEventHandler, ProcessEventResult, ProcessPendingResult,
    TrackEventCommand, TrackEventHandler, TrackEventResult,
};
pub use incentive::{
    CreateIncentiveCommand, CreateIncentiveHandler, CreateIncentiveResult, PayoutOutcome,
    ProcessPayoutCommand, ProcessPayoutHandler, ProcessPayoutResult,
};
pub use session::{
    ExpireSessionCommand, ExpireSessionHandler, ExpireSessionResult, GrantBonusCommand,
    GrantBonusHandler, GrantBonusResult, RecordUsageCommand, RecordUsageHandler,
    RecordUsageResult, StartSessionCommand, StartSessionHandler, StartSessionResult,
};

use crate::domain::foundation::{CommandMetadata, EventEnvelope};

/// Stamps command metadata onto a batch of event envelopes.
///
/// Resolves the correlation ID once so every envelope in the batch
/// shares it, then copies the client IP and trace ID when present.
pub(crate) fn stamp_envelopes(
    envelopes: Vec<EventEnvelope>,
    metadata: &CommandMetadata,
) -> Vec<EventEnvelope> {
    let correlation_id = metadata.correlation_id();
    envelopes
        .into_iter()
        .map(|envelope| {
            let mut envelope = envelope.with_correlation_id(correlation_id.clone());
            if let Some(ip) = metadata.client_ip() {
                envelope = envelope.with_ip_address(ip);
            }
            if let Some(trace_id) = metadata.trace_id() {
                envelope = envelope.with_trace_id(trace_id);
            }
            envelope
        })
        .collect()
}
