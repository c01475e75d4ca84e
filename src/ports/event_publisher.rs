//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the application layer announces drained aggregate
//! events without knowing about the underlying transport mechanism.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (handlers may receive duplicates)
/// - `publish_all` preserves the order of the given events
/// - Errors are propagated to the caller
///
/// # Example
///
/// ```ignore
/// let envelopes: Vec<EventEnvelope> =
///     session.uncommitted_events().iter().map(|e| e.to_envelope()).collect();
/// publisher.publish_all(envelopes).await?;
/// session.mark_events_committed();
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    ///
    /// The event is wrapped in an `EventEnvelope` containing:
    /// - Event ID for deduplication
    /// - Event type for routing
    /// - Aggregate context for correlation
    /// - Metadata for tracing
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    ///
    /// All events are published or none are (where supported by adapter).
    /// For adapters that don't support atomic publishing, events are
    /// published sequentially with best-effort delivery.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
