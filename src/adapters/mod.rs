//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event bus implementations
//! - `audit` - Audit trail sinks

pub mod audit;
pub mod events;

pub use audit::{InMemoryAuditLogger, TracingAuditLogger};
pub use events::InMemoryEventBus;
