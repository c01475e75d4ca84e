//! Audit logger adapters.
//!
//! - `TracingAuditLogger` - Routes entries into the structured log stream
//! - `InMemoryAuditLogger` - Captures entries for test assertions

mod memory;
mod tracing_audit;

pub use memory::InMemoryAuditLogger;
pub use tracing_audit::TracingAuditLogger;
