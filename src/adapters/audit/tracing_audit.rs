//! Audit logger backed by `tracing`.
//!
//! Routes audit entries into the structured log stream at a level matching
//! their category. The host application decides where the stream goes by
//! installing its own subscriber.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{AuditCategory, AuditEntry, AuditLogger};

/// Audit logger that emits entries as tracing events.
///
/// Levels by category: business entries at `info`, security entries at
/// `warn`, error entries at `error`. Emission cannot fail, so `log`
/// always returns `Ok`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLogger;

impl TracingAuditLogger {
    /// Creates the logger.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditLogger for TracingAuditLogger {
    async fn log(&self, entry: AuditEntry) -> Result<(), DomainError> {
        match entry.category {
            AuditCategory::Business => {
                tracing::info!(
                    audit.category = %entry.category,
                    audit.event_type = %entry.event_type,
                    audit.payload = %entry.payload,
                    occurred_at = %entry.occurred_at,
                    "audit entry"
                );
            }
            AuditCategory::Security => {
                tracing::warn!(
                    audit.category = %entry.category,
                    audit.event_type = %entry.event_type,
                    audit.payload = %entry.payload,
                    occurred_at = %entry.occurred_at,
                    "audit entry"
                );
            }
            AuditCategory::Error => {
                tracing::error!(
                    audit.category = %entry.category,
                    audit.event_type = %entry.event_type,
                    audit.payload = %entry.payload,
                    occurred_at = %entry.occurred_at,
                    "audit entry"
                );
            }
        }
        Ok(())
    }
}
