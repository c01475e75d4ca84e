//! AuditLogger port - Interface for categorized audit logging.
//!
//! Business operations, security-relevant denials, and failures each leave
//! an audit trail. The port keeps the domain ignorant of where entries end
//! up (structured logs, a database table, a SIEM feed).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::domain::foundation::{DomainError, Timestamp};

/// Category of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    /// Ordinary business operations (session started, payout settled).
    Business,

    /// Security-relevant occurrences (quota exhaustion, policy rejections).
    Security,

    /// Failures worth an operator's attention.
    Error,
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditCategory::Business => "business",
            AuditCategory::Security => "security",
            AuditCategory::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// One auditable occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Category the entry files under.
    pub category: AuditCategory,

    /// Dotted event-type tag, e.g. `session.started`.
    pub event_type: String,

    /// Opaque structured context for the entry.
    pub payload: JsonValue,

    /// When the occurrence happened.
    pub occurred_at: Timestamp,
}

impl AuditEntry {
    /// Creates an entry in the given category, stamped now.
    pub fn new(category: AuditCategory, event_type: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            category,
            event_type: event_type.into(),
            payload,
            occurred_at: Timestamp::now(),
        }
    }

    /// Creates a business entry.
    pub fn business(event_type: impl Into<String>, payload: JsonValue) -> Self {
        Self::new(AuditCategory::Business, event_type, payload)
    }

    /// Creates a security entry.
    pub fn security(event_type: impl Into<String>, payload: JsonValue) -> Self {
        Self::new(AuditCategory::Security, event_type, payload)
    }

    /// Creates an error entry.
    pub fn error(event_type: impl Into<String>, payload: JsonValue) -> Self {
        Self::new(AuditCategory::Error, event_type, payload)
    }
}

/// Port for recording audit entries.
///
/// Implementations must not fail the business operation being audited
/// for transient sink trouble where they can avoid it; an audit sink
/// outage is reported but handlers decide whether to propagate.
#[async_trait]
pub trait AuditLogger: Send + Sync {
    /// Record one audit entry.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on sink failure
    async fn log(&self, entry: AuditEntry) -> Result<(), DomainError>;

    /// Record a business entry.
    async fn log_business(&self, event_type: &str, payload: JsonValue) -> Result<(), DomainError> {
        self.log(AuditEntry::business(event_type, payload)).await
    }

    /// Record a security entry.
    async fn log_security(&self, event_type: &str, payload: JsonValue) -> Result<(), DomainError> {
        self.log(AuditEntry::security(event_type, payload)).await
    }

    /// Record an error entry.
    async fn log_error(&self, event_type: &str, payload: JsonValue) -> Result<(), DomainError> {
        self.log(AuditEntry::error(event_type, payload)).await
    }
}
