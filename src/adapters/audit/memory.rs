//! In-memory audit logger for testing.
//!
//! Captures entries so tests can assert on what was audited.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{AuditCategory, AuditEntry, AuditLogger};

/// In-memory audit logger.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
pub struct InMemoryAuditLogger {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditLogger {
    /// Creates a new empty audit logger.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns all captured entries (for test assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .read()
            .expect("InMemoryAuditLogger: entries lock poisoned")
            .clone()
    }

    /// Returns captured entries in a specific category.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn entries_of_category(&self, category: AuditCategory) -> Vec<AuditEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Checks if an entry with the given event type was captured.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn has_entry(&self, event_type: &str) -> bool {
        self.entries
            .read()
            .expect("InMemoryAuditLogger: entries lock poisoned")
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Returns count of captured entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn entry_count(&self) -> usize {
        self.entries
            .read()
            .expect("InMemoryAuditLogger: entries lock poisoned")
            .len()
    }

    /// Clears all captured entries (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.entries
            .write()
            .expect("InMemoryAuditLogger: entries write lock poisoned")
            .clear();
    }
}

impl Default for InMemoryAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogger for InMemoryAuditLogger {
    async fn log(&self, entry: AuditEntry) -> Result<(), DomainError> {
        self.entries
            .write()
            .expect("InMemoryAuditLogger: entries write lock poisoned")
            .push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn log_captures_the_entry() {
        let logger = InMemoryAuditLogger::new();

        logger
            .log_business("session.started", json!({"ip": "10.0.0.1"}))
            .await
            .unwrap();

        assert_eq!(logger.entry_count(), 1);
        assert!(logger.has_entry("session.started"));
    }

    #[tokio::test]
    async fn entries_of_category_filters_correctly() {
        let logger = InMemoryAuditLogger::new();

        logger.log_business("a.b", json!({})).await.unwrap();
        logger.log_security("c.d", json!({})).await.unwrap();
        logger.log_security("e.f", json!({})).await.unwrap();

        let security = logger.entries_of_category(AuditCategory::Security);
        assert_eq!(security.len(), 2);
        assert_eq!(security[0].event_type, "c.d");
    }

    #[tokio::test]
    async fn clear_removes_all_entries() {
        let logger = InMemoryAuditLogger::new();

        logger.log_error("x.y", json!({})).await.unwrap();
        assert_eq!(logger.entry_count(), 1);

        logger.clear();
        assert_eq!(logger.entry_count(), 0);
    }
}
