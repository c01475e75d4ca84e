//! Command infrastructure for CQRS handlers.
//!
//! This module provides the standard types for command handlers:
//! - `CommandMetadata` - Context that flows through command processing
//!
//! # DRY Pattern
//!
//! Instead of each handler accepting `correlation_id: Option<String>,
//! client_ip: Option<String>, trace_id: Option<String>`, they accept a
//! single `CommandMetadata` struct. This:
//! - Reduces function parameter count
//! - Ensures consistent naming across all handlers
//! - Makes it easy to add new metadata fields without changing signatures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata context for command handlers.
///
/// Carries tracing, correlation, and caller context through the command
/// processing pipeline. This should be passed to all command handlers
/// and propagated to emitted events.
///
/// The platform has no authenticated users; the caller is identified by
/// client IP when one is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// IP of the client the command originates from, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    client_ip: Option<String>,

    /// Links related operations across a single request.
    /// Generated at API boundary if not provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Distributed tracing span/trace ID.
    /// Propagated from incoming requests (e.g., from OpenTelemetry).
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,

    /// Source of this command (e.g., "api", "scheduler").
    /// Useful for audit logs and debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates empty command metadata.
    ///
    /// Generates a correlation ID automatically if not provided later.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Add the client IP the command originates from.
    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add trace ID for distributed tracing.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the client IP if known.
    pub fn client_ip(&self) -> Option<&str> {
        self.client_ip.as_deref()
    }

    /// Returns the correlation ID, generating one if not set.
    ///
    /// This ensures every command has a correlation ID for tracing,
    /// even if the API layer didn't provide one.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Returns the trace ID if set.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture with a documentation-range client IP.
    ///
    /// Only available in test builds.
    pub fn test_fixture() -> Self {
        Self::new()
            .with_client_ip("203.0.113.7")
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
