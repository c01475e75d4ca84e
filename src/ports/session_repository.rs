//! Session repository port (write side).
//!
//! Defines the contract for persisting and retrieving UserSession
//! aggregates. Implementations handle the actual database operations.
//!
//! # Design
//!
//! - **Write-focused**: Optimized for aggregate persistence
//! - **IP-scoped**: Sessions are looked up by client IP as often as by id
//! - **Upsert semantics**: `save` covers both insert and update

use crate::domain::foundation::{DomainError, IpAddress, SessionId, Timestamp};
use crate::domain::session::UserSession;
use async_trait::async_trait;

/// Repository port for UserSession aggregate persistence.
///
/// Implementations must ensure:
/// - `save` upserts by session id
/// - Proper indexing for IP-based lookups
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a session, inserting or replacing by id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &UserSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<UserSession>, DomainError>;

    /// Find the session currently keyed to a client IP.
    ///
    /// Returns `None` if the IP has no session. When an IP has ended up
    /// with several sessions, implementations return the most recently
    /// created one.
    async fn find_by_ip(&self, ip: &IpAddress) -> Result<Option<UserSession>, DomainError>;

    /// Delete sessions created before the cutoff.
    ///
    /// Returns the number of sessions removed.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn delete_expired(&self, cutoff: Timestamp) -> Result<u64, DomainError>;
}
