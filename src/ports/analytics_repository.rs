//! Analytics event repository port.
//!
//! Defines the contract for persisting analytics event records and for
//! the two maintenance queries the processing pipeline needs: the pending
//! backlog and the retention purge.

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::foundation::{AnalyticsEventId, DomainError, Timestamp};
use async_trait::async_trait;

/// Repository port for AnalyticsEvent persistence.
#[async_trait]
pub trait AnalyticsEventRepository: Send + Sync {
    /// Save an analytics event, inserting or replacing by id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, event: &AnalyticsEvent) -> Result<(), DomainError>;

    /// Find an analytics event by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: &AnalyticsEventId,
    ) -> Result<Option<AnalyticsEvent>, DomainError>;

    /// Find all events still waiting to be processed.
    ///
    /// Returns events ordered by created_at ascending, oldest first.
    async fn find_pending(&self) -> Result<Vec<AnalyticsEvent>, DomainError>;

    /// Count events recorded since the start of the current UTC day.
    async fn count_today(&self) -> Result<u64, DomainError>;

    /// Delete events whose retention window has lapsed as of `now`.
    ///
    /// Returns the number of events removed.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn delete_expired(&self, now: Timestamp) -> Result<u64, DomainError>;
}
