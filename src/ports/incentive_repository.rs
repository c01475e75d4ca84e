//! Incentive repository port.
//!
//! Defines the contract for persisting Incentive aggregates and for
//! finding the payout backlog.

use crate::domain::foundation::{DomainError, IncentiveId};
use crate::domain::incentive::Incentive;
use async_trait::async_trait;

/// Repository port for Incentive aggregate persistence.
#[async_trait]
pub trait IncentiveRepository: Send + Sync {
    /// Save an incentive, inserting or replacing by id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, incentive: &Incentive) -> Result<(), DomainError>;

    /// Find an incentive by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &IncentiveId) -> Result<Option<Incentive>, DomainError>;

    /// Find all incentives still awaiting validation.
    ///
    /// Returns incentives ordered by created_at ascending, oldest first.
    async fn find_pending(&self) -> Result<Vec<Incentive>, DomainError>;
}
