//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, event infrastructure, and error
//! types that form the vocabulary of the TalentLens domain.

mod command;
mod errors;
mod events;
mod ids;
mod ip_address;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{AnalyticsEventId, IncentiveId, SessionId};
pub use ip_address::IpAddress;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
