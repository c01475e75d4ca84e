//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `SessionRepository` - UserSession aggregate persistence
//! - `AnalyticsEventRepository` - Analytics event persistence and purge
//! - `IncentiveRepository` - Incentive aggregate persistence
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//!
//! ## Operational Ports
//!
//! - `AuditLogger` - Categorized business/security/error audit trail
//! - `PaymentGateway` - External payout processing

mod analytics_repository;
mod audit_logger;
mod event_publisher;
mod incentive_repository;
mod payment_gateway;
mod session_repository;

pub use analytics_repository::AnalyticsEventRepository;
pub use audit_logger::{AuditCategory, AuditEntry, AuditLogger};
pub use event_publisher::EventPublisher;
pub use incentive_repository::IncentiveRepository;
pub use payment_gateway::{PaymentError, PaymentGateway, PaymentRequest, PaymentResponse};
pub use session_repository::SessionRepository;
