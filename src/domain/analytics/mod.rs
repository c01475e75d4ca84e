//! Analytics domain module.
//!
//! Records platform activity as analytics events, tracks their one-way
//! processing pipeline, and computes per-classification retention.
//!
//! # Events
//!
//! - `AnalyticsEventRecorded` - Published when a new record is created
//! - `AnalyticsEventProcessed` - Published when processing completes
//! - `AnalyticsEventFailed` - Published when processing fails

mod aggregate;
mod event_type;
mod events;
mod status;

pub use aggregate::AnalyticsEvent;
pub use event_type::AnalyticsEventType;
pub use events::{
    AnalyticsDomainEvent, AnalyticsEventFailed, AnalyticsEventProcessed, AnalyticsEventRecorded,
};
pub use status::ProcessingStatus;
