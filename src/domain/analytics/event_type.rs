//! Analytics event classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an analytics event.
///
/// The classification decides how long the event is kept before the
/// retention purge removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalyticsEventType {
    /// A candidate interacted with the questionnaire UI.
    UserInteraction,

    /// Latency, throughput, or resource measurements.
    SystemPerformance,

    /// Conversion and revenue figures.
    BusinessMetric,

    /// An error surfaced to or caused by a candidate.
    Error,
}

impl AnalyticsEventType {
    /// Days an event of this type is retained after creation.
    pub fn retention_days(&self) -> i64 {
        match self {
            AnalyticsEventType::UserInteraction => 730,
            AnalyticsEventType::SystemPerformance => 90,
            AnalyticsEventType::BusinessMetric => 1095,
            AnalyticsEventType::Error => 365,
        }
    }
}

impl fmt::Display for AnalyticsEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalyticsEventType::UserInteraction => "USER_INTERACTION",
            AnalyticsEventType::SystemPerformance => "SYSTEM_PERFORMANCE",
            AnalyticsEventType::BusinessMetric => "BUSINESS_METRIC",
            AnalyticsEventType::Error => "ERROR",
        };
        write!(f, "{}", s)
    }
}
