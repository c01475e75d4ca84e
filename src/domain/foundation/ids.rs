//! Strongly-typed identifier value objects.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Number of random base36 characters in a generated session identifier.
const SESSION_ID_SUFFIX_LEN: usize = 9;

/// Encodes a value as lowercase base36.
fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// Unique identifier for a questionnaire session.
///
/// Generated identifiers carry the creation instant, in the form
/// `session_<millis-base36>_<random-base36>`. The embedded instant is
/// informational only; expiry decisions always read the aggregate's
/// recorded creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a new identifier from the current instant and fresh entropy.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis().max(0) as u128;
        let entropy = u128::from_le_bytes(*Uuid::new_v4().as_bytes());
        let mut suffix = to_base36(entropy);
        suffix.truncate(SESSION_ID_SUFFIX_LEN);
        while suffix.len() < SESSION_ID_SUFFIX_LEN {
            suffix.push('0');
        }
        Self(format!("session_{}_{}", to_base36(millis), suffix))
    }

    /// Creates a SessionId from a stored string, rejecting empty input.
    pub fn from_string(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Unique identifier for an analytics event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyticsEventId(Uuid);

impl AnalyticsEventId {
    /// Creates a new random AnalyticsEventId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AnalyticsEventId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AnalyticsEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalyticsEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnalyticsEventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for an incentive payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncentiveId(Uuid);

impl IncentiveId {
    /// Creates a new random IncentiveId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an IncentiveId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for IncentiveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IncentiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IncentiveId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
