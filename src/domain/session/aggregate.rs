//! UserSession aggregate entity.
//!
//! A session is the unit of quota accounting for one client IP. It owns
//! its quota and announces every state change through an uncommitted
//! event buffer, drained by the surrounding unit-of-work layer.

use crate::domain::foundation::{EventId, IpAddress, SessionId, Timestamp, ValidationError};
use crate::domain::session::events::{
    SessionBonusGranted, SessionCreated, SessionEvent, SessionExpired, SessionUsageRecorded,
};
use crate::domain::session::{
    BonusType, SessionStatus, UsageFailure, UsageQuota, UsageResult, BONUS_INCREMENT,
};
use serde::{Deserialize, Serialize};

/// Hours a session stays usable after creation.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Point-in-time snapshot of a session's quota consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsage {
    /// Uses recorded so far.
    pub used: u32,

    /// Uses still available.
    pub remaining: u32,

    /// Total allotment including bonuses.
    pub total: u32,

    /// When the session's allotment lapses (creation plus TTL).
    pub reset_time: Timestamp,
}

/// UserSession aggregate - quota accounting for one client IP.
///
/// # Invariants
///
/// - `status` only ever moves `Active` to `Expired`, never back
/// - `quota` is replaced wholesale on every change, never edited in place
/// - every state change appends exactly one event to the buffer
///
/// Usage denials (quota exhausted, aged out) are expected outcomes and
/// come back as [`UsageResult`] values. `record_usage` checks quota
/// exhaustion before wall-clock age, so an old session with nothing left
/// reports quota exhaustion. It consults age rather than `status`, so an
/// explicitly expired session that is still young keeps recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// Unique identifier for this session.
    id: SessionId,

    /// Client IP the session is keyed by.
    ip_address: IpAddress,

    /// Current lifecycle status.
    status: SessionStatus,

    /// Usage allotment and consumption.
    quota: UsageQuota,

    /// When the session was created. Expiry is measured from here.
    created_at: Timestamp,

    /// When usage was last recorded.
    last_active_at: Timestamp,

    /// Events awaiting publication by the unit-of-work layer.
    #[serde(skip)]
    uncommitted_events: Vec<SessionEvent>,
}

impl UserSession {
    /// Creates a new active session keyed by the given client IP.
    ///
    /// Stamps a generated identity, the default quota, and appends a
    /// `SessionCreated` event.
    ///
    /// # Errors
    ///
    /// Fails if `ip` is not a dotted-quad IPv4 string.
    pub fn create(ip: impl Into<String>) -> Result<Self, ValidationError> {
        let ip_address = IpAddress::new(ip)?;
        let id = SessionId::generate();
        let now = Timestamp::now();

        let mut session = Self {
            id: id.clone(),
            ip_address: ip_address.clone(),
            status: SessionStatus::Active,
            quota: UsageQuota::default(),
            created_at: now,
            last_active_at: now,
            uncommitted_events: Vec::new(),
        };
        session.record_event(SessionEvent::Created(SessionCreated {
            event_id: EventId::new(),
            session_id: id,
            ip_address,
            created_at: now,
        }));
        Ok(session)
    }

    /// Reconstitutes a session from persistence (no validation, no events).
    pub fn reconstitute(
        id: SessionId,
        ip_address: IpAddress,
        status: SessionStatus,
        quota: UsageQuota,
        created_at: Timestamp,
        last_active_at: Timestamp,
    ) -> Self {
        Self {
            id,
            ip_address,
            status,
            quota,
            created_at,
            last_active_at,
            uncommitted_events: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the client IP this session is keyed by.
    pub fn ip_address(&self) -> &IpAddress {
        &self.ip_address
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the current quota.
    pub fn quota(&self) -> &UsageQuota {
        &self.quota
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when usage was last recorded.
    pub fn last_active_at(&self) -> &Timestamp {
        &self.last_active_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns true if the session's wall-clock age has reached the TTL.
    pub fn is_past_ttl(&self) -> bool {
        Timestamp::now().hours_since(&self.created_at) >= SESSION_TTL_HOURS
    }

    /// Returns true iff the session is active and within its lifetime.
    pub fn is_valid(&self) -> bool {
        self.status.is_active() && !self.is_past_ttl()
    }

    /// Returns true iff the session is valid and has quota remaining.
    pub fn can_use(&self) -> bool {
        self.is_valid() && self.quota.has_remaining()
    }

    /// Returns the remaining allotment, never negative.
    pub fn remaining_quota(&self) -> u32 {
        self.quota.remaining()
    }

    /// Returns a snapshot of quota consumption.
    pub fn daily_usage(&self) -> DailyUsage {
        DailyUsage {
            used: self.quota.used(),
            remaining: self.quota.remaining(),
            total: self.quota.total_limit(),
            reset_time: self.created_at.add_hours(SESSION_TTL_HOURS),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Attempts to charge one use against the quota.
    ///
    /// Denies with `QuotaExceeded` when nothing remains, then with
    /// `SessionExpired` when the session has aged past its TTL; the check
    /// order is a behavioral contract. On success the quota is swapped
    /// for an incremented copy, `last_active_at` is bumped, and a
    /// `SessionUsageRecorded` event is appended.
    pub fn record_usage(&mut self) -> UsageResult {
        if !self.quota.has_remaining() {
            return UsageResult::Denied {
                reason: UsageFailure::QuotaExceeded,
            };
        }
        if self.is_past_ttl() {
            return UsageResult::Denied {
                reason: UsageFailure::SessionExpired,
            };
        }

        self.quota = self.quota.increment_usage();
        self.last_active_at = Timestamp::now();
        self.record_event(SessionEvent::UsageRecorded(SessionUsageRecorded {
            event_id: EventId::new(),
            session_id: self.id.clone(),
            used: self.quota.used(),
            remaining: self.quota.remaining(),
            recorded_at: self.last_active_at,
        }));

        UsageResult::Granted {
            used: self.quota.used(),
            remaining: self.quota.remaining(),
        }
    }

    /// Expires the session.
    ///
    /// Unconditional: callable in any state, and every call appends one
    /// `SessionExpired` event, including repeat calls on an already
    /// expired session.
    pub fn expire(&mut self) {
        self.status = SessionStatus::Expired;
        self.record_event(SessionEvent::Expired(SessionExpired {
            event_id: EventId::new(),
            session_id: self.id.clone(),
            expired_at: Timestamp::now(),
        }));
    }

    /// Grants a quota bonus, returning the new total limit.
    ///
    /// The quota is swapped for a copy with the matching bonus counter
    /// raised and a `SessionBonusGranted` event is appended. No cap is
    /// enforced at this layer.
    pub fn grant_bonus(&mut self, bonus_type: BonusType) -> u32 {
        self.quota = self.quota.add_bonus(bonus_type);
        self.record_event(SessionEvent::BonusGranted(SessionBonusGranted {
            event_id: EventId::new(),
            session_id: self.id.clone(),
            bonus_type,
            amount: BONUS_INCREMENT,
            total_limit: self.quota.total_limit(),
            granted_at: Timestamp::now(),
        }));
        self.quota.total_limit()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event buffer
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns a defensive copy of the uncommitted event buffer.
    pub fn uncommitted_events(&self) -> Vec<SessionEvent> {
        self.uncommitted_events.clone()
    }

    /// Clears the uncommitted event buffer.
    ///
    /// Call after the events have been handed to the publisher. Copies
    /// already taken are unaffected.
    pub fn mark_events_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn record_event(&mut self, event: SessionEvent) {
        self.uncommitted_events.push(event);
    }
}
