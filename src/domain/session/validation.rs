//! Session validation service.
//!
//! Stateless check used by the hosting service before it lets a session
//! answer questionnaires.

use serde::{Deserialize, Serialize};

use crate::domain::session::{SessionStatus, UserSession};

/// Outcome of validating a session: empty error list means valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionValidation {
    errors: Vec<String>,
}

impl SessionValidation {
    /// Returns true if no errors were collected.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the collected error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consumes the report, yielding the error messages.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Stateless validation service for sessions.
///
/// An expired-status session collects two messages, the generic one and
/// the specific one. Callers must not assume either implies the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionValidationService;

impl SessionValidationService {
    /// Creates the service.
    pub fn new() -> Self {
        Self
    }

    /// Collects validation errors for the given session.
    pub fn validate(&self, session: &UserSession) -> SessionValidation {
        let mut errors = Vec::new();

        if !session.is_valid() {
            errors.push("Session is not valid".to_string());
        }
        if session.status() == SessionStatus::Expired {
            errors.push("Session has expired".to_string());
        }

        SessionValidation { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{IpAddress, SessionId, Timestamp};
    use crate::domain::session::UsageQuota;

    fn service() -> SessionValidationService {
        SessionValidationService::new()
    }

    #[test]
    fn fresh_session_passes_validation() {
        let session = UserSession::create("192.168.1.1").unwrap();

        let report = service().validate(&session);

        assert!(report.is_valid());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn explicitly_expired_session_collects_both_messages() {
        let mut session = UserSession::create("192.168.1.1").unwrap();
        session.expire();

        let report = service().validate(&session);

        assert!(!report.is_valid());
        assert_eq!(
            report.errors(),
            &[
                "Session is not valid".to_string(),
                "Session has expired".to_string(),
            ]
        );
    }

    #[test]
    fn aged_out_active_session_collects_only_the_generic_message() {
        let created = Timestamp::now().minus_hours(25);
        let session = UserSession::reconstitute(
            SessionId::generate(),
            IpAddress::new("10.0.0.1").unwrap(),
            SessionStatus::Active,
            UsageQuota::default(),
            created,
            created,
        );

        let report = service().validate(&session);

        assert_eq!(report.errors(), &["Session is not valid".to_string()]);
    }

    #[test]
    fn into_errors_yields_owned_messages() {
        let mut session = UserSession::create("192.168.1.1").unwrap();
        session.expire();

        let errors = service().validate(&session).into_errors();

        assert_eq!(errors.len(), 2);
    }
}
