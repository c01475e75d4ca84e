//! IP address value object used to key per-client usage quotas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// IPv4 address in dotted-quad form.
///
/// Stores the string exactly as received so that repository lookups match
/// what the transport layer reported. Validation accepts any four
/// dot-separated octets in 0..=255, including forms with leading zeros
/// such as `010.1.1.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpAddress(String);

impl IpAddress {
    /// Creates an IpAddress, validating dotted-quad syntax.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("ip_address"));
        }
        if !Self::is_dotted_quad(&raw) {
            return Err(ValidationError::invalid_format(
                "ip_address",
                "expected four dot-separated octets in 0-255",
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_dotted_quad(raw: &str) -> bool {
        let mut segments = 0;
        for segment in raw.split('.') {
            segments += 1;
            if segments > 4 {
                return false;
            }
            if segment.is_empty() || segment.len() > 3 {
                return false;
            }
            if !segment.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            // len <= 3 guarantees the parse cannot overflow u16
            let value: u16 = match segment.parse() {
                Ok(v) => v,
                Err(_) => return false,
            };
            if value > 255 {
                return false;
            }
        }
        segments == 4
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IpAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_standard_addresses() {
        for raw in ["192.168.1.1", "0.0.0.0", "255.255.255.255", "10.0.42.7"] {
            let ip = IpAddress::new(raw).unwrap();
            assert_eq!(ip.as_str(), raw);
        }
    }

    #[test]
    fn accepts_leading_zero_octets() {
        let ip = IpAddress::new("010.001.000.001").unwrap();
        assert_eq!(ip.as_str(), "010.001.000.001");
    }

    #[test]
    fn rejects_octets_above_255() {
        assert!(IpAddress::new("256.1.1.1").is_err());
        assert!(IpAddress::new("1.1.1.999").is_err());
    }

    #[test]
    fn rejects_wrong_segment_counts() {
        assert!(IpAddress::new("1.2.3").is_err());
        assert!(IpAddress::new("1.2.3.4.5").is_err());
        assert!(IpAddress::new("1..2.3").is_err());
    }

    #[test]
    fn rejects_non_numeric_segments() {
        assert!(IpAddress::new("a.b.c.d").is_err());
        assert!(IpAddress::new("1.2.3.x").is_err());
        assert!(IpAddress::new("1.2.3.-4").is_err());
    }

    #[test]
    fn rejects_empty_string_with_empty_field_error() {
        match IpAddress::new("") {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "ip_address"),
            other => panic!("Expected EmptyField error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_overlong_segments() {
        assert!(IpAddress::new("0001.2.3.4").is_err());
    }

    #[test]
    fn preserves_original_text_through_serde() {
        let ip = IpAddress::new("203.0.113.9").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"203.0.113.9\"");
        let back: IpAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ip);
    }

    proptest! {
        #[test]
        fn any_four_octets_construct(
            a in any::<u8>(),
            b in any::<u8>(),
            c in any::<u8>(),
            d in any::<u8>(),
        ) {
            let raw = format!("{}.{}.{}.{}", a, b, c, d);
            let ip = IpAddress::new(raw.clone()).unwrap();
            prop_assert_eq!(ip.as_str(), raw);
        }

        #[test]
        fn any_octet_above_255_is_rejected(
            a in 256u32..100_000,
            b in any::<u8>(),
            c in any::<u8>(),
            d in any::<u8>(),
        ) {
            let raw = format!("{}.{}.{}.{}", a, b, c, d);
            prop_assert!(IpAddress::new(raw).is_err());
        }

        #[test]
        fn arbitrary_text_round_trips_when_accepted(raw in ".*") {
            if let Ok(ip) = IpAddress::new(raw.clone()) {
                prop_assert_eq!(ip.as_str(), raw);
            }
        }
    }
}
