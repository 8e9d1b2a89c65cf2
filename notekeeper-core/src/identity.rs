//! Identity types for NOTEKEEPER entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Integer note identifier, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw identifier produced by a store.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a client-supplied identifier (e.g. a URL path segment).
///
/// Only strictly positive 64-bit integers are accepted; stores never
/// hand out zero or negative ids.
impl FromStr for NoteId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(raw) if raw > 0 => Ok(Self(raw)),
            _ => Err(ValidationError::InvalidId {
                input: s.to_string(),
            }),
        }
    }
}

impl From<NoteId> for i64 {
    fn from(id: NoteId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!("42".parse::<NoteId>(), Ok(NoteId::new(42)));
        assert_eq!("1".parse::<NoteId>(), Ok(NoteId::new(1)));
        assert_eq!(
            i64::MAX.to_string().parse::<NoteId>(),
            Ok(NoteId::new(i64::MAX))
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for input in ["abc", "", " 1", "1.5", "1e3", "0x10", "12abc"] {
            let err = input.parse::<NoteId>().unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidId {
                    input: input.to_string()
                }
            );
        }
    }

    #[test]
    fn test_parse_rejects_zero_and_negative() {
        assert!("0".parse::<NoteId>().is_err());
        assert!("-1".parse::<NoteId>().is_err());
        assert!("-9223372036854775808".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("9223372036854775808".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_display_and_serde_are_bare_integers() {
        let id = NoteId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: NoteId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
