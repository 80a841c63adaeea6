use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// A positive numeric identifier assigned to a shortened URL.
///
/// Identifiers start at 1 and are handed out in strictly increasing order
/// by the repository. The decimal string form is what clients use as the
/// path segment in resolve requests; it serializes as a bare JSON number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ShortId(u64);

impl ShortId {
    /// The first identifier a fresh store hands out.
    pub const FIRST: ShortId = ShortId(1);

    /// Creates a `ShortId`, rejecting zero.
    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Returns the raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// The identifier following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Error returned when parsing a [`ShortId`] from its decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid short id: {0:?}")]
pub struct ParseShortIdError(String);

impl FromStr for ShortId {
    type Err = ParseShortIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .ok()
            .and_then(ShortId::new)
            .ok_or_else(|| ParseShortIdError(s.to_owned()))
    }
}

impl Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_decimal() {
        assert_eq!("1".parse::<ShortId>().unwrap(), ShortId::FIRST);
        assert_eq!("42".parse::<ShortId>().unwrap().value(), 42);
    }

    #[test]
    fn rejects_zero() {
        assert!("0".parse::<ShortId>().is_err());
        assert!(ShortId::new(0).is_none());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("abc".parse::<ShortId>().is_err());
        assert!("1abc".parse::<ShortId>().is_err());
        assert!("-1".parse::<ShortId>().is_err());
        assert!("".parse::<ShortId>().is_err());
    }

    #[test]
    fn next_is_strictly_increasing() {
        let id = ShortId::FIRST;
        assert!(id.next() > id);
        assert_eq!(id.next().value(), 2);
    }

    #[test]
    fn displays_as_plain_decimal() {
        assert_eq!(ShortId::new(7).unwrap().to_string(), "7");
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ShortId::new(3).unwrap()).unwrap();
        assert_eq!(json, "3");
    }
}
