//! Timestamps as returned by the Twilio REST APIs.
//!
//! The 2010-04-01 API renders dates in RFC 2822 (`Thu, 30 Jul 2015 20:12:31
//! +0000`); the newer TaskRouter APIs use RFC 3339. Both are accepted and
//! stored in state as RFC 3339.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tf_mapper::{ToValue, Value};

/// A point in time with the offset it was reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Parses an RFC 2822 or RFC 3339 date.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let s = s.trim();
        DateTime::parse_from_rfc2822(s)
            .or_else(|_| DateTime::parse_from_rfc3339(s))
            .map(Self)
    }

    /// Returns the underlying date and time.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Formats as RFC 3339 with second precision, e.g. `2015-07-30T20:12:31+00:00`.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|source| serde::de::Error::custom(format!("invalid date '{raw}': {source}")))
    }
}

impl ToValue for Timestamp {
    fn to_value(&self) -> Value {
        Value::String(self.to_rfc3339())
    }
}
