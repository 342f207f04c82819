//! Protocol timestamps: ISO-8601 in UTC, seconds precision, no offset suffix.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// The wire format of protocol timestamps, e.g. `2019-12-31T23:59:59`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A protocol timestamp as carried on the wire.
///
/// Values built from [`DateTime<Utc>`] are formatted with [`TIMESTAMP_FORMAT`].
/// Values received from the gateway, or given as text, are kept verbatim since
/// the literal string takes part in the signature.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use walletone_kit::types::Timestamp;
///
/// let at = Utc.with_ymd_and_hms(2019, 12, 31, 23, 59, 59).unwrap();
/// assert_eq!(Timestamp::from(at).as_str(), "2019-12-31T23:59:59");
/// assert_eq!(Timestamp::from("2019-12-31T23:59:59").to_datetime(), Some(at));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// The current time moved forward by `ttl`.
    pub fn expiring_in(ttl: TimeDelta) -> Self {
        Timestamp::from(Utc::now() + ttl)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the wire text back into a UTC instant.
    ///
    /// Fractional seconds are accepted; offsets are not.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp(value.format(TIMESTAMP_FORMAT).to_string())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::from(value.and_utc())
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Timestamp(value)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Timestamp(value.to_string())
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_fractional_seconds_are_dropped() {
        let at = Utc
            .with_ymd_and_hms(2024, 2, 29, 8, 5, 3)
            .unwrap()
            .checked_add_signed(TimeDelta::milliseconds(789))
            .unwrap();
        assert_eq!(Timestamp::from(at).as_str(), "2024-02-29T08:05:03");
    }

    #[test]
    fn test_expiring_in_is_in_the_future() {
        let before = Utc::now();
        let ts = Timestamp::expiring_in(TimeDelta::days(30));
        let parsed = ts.to_datetime().unwrap();
        assert!(parsed > before + TimeDelta::days(29));
        assert!(!ts.as_str().contains('+'));
        assert!(!ts.as_str().ends_with('Z'));
    }

    #[test]
    fn test_raw_text_is_kept_verbatim() {
        let ts = Timestamp::from("2019-12-31 23:59:59");
        assert_eq!(ts.as_str(), "2019-12-31 23:59:59");
        assert_eq!(ts.to_datetime(), None);
    }
}
