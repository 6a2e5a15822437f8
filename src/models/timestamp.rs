//! Document-store timestamps in any of the encodings the store emits.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A point in time decoded from a loosely-typed document field.
///
/// Accepts an RFC 3339 string, epoch milliseconds (integer or float), or a
/// `{seconds, nanoseconds}` object (underscore-prefixed keys too).
/// Always serializes as RFC 3339 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(Self)
    }

    /// Calendar date of this instant as seen from `offset`.
    pub fn date_in(&self, offset: FixedOffset) -> NaiveDate {
        self.0.with_timezone(&offset).date_naive()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
    FractionalMillis(f64),
    Parts {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|dt| Self(dt.with_timezone(&Utc)))
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{text}': {e}"))),
            RawTimestamp::Millis(millis) => Self::from_millis(millis)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {millis}"))),
            RawTimestamp::FractionalMillis(millis) => Some(millis)
                .filter(|m| m.is_finite())
                .and_then(|m| Self::from_millis(m.round() as i64))
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {millis}"))),
            RawTimestamp::Parts {
                seconds,
                nanoseconds,
            } => DateTime::<Utc>::from_timestamp(seconds, nanoseconds)
                .map(Self)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {seconds}s"))),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
