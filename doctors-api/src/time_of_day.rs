use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, Time, UtcOffset};

const HOUR_MINUTE: &[FormatItem<'static>] = format_description!("[hour padding:none]:[minute]");
const HOUR_MINUTE_SECOND: &[FormatItem<'static>] =
    format_description!("[hour padding:none]:[minute]:[second]");
const DISPLAY: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

/// A wall-clock time with minute precision, e.g. a doctor's check-in.
///
/// Ordering is chronological within one day: `00:00` is the smallest value
/// and `23:59` the largest. Serialized as `"HH:mm"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(Time);

#[derive(Error, Debug)]
pub enum ParseTimeError {
    #[error("time is empty")]
    Empty,
    #[error("'{input}' is not a time: expected HH:mm")]
    Invalid {
        input: String,
        #[source]
        source: time::error::Parse,
    },
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        Time::from_hms(hour, minute, 0).ok().map(Self)
    }

    /// Current local time, falling back to UTC when the local offset is unknown.
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        let local = match UtcOffset::current_local_offset() {
            Ok(offset) => now.to_offset(offset),
            Err(_) => now,
        };
        Self::from(local.time())
    }

    pub fn hour(&self) -> u8 {
        self.0.hour()
    }

    pub fn minute(&self) -> u8 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        self.hour() as u16 * 60 + self.minute() as u16
    }
}

impl From<Time> for TimeOfDay {
    /// Seconds and below are dropped.
    fn from(t: Time) -> Self {
        Self(
            t.replace_second(0)
                .and_then(|t| t.replace_nanosecond(0))
                .unwrap_or(t),
        )
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    /// Accepts `H:mm`, `HH:mm` and `HH:mm:ss`. Seconds are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseTimeError::Empty);
        }

        Time::parse(s, HOUR_MINUTE)
            .or_else(|_| Time::parse(s, HOUR_MINUTE_SECOND))
            .map(Self::from)
            .map_err(|source| ParseTimeError::Invalid {
                input: s.to_string(),
                source,
            })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(DISPLAY).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
