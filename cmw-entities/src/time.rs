use std::{fmt, ops::Add};

use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};

/// Unix timestamp in **milli**seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMs(i64);

impl TimestampMs {
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub const fn from_inner(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn into_inner(self) -> i64 {
        self.0
    }

    pub fn try_into_date_time(self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * 1_000_000).ok()
    }
}

impl From<OffsetDateTime> for TimestampMs {
    fn from(from: OffsetDateTime) -> Self {
        Self((from.unix_timestamp_nanos() / 1_000_000) as i64)
    }
}

impl Add<i64> for TimestampMs {
    type Output = Self;
    fn add(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
        match self.try_into_date_time().map(|dt| dt.format(&format)) {
            Some(Ok(formatted)) => f.write_str(&formatted),
            _ => write!(f, "{}ms", self.0),
        }
    }
}
