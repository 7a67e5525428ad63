use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::time::TimestampMs;

const PENDING_SUFFIX: &str = "-pending";

/// Portable public identifier with a string representation.
///
/// Identifiers are derived from the creation time in milliseconds.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Id of a report created at the given time.
    pub fn from_timestamp(created_at: TimestampMs) -> Self {
        Self(created_at.into_inner().to_string())
    }

    /// Id of an approval request created at the given time.
    pub fn pending_from_timestamp(created_at: TimestampMs) -> Self {
        Self(format!("{}{PENDING_SUFFIX}", created_at.into_inner()))
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for Id {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for Id {
    fn from(from: &str) -> Self {
        from.to_owned().into()
    }
}

impl From<Id> for String {
    fn from(from: Id) -> Self {
        from.0
    }
}

impl FromStr for Id {
    type Err = ();
    fn from_str(s: &str) -> Result<Id, Self::Err> {
        Ok(s.into())
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        self.as_ref()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_based_ids() {
        let ts = TimestampMs::from_inner(1_700_000_000_123);
        assert_eq!(Id::from_timestamp(ts).as_str(), "1700000000123");
        assert_eq!(
            Id::pending_from_timestamp(ts).as_str(),
            "1700000000123-pending"
        );
    }

    #[test]
    fn empty_id_is_invalid() {
        assert!(!Id::default().is_valid());
        assert!(Id::from("1").is_valid());
    }
}
