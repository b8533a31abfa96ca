use std::{fmt, ops::Add, time::Duration};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// A point in time with second precision (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc().unix_timestamp())
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Converts into a date-time value, `None` if out of range.
    pub fn to_date_time(self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.0).ok()
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self(from.unix_timestamp())
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs.as_secs() as i64))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_date_time().and_then(|dt| dt.format(&Rfc3339).ok()) {
            Some(formatted) => f.write_str(&formatted),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_from_into_secs() {
        let t1 = Timestamp::now();
        let t2 = Timestamp::from_secs(t1.as_secs());
        assert_eq!(t1, t2);
    }

    #[test]
    fn add_duration() {
        let t = Timestamp::from_secs(1_000) + Duration::from_secs(60);
        assert_eq!(1_060, t.as_secs());
    }

    #[test]
    fn display_as_rfc3339() {
        assert_eq!("1970-01-01T00:00:00Z", Timestamp::from_secs(0).to_string());
    }
}
