use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, Result};
use crate::models::PullRequest;

/// Default backfill cutoff: 2021-04-03 13:23:45 UTC.
pub const DEFAULT_CUTOFF: &str = "2021-04-03T13:23:45Z";

const DEFAULT_CUTOFF_AT: DateTime<Utc> = NaiveDate::from_ymd_opt(2021, 4, 3)
    .unwrap()
    .and_hms_opt(13, 23, 45)
    .unwrap()
    .and_utc();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff(pub DateTime<Utc>);

impl Cutoff {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Keep iff last updated at or before the cutoff.
    pub fn keeps(&self, pr: &PullRequest) -> bool {
        pr.updated_at <= self.0
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for Cutoff {
    fn default() -> Self {
        Self(DEFAULT_CUTOFF_AT)
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Some(naive) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(Error::InvalidTimestamp(s.to_string()))
}
