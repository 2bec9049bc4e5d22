//! Calendar dates as observed in an IANA time zone.

use crate::error::{RecapError, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Wall-clock date of an instant in a given zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Zero-padded YYYY-MM-DD
    pub iso_date: String,
}

impl DateParts {
    /// Resolve the date of `instant` using the zone's own rules (DST included)
    pub fn observe(instant: DateTime<Utc>, zone: Tz) -> Self {
        Self::from_date(instant.with_timezone(&zone).date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            iso_date: date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Parse an IANA zone name such as `Asia/Shanghai`
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| RecapError::InvalidTimeZone(name.to_string()))
}

/// Date parts of `instant` as observed in `time_zone`
pub fn date_parts_in_zone(instant: DateTime<Utc>, time_zone: &str) -> Result<DateParts> {
    let zone = parse_time_zone(time_zone)?;
    Ok(DateParts::observe(instant, zone))
}

/// Today's ISO date in `time_zone` at `instant`
pub fn today_iso_in_zone(time_zone: &str, instant: DateTime<Utc>) -> Result<String> {
    Ok(date_parts_in_zone(instant, time_zone)?.iso_date)
}

/// Parse a zero-padded YYYY-MM-DD string
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    if value.len() != 10 {
        return Err(RecapError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| RecapError::InvalidDate(value.to_string()))
}
