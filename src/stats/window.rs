//! Which days count towards a report.
//!
//! Two modes exist: a calendar year (optionally cut off at "today" when the
//! year is still running) and an explicit inclusive date range used for the
//! rolling last-year window. The range mode never looks at the year, since a
//! rolling window straddles two calendar years.

use crate::error::{RecapError, Result};
use crate::stats::zone::{parse_time_zone, DateParts};
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_REPORT_YEAR: i32 = 2008;
pub const MAX_REPORT_YEAR: i32 = 2100;

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Both ends inclusive; a reversed range contains nothing
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Windowing options for one statistics run
#[derive(Debug, Clone)]
pub struct WindowOptions {
    /// Report year, also used for month labels in rolling mode
    pub year: i32,
    /// IANA zone used to decide what "today" is
    pub time_zone: String,
    /// Observation instant
    pub now: DateTime<Utc>,
    /// Replaces calendar-year filtering when present
    pub date_range: Option<DateRange>,
}

impl WindowOptions {
    /// Calendar-year window observed right now
    pub fn calendar_year(year: i32, time_zone: impl Into<String>) -> Self {
        Self {
            year,
            time_zone: time_zone.into(),
            now: Utc::now(),
            date_range: None,
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_date_range(mut self, date_range: Option<DateRange>) -> Self {
        self.date_range = date_range;
        self
    }
}

/// Resolved day-inclusion rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionPolicy {
    /// Explicit inclusive range, no year check
    Range(DateRange),
    /// Same calendar year; `cutoff` is today when the year is the current one
    CalendarYear { year: i32, cutoff: Option<NaiveDate> },
}

impl InclusionPolicy {
    /// Resolve the rule, observing "today" in the options' time zone
    pub fn resolve(options: &WindowOptions) -> Result<Self> {
        let zone = parse_time_zone(&options.time_zone)?;
        let today = DateParts::observe(options.now, zone);

        let policy = match options.date_range {
            Some(range) => Self::Range(range),
            None => Self::CalendarYear {
                year: options.year,
                cutoff: if options.year == today.year {
                    today.date()
                } else {
                    None
                },
            },
        };

        tracing::debug!(?policy, today = %today.iso_date, "resolved day inclusion policy");
        Ok(policy)
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Range(range) => range.contains(date),
            Self::CalendarYear { year, cutoff } => {
                date.year() == year && cutoff.map_or(true, |today| date <= today)
            }
        }
    }
}

/// Report year/window as chosen by the caller
#[derive(Debug, Clone)]
pub struct ReportWindow {
    pub options: WindowOptions,
    pub is_rolling: bool,
}

impl ReportWindow {
    /// An explicit year gives a calendar-year report; no year gives the
    /// rolling window ending today in `time_zone`.
    pub fn resolve(explicit_year: Option<i32>, time_zone: &str, now: DateTime<Utc>) -> Result<Self> {
        let zone = parse_time_zone(time_zone)?;

        if let Some(year) = explicit_year {
            validate_year(year)?;
            return Ok(Self {
                options: WindowOptions::calendar_year(year, time_zone).with_now(now),
                is_rolling: false,
            });
        }

        let today = DateParts::observe(now, zone);
        let end = today
            .date()
            .ok_or_else(|| RecapError::InvalidDate(today.iso_date.clone()))?;
        let range = DateRange::new(trailing_year_start(end)?, end);

        tracing::debug!(start = %range.start, end = %range.end, "using rolling window");

        Ok(Self {
            options: WindowOptions::calendar_year(today.year, time_zone)
                .with_now(now)
                .with_date_range(Some(range)),
            is_rolling: true,
        })
    }

    pub fn year(&self) -> i32 {
        self.options.year
    }

    pub fn label(&self) -> String {
        if self.is_rolling {
            "the past year".to_string()
        } else {
            self.options.year.to_string()
        }
    }
}

/// First day of the trailing year ending on `end` (same date a year back is excluded)
fn trailing_year_start(end: NaiveDate) -> Result<NaiveDate> {
    end.checked_sub_months(Months::new(12))
        .and_then(|d| d.succ_opt())
        .ok_or_else(|| RecapError::InvalidDate(end.to_string()))
}

/// Reject years GitHub has no calendar for
pub fn validate_year(year: i32) -> Result<()> {
    if (MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(RecapError::InvalidYear(year))
    }
}
