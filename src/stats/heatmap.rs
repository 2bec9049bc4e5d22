//! Uniform per-day records for the heatmap.

use crate::calendar::{CalendarDay, ContributionCalendar, ContributionLevel};
use crate::stats::window::InclusionPolicy;
use crate::stats::zone::parse_iso_date;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar day after the inclusion policy has been applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDay {
    /// Source date string, unchanged
    pub date: String,
    pub count: u32,
    pub level: ContributionLevel,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
    pub included: bool,
}

impl NormalizedDay {
    /// Parsed date; only guaranteed for included days
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapWeek {
    pub days: Vec<NormalizedDay>,
}

/// Apply `policy` to every day, keeping the week/day nesting of the source.
///
/// Excluded days keep their slot but report a zero count and the
/// [`ContributionLevel::Excluded`] level, which included days never carry.
/// Days without a valid date are treated as excluded.
pub fn normalize(calendar: &ContributionCalendar, policy: &InclusionPolicy) -> Vec<HeatmapWeek> {
    calendar
        .weeks
        .iter()
        .map(|week| HeatmapWeek {
            days: week
                .contribution_days
                .iter()
                .map(|day| normalize_day(day, policy))
                .collect(),
        })
        .collect()
}

fn normalize_day(day: &CalendarDay, policy: &InclusionPolicy) -> NormalizedDay {
    let raw_date = day.date.clone().unwrap_or_default();
    let parsed = match parse_iso_date(&raw_date) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(%err, "skipping calendar day without a usable date");
            None
        }
    };

    let included = parsed.map_or(false, |date| policy.includes(date));
    let weekday = match (day.weekday, parsed) {
        (Some(weekday), _) if weekday < 7 => weekday,
        (_, Some(date)) => date.weekday().num_days_from_sunday() as u8,
        _ => 0,
    };

    if included {
        NormalizedDay {
            date: raw_date,
            count: day.count(),
            level: match day.level() {
                ContributionLevel::Excluded => ContributionLevel::None,
                level => level,
            },
            weekday,
            included,
        }
    } else {
        NormalizedDay {
            date: raw_date,
            count: 0,
            level: ContributionLevel::Excluded,
            weekday,
            included,
        }
    }
}
