pub mod aggregate;
pub mod heatmap;
pub mod ranking;
pub mod window;
pub mod zone;

pub use aggregate::{aggregate, derive_yearly_statistics, LongestRun, Run, RunKind, RunTracker};
pub use heatmap::{normalize, HeatmapWeek, NormalizedDay};
pub use ranking::{pad_languages, pad_repositories, top_languages, top_repositories, LanguageAggregate, RepositoryAggregate};
pub use window::{DateRange, InclusionPolicy, ReportWindow, WindowOptions};
pub use zone::{date_parts_in_zone, today_iso_in_zone, DateParts};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statistics for one report window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStatistics {
    /// Sum of counts over included days
    pub total_contributions: u64,
    /// Number of included days
    pub total_days_considered: u32,
    /// Included days with at least one contribution
    pub active_days: u32,
    /// Rounded to one decimal place
    pub average_contributions_per_day: f64,

    pub max_contributions_in_a_day: u32,
    /// First day reaching the maximum
    pub max_contributions_date: Option<NaiveDate>,

    pub longest_streak: u32,
    pub longest_streak_start_date: Option<NaiveDate>,
    pub longest_streak_end_date: Option<NaiveDate>,

    /// Longest run of included zero-count days
    pub longest_gap: u32,
    pub longest_gap_start_date: Option<NaiveDate>,
    pub longest_gap_end_date: Option<NaiveDate>,

    /// YYYY-MM of the busiest month, None when every month is empty
    pub max_contributions_month: Option<String>,
    pub max_monthly_contributions: u64,
    /// Index 0 = January
    pub monthly_contributions: [u64; 12],

    /// Index 0 = Sunday
    pub weekday_contributions: [u64; 7],
    pub busiest_weekday: u8,

    /// Normalized calendar, kept for rendering
    pub heatmap_weeks: Vec<HeatmapWeek>,
}

impl YearlyStatistics {
    /// Busiest weekday as an English name
    pub fn busiest_weekday_name(&self) -> &'static str {
        weekday_name(self.busiest_weekday)
    }
}

pub fn weekday_name(weekday: u8) -> &'static str {
    match weekday {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}
