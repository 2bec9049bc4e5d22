//! Single-pass aggregation over included days.

use crate::calendar::ContributionCalendar;
use crate::error::Result;
use crate::stats::heatmap::{normalize, HeatmapWeek, NormalizedDay};
use crate::stats::window::{InclusionPolicy, WindowOptions};
use crate::stats::YearlyStatistics;
use chrono::{Datelike, NaiveDate};

/// Kind of run a day belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// At least one contribution
    Active,
    /// Zero contributions
    Inactive,
}

impl RunKind {
    pub fn of(count: u32) -> Self {
        if count > 0 {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// The run currently being extended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub start: NaiveDate,
    pub length: u32,
}

/// Longest run of one kind seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongestRun {
    pub length: u32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Streak/gap state machine.
///
/// Only one run is open at a time: a day of the other kind closes it and
/// starts a new one. Longest records are replaced on strictly longer runs, so
/// the earliest of equally long runs is kept.
#[derive(Debug, Clone, Default)]
pub struct RunTracker {
    current: Option<Run>,
    longest_streak: LongestRun,
    longest_gap: LongestRun,
}

impl RunTracker {
    pub fn observe(&mut self, date: NaiveDate, kind: RunKind) {
        let run = match self.current {
            Some(run) if run.kind == kind => Run {
                length: run.length + 1,
                ..run
            },
            _ => Run {
                kind,
                start: date,
                length: 1,
            },
        };
        self.current = Some(run);

        let longest = match kind {
            RunKind::Active => &mut self.longest_streak,
            RunKind::Inactive => &mut self.longest_gap,
        };
        if run.length > longest.length {
            *longest = LongestRun {
                length: run.length,
                start: Some(run.start),
                end: Some(date),
            };
        }
    }

    pub fn current(&self) -> Option<Run> {
        self.current
    }

    pub fn longest_streak(&self) -> LongestRun {
        self.longest_streak
    }

    pub fn longest_gap(&self) -> LongestRun {
        self.longest_gap
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    total_contributions: u64,
    total_days_considered: u32,
    active_days: u32,
    max_in_a_day: u32,
    max_date: Option<NaiveDate>,
    monthly: [u64; 12],
    weekday: [u64; 7],
    runs: RunTracker,
}

impl Accumulator {
    fn push(&mut self, day: &NormalizedDay, date: NaiveDate) {
        let count = day.count;

        self.total_days_considered += 1;
        self.total_contributions += u64::from(count);
        if count > 0 {
            self.active_days += 1;
        }

        if let Some(slot) = self.weekday.get_mut(usize::from(day.weekday)) {
            *slot += u64::from(count);
        }
        self.monthly[date.month0() as usize] += u64::from(count);

        if count > 0 && count > self.max_in_a_day {
            self.max_in_a_day = count;
            self.max_date = Some(date);
        }

        self.runs.observe(date, RunKind::of(count));
    }

    fn finish(self, year: i32, heatmap_weeks: Vec<HeatmapWeek>) -> YearlyStatistics {
        let average_contributions_per_day = if self.total_days_considered > 0 {
            round_one_decimal(self.total_contributions as f64 / f64::from(self.total_days_considered))
        } else {
            0.0
        };

        let mut max_month = None;
        let mut max_monthly_contributions = 0;
        for (index, &value) in self.monthly.iter().enumerate() {
            if value > max_monthly_contributions {
                max_monthly_contributions = value;
                max_month = Some(index);
            }
        }

        // Strict comparison from "below zero" so ties and all-zero weeks keep the lowest index
        let mut busiest: Option<(usize, u64)> = None;
        for (index, &value) in self.weekday.iter().enumerate() {
            if busiest.map_or(true, |(_, best)| value > best) {
                busiest = Some((index, value));
            }
        }

        let streak = self.runs.longest_streak();
        let gap = self.runs.longest_gap();

        YearlyStatistics {
            total_contributions: self.total_contributions,
            total_days_considered: self.total_days_considered,
            active_days: self.active_days,
            average_contributions_per_day,
            max_contributions_in_a_day: self.max_in_a_day,
            max_contributions_date: self.max_date,
            longest_streak: streak.length,
            longest_streak_start_date: streak.start,
            longest_streak_end_date: streak.end,
            longest_gap: gap.length,
            longest_gap_start_date: gap.start,
            longest_gap_end_date: gap.end,
            max_contributions_month: max_month.map(|index| month_label(year, index)),
            max_monthly_contributions,
            monthly_contributions: self.monthly,
            weekday_contributions: self.weekday,
            busiest_weekday: busiest.map_or(0, |(index, _)| index as u8),
            heatmap_weeks,
        }
    }
}

/// Scan normalized weeks in order and build the statistics record.
///
/// Excluded days are skipped without breaking the surrounding runs.
pub fn aggregate(heatmap_weeks: Vec<HeatmapWeek>, year: i32) -> YearlyStatistics {
    let mut acc = Accumulator::default();

    for day in heatmap_weeks.iter().flat_map(|week| &week.days) {
        if !day.included {
            continue;
        }
        // normalize() never includes a day without a valid date
        if let Some(date) = day.parsed_date() {
            acc.push(day, date);
        }
    }

    tracing::debug!(
        year,
        days = acc.total_days_considered,
        total = acc.total_contributions,
        "aggregated contribution calendar"
    );

    acc.finish(year, heatmap_weeks)
}

/// Filter, normalize and aggregate a raw calendar
pub fn derive_yearly_statistics(
    calendar: &ContributionCalendar,
    options: &WindowOptions,
) -> Result<YearlyStatistics> {
    let policy = InclusionPolicy::resolve(options)?;
    let weeks = normalize(calendar, &policy);
    Ok(aggregate(weeks, options.year))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn month_label(year: i32, month_index: usize) -> String {
    format!("{}-{:02}", year, month_index + 1)
}
