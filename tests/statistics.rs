use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashMap;
use year_recap::calendar::{CalendarDay, CalendarWeek, ContributionCalendar, ContributionLevel};
use year_recap::stats::{derive_yearly_statistics, DateRange, WindowOptions};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn instant(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn level_for(count: u32) -> ContributionLevel {
    match count {
        0 => ContributionLevel::None,
        1..=2 => ContributionLevel::FirstQuartile,
        3..=4 => ContributionLevel::SecondQuartile,
        5..=7 => ContributionLevel::ThirdQuartile,
        _ => ContributionLevel::FourthQuartile,
    }
}

/// Whole-year calendar in weeks of seven days, like the API returns
fn build_calendar(year: i32, counts: &HashMap<&str, u32>) -> ContributionCalendar {
    let mut days = Vec::new();
    let mut cursor = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();

    while cursor.year() == year {
        let iso = cursor.format("%Y-%m-%d").to_string();
        let count = counts.get(iso.as_str()).copied().unwrap_or(0);
        days.push(CalendarDay {
            date: Some(iso),
            contribution_count: Some(count),
            contribution_level: Some(level_for(count)),
            weekday: Some(cursor.weekday().num_days_from_sunday() as u8),
        });
        cursor = cursor.succ_opt().unwrap();
    }

    ContributionCalendar {
        total_contributions: None,
        weeks: days
            .chunks(7)
            .map(|chunk| CalendarWeek {
                contribution_days: chunk.to_vec(),
            })
            .collect(),
    }
}

fn options(year: i32, now: &str) -> WindowOptions {
    year_recap::logging::init_test();
    WindowOptions::calendar_year(year, "UTC").with_now(instant(now))
}

#[test]
fn zero_contribution_year() {
    let calendar = build_calendar(2025, &HashMap::new());
    let stats = derive_yearly_statistics(&calendar, &options(2025, "2026-02-01T00:00:00Z")).unwrap();

    assert_eq!(stats.total_contributions, 0);
    assert_eq!(stats.average_contributions_per_day, 0.0);
    assert_eq!(stats.longest_streak, 0);
    assert_eq!(stats.longest_gap, 365);
    assert_eq!(stats.longest_gap, stats.total_days_considered);
    assert_eq!(stats.total_days_considered, 365);
    assert_eq!(stats.max_contributions_month, None);
    assert_eq!(stats.max_contributions_date, None);
    assert_eq!(stats.busiest_weekday, 0);
}

#[test]
fn leap_year_has_366_considered_days() {
    let mut counts = HashMap::new();
    let isos: Vec<String> = (0..366)
        .map(|offset| {
            (date("2024-01-01") + chrono::Duration::days(offset))
                .format("%Y-%m-%d")
                .to_string()
        })
        .collect();
    for iso in &isos {
        counts.insert(iso.as_str(), 1);
    }

    let calendar = build_calendar(2024, &counts);
    let stats = derive_yearly_statistics(&calendar, &options(2024, "2026-01-01T00:00:00Z")).unwrap();

    assert_eq!(stats.total_days_considered, 366);
    assert_eq!(stats.total_contributions, 366);
    assert_eq!(stats.longest_streak, 366);
    assert_eq!(stats.longest_streak_start_date, Some(date("2024-01-01")));
    assert_eq!(stats.longest_streak_end_date, Some(date("2024-12-31")));
    assert_eq!(stats.longest_gap, 0);
    assert_eq!(stats.average_contributions_per_day, 1.0);
}

#[test]
fn longest_streak_can_cross_months() {
    let counts = HashMap::from([
        ("2025-01-30", 1),
        ("2025-01-31", 1),
        ("2025-02-01", 1),
        ("2025-02-02", 1),
        ("2025-02-03", 1),
    ]);
    let calendar = build_calendar(2025, &counts);
    let stats = derive_yearly_statistics(&calendar, &options(2025, "2026-01-01T00:00:00Z")).unwrap();

    assert_eq!(stats.longest_streak, 5);
    assert_eq!(stats.longest_streak_start_date, Some(date("2025-01-30")));
    assert_eq!(stats.longest_streak_end_date, Some(date("2025-02-03")));
    assert_eq!(stats.max_contributions_month.as_deref(), Some("2025-02"));
    assert_eq!(stats.max_monthly_contributions, 3);
    assert_eq!(stats.monthly_contributions[0], 2);
}

#[test]
fn future_days_in_current_year_are_ignored() {
    let counts = HashMap::from([("2026-01-01", 1), ("2026-12-31", 10)]);
    let calendar = build_calendar(2026, &counts);
    let stats = derive_yearly_statistics(&calendar, &options(2026, "2026-01-10T00:00:00Z")).unwrap();

    assert_eq!(stats.total_contributions, 1);
    assert_eq!(stats.total_days_considered, 10);
    assert_eq!(stats.longest_gap, 9);
    assert_eq!(stats.longest_gap_start_date, Some(date("2026-01-02")));
    assert_eq!(stats.longest_gap_end_date, Some(date("2026-01-10")));
    assert_eq!(stats.max_contributions_in_a_day, 1);
    assert_eq!(stats.max_contributions_date, Some(date("2026-01-01")));

    let last_week = stats.heatmap_weeks.last().unwrap();
    let dec_31 = last_week.days.last().unwrap();
    assert_eq!(dec_31.date, "2026-12-31");
    assert!(!dec_31.included);
    assert_eq!(dec_31.count, 0);
    assert_eq!(dec_31.level, ContributionLevel::Excluded);
}

#[test]
fn today_cutoff_follows_time_zone() {
    // 2026-01-09 20:00 UTC is already Jan 10 in Shanghai
    let counts = HashMap::from([("2026-01-10", 4)]);
    let calendar = build_calendar(2026, &counts);
    let now = Utc.with_ymd_and_hms(2026, 1, 9, 20, 0, 0).unwrap();

    let utc = derive_yearly_statistics(&calendar, &WindowOptions::calendar_year(2026, "UTC").with_now(now)).unwrap();
    let shanghai =
        derive_yearly_statistics(&calendar, &WindowOptions::calendar_year(2026, "Asia/Shanghai").with_now(now))
            .unwrap();

    assert_eq!(utc.total_contributions, 0);
    assert_eq!(utc.total_days_considered, 9);
    assert_eq!(shanghai.total_contributions, 4);
    assert_eq!(shanghai.total_days_considered, 10);
}

#[test]
fn decimal_precision_and_active_days() {
    let isos: Vec<String> = (0..100)
        .map(|offset| {
            (date("2025-01-01") + chrono::Duration::days(offset))
                .format("%Y-%m-%d")
                .to_string()
        })
        .collect();
    let counts: HashMap<&str, u32> = isos.iter().map(|iso| (iso.as_str(), 1)).collect();

    let calendar = build_calendar(2025, &counts);
    let stats = derive_yearly_statistics(&calendar, &options(2025, "2026-01-01T00:00:00Z")).unwrap();

    assert_eq!(stats.total_contributions, 100);
    assert_eq!(stats.active_days, 100);
    assert_eq!(stats.average_contributions_per_day, 0.3);
}

fn rolling_calendar() -> ContributionCalendar {
    ContributionCalendar {
        total_contributions: None,
        weeks: vec![CalendarWeek {
            contribution_days: vec![
                CalendarDay::new("2024-12-31", 5, 2),
                CalendarDay::new("2025-01-01", 10, 3),
                CalendarDay::new("2025-01-02", 0, 4),
                CalendarDay::new("2026-01-01", 8, 4),
            ],
        }],
    }
}

fn rolling_options(range: Option<DateRange>) -> WindowOptions {
    options(2025, "2025-02-01T00:00:00Z").with_date_range(range)
}

#[test]
fn date_range_spans_two_years() {
    let range = DateRange::new(date("2024-12-31"), date("2025-01-01"));
    let stats = derive_yearly_statistics(&rolling_calendar(), &rolling_options(Some(range))).unwrap();

    assert_eq!(stats.total_contributions, 15);
    assert_eq!(stats.total_days_considered, 2);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.longest_streak_start_date, Some(date("2024-12-31")));
}

#[test]
fn date_range_ignores_year_option() {
    let range = DateRange::new(date("2024-12-31"), date("2025-01-01"));
    for year in [1999, 2024, 2025, 2030] {
        let opts = WindowOptions::calendar_year(year, "UTC")
            .with_now(instant("2025-02-01T00:00:00Z"))
            .with_date_range(Some(range));
        let stats = derive_yearly_statistics(&rolling_calendar(), &opts).unwrap();

        assert_eq!(stats.total_contributions, 15, "year {}", year);
        assert_eq!(stats.total_days_considered, 2, "year {}", year);
    }
}

#[test]
fn single_day_range() {
    let range = DateRange::new(date("2025-01-01"), date("2025-01-01"));
    let stats = derive_yearly_statistics(&rolling_calendar(), &rolling_options(Some(range))).unwrap();

    assert_eq!(stats.total_contributions, 10);
    assert_eq!(stats.total_days_considered, 1);
}

#[test]
fn no_range_falls_back_to_calendar_year() {
    let stats = derive_yearly_statistics(&rolling_calendar(), &rolling_options(None)).unwrap();

    assert_eq!(stats.total_contributions, 10);
    assert_eq!(stats.total_days_considered, 2);
}

#[test]
fn reversed_range_excludes_everything() {
    let range = DateRange::new(date("2025-01-02"), date("2024-12-31"));
    let stats = derive_yearly_statistics(&rolling_calendar(), &rolling_options(Some(range))).unwrap();

    assert_eq!(stats.total_contributions, 0);
    assert_eq!(stats.total_days_considered, 0);
    assert_eq!(stats.average_contributions_per_day, 0.0);
    assert!(stats.heatmap_weeks[0].days.iter().all(|d| !d.included));
}

#[test]
fn empty_calendar_is_not_an_error() {
    let stats = derive_yearly_statistics(&ContributionCalendar::default(), &options(2025, "2025-06-01T00:00:00Z"))
        .unwrap();

    assert_eq!(stats.total_days_considered, 0);
    assert_eq!(stats.average_contributions_per_day, 0.0);
    assert!(stats.heatmap_weeks.is_empty());
}

#[test]
fn invalid_time_zone_is_an_error() {
    let opts = WindowOptions::calendar_year(2025, "Mars/Olympus_Mons");
    assert!(derive_yearly_statistics(&rolling_calendar(), &opts).is_err());
}

#[test]
fn payload_with_short_field_names() {
    let raw = r#"{"weeks":[{"days":[
        {"date":"2025-03-01","count":2,"level":"FIRST_QUARTILE","weekday":6},
        {"date":"2025-03-02","count":0,"weekday":0},
        {"date":"2025-03-03","count":7,"weekday":1}
    ]}]}"#;
    let calendar: ContributionCalendar = serde_json::from_str(raw).unwrap();
    let stats = derive_yearly_statistics(&calendar, &options(2025, "2025-12-01T00:00:00Z")).unwrap();

    assert_eq!(stats.total_contributions, 9);
    assert_eq!(stats.weekday_contributions, [0, 7, 0, 0, 0, 0, 2]);
    assert_eq!(stats.busiest_weekday, 1);
    assert_eq!(stats.heatmap_weeks[0].days[1].level, ContributionLevel::None);
}

proptest! {
    #[test]
    fn aggregate_totals_stay_consistent(
        counts in prop::collection::vec(0u32..20, 365),
        start in 0i64..365,
        len in 0i64..365,
    ) {
        let isos: Vec<String> = (0..365)
            .map(|offset| (date("2025-01-01") + chrono::Duration::days(offset)).format("%Y-%m-%d").to_string())
            .collect();
        let map: HashMap<&str, u32> = isos.iter().map(String::as_str).zip(counts.iter().copied()).collect();
        let calendar = build_calendar(2025, &map);

        let range_start = date("2025-01-01") + chrono::Duration::days(start);
        let range = DateRange::new(range_start, range_start + chrono::Duration::days(len));
        let opts = options(2025, "2026-01-01T00:00:00Z").with_date_range(Some(range));

        let stats = derive_yearly_statistics(&calendar, &opts).unwrap();
        let again = derive_yearly_statistics(&calendar, &opts).unwrap();

        let included: Vec<u32> = counts
            .iter()
            .enumerate()
            .filter(|(offset, _)| range.contains(date("2025-01-01") + chrono::Duration::days(*offset as i64)))
            .map(|(_, count)| *count)
            .collect();

        prop_assert_eq!(stats.total_contributions, included.iter().map(|&count| u64::from(count)).sum::<u64>());
        prop_assert_eq!(stats.total_days_considered as usize, included.len());
        prop_assert!(stats.active_days <= stats.total_days_considered);
        prop_assert!(stats.longest_streak <= stats.total_days_considered);
        prop_assert!(stats.longest_gap <= stats.total_days_considered);
        prop_assert_eq!(stats.monthly_contributions.iter().sum::<u64>(), stats.total_contributions);
        prop_assert_eq!(stats.weekday_contributions.iter().sum::<u64>(), stats.total_contributions);
        prop_assert_eq!(&stats, &again);
    }
}
