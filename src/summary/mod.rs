pub mod prompt;

use crate::format::{format_date, format_date_range, month_name, NumberFormat};
use crate::stats::{LanguageAggregate, RepositoryAggregate, YearlyStatistics};
use serde::{Deserialize, Serialize};

/// Where a summary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    pub heading: String,
    pub content: String,
}

/// Short prose summary of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub mode: SummaryMode,
    pub intro: String,
    pub sections: Vec<SummarySection>,
    /// Why the fallback was used, if it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Summary {
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Format summary as markdown
    pub fn to_markdown(&self, title: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", title));
        output.push_str(&self.intro);
        output.push_str("\n\n");

        for section in &self.sections {
            output.push_str(&format!("## {}\n\n", section.heading));
            output.push_str(&section.content);
            output.push_str("\n\n");
        }

        let mode = match self.mode {
            SummaryMode::Ai => "AI",
            SummaryMode::Fallback => "fallback",
        };
        output.push_str(&format!("*Summary mode: {}*\n", mode));

        output
    }
}

/// Everything a summary generator needs from a report
#[derive(Debug, Clone, Copy)]
pub struct SummaryInput<'a> {
    pub username: &'a str,
    pub year: i32,
    pub is_rolling: bool,
    pub stats: &'a YearlyStatistics,
    pub issues_count: u32,
    pub top_languages: &'a [LanguageAggregate],
    pub top_repositories: &'a [RepositoryAggregate],
    pub number_format: NumberFormat,
}

impl SummaryInput<'_> {
    fn period(&self) -> String {
        if self.is_rolling {
            "the past year".to_string()
        } else {
            self.year.to_string()
        }
    }
}

/// Deterministic summary built only from the statistics
pub fn fallback_summary(input: &SummaryInput<'_>) -> Summary {
    let stats = input.stats;
    let period = input.period();
    let fmt = input.number_format;

    let peak_month = stats
        .max_contributions_month
        .as_deref()
        .and_then(month_name)
        .map_or_else(|| "no month in particular".to_string(), str::to_string);

    let highlight = match stats.max_contributions_date {
        Some(date) => format!(
            "Your busiest day was {} with {} contributions.",
            format_date(Some(date)),
            fmt.format(u64::from(stats.max_contributions_in_a_day))
        ),
        None => "No contributions recorded yet.".to_string(),
    };

    Summary {
        mode: SummaryMode::Fallback,
        intro: format!(
            "In {} you made {} contributions on GitHub, {} per day on average.",
            period,
            fmt.format(stats.total_contributions),
            stats.average_contributions_per_day
        ),
        sections: vec![
            SummarySection {
                heading: "Rhythm".to_string(),
                content: format!(
                    "Activity peaked in {}, and your longest streak ran {} days.",
                    peak_month, stats.longest_streak
                ),
            },
            SummarySection {
                heading: "Highlight".to_string(),
                content: highlight,
            },
            SummarySection {
                heading: "Collaboration".to_string(),
                content: format!(
                    "You were involved in {} issues in {}. Your longest break lasted {} days ({}).",
                    fmt.format(u64::from(input.issues_count)),
                    period,
                    stats.longest_gap,
                    format_date_range(stats.longest_gap_start_date, stats.longest_gap_end_date)
                ),
            },
        ],
        reason: None,
    }
}
