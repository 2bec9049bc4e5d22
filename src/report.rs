use crate::calendar::{ProfilePayload, RateLimit, UserProfile};
use crate::config::Config;
use crate::error::Result;
use crate::format::NumberFormat;
use crate::stats::{
    derive_yearly_statistics, pad_languages, pad_repositories, top_languages, top_repositories,
    LanguageAggregate, ReportWindow, RepositoryAggregate, YearlyStatistics,
};
use crate::summary::prompt::{parse_ai_reply, ReportDigest};
use crate::summary::{fallback_summary, Summary, SummaryInput, SummaryMode};
use chrono::{DateTime, Utc};
use serde::Serialize;

const FALLBACK_REASON: &str = "no AI reply was provided";

/// Issue and pull request counts fetched separately from the calendar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub issues: u32,
    pub pull_requests: u32,
}

/// Public profile fields shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub name: String,
    pub login: String,
    pub bio: String,
    pub avatar_url: String,
    pub followers: u32,
    pub following: u32,
}

impl From<&UserProfile> for ProfileSummary {
    fn from(user: &UserProfile) -> Self {
        Self {
            name: user.display_name().to_string(),
            login: user.login.clone(),
            bio: user.bio.clone().unwrap_or_default(),
            avatar_url: user.avatar_url.clone().unwrap_or_default(),
            followers: user.followers.map_or(0, |c| c.total_count),
            following: user.following.map_or(0, |c| c.total_count),
        }
    }
}

/// Fully resolved report, ready for rendering
#[derive(Debug, Clone)]
pub struct Report {
    pub profile: ProfileSummary,
    pub year: i32,
    pub is_rolling: bool,
    pub time_zone: String,
    pub stats: YearlyStatistics,
    pub top_repositories: Vec<RepositoryAggregate>,
    pub top_languages: Vec<LanguageAggregate>,
    pub counts: ActivityCounts,
    pub summary: Summary,
    pub rate_limit: Option<RateLimit>,
    number_format: NumberFormat,
}

/// JSON snapshot of a report, without the heatmap matrix
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub generated_at: DateTime<Utc>,
    pub year: i32,
    pub is_rolling: bool,
    pub timezone: &'a str,
    pub username: &'a str,
    pub profile: &'a ProfileSummary,
    pub ai_mode: SummaryMode,
    pub ai_reason: Option<&'a str>,
    pub rate_limit: Option<&'a RateLimit>,
    pub stats: serde_json::Value,
    pub issues_count: u32,
    pub pr_count: u32,
    pub top_repos: &'a [RepositoryAggregate],
    pub top_languages: &'a [LanguageAggregate],
    pub ai_summary: &'a Summary,
}

/// Compact output for `--dry-run`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunDigest {
    pub generated_at: DateTime<Utc>,
    pub username: String,
    pub year: i32,
    pub total_contributions: u64,
    pub average_contributions_per_day: f64,
    pub max_contributions_month: Option<String>,
    pub ai_mode: SummaryMode,
    pub issues_count: u32,
    pub pr_count: u32,
}

impl Report {
    pub fn summary_input(&self) -> SummaryInput<'_> {
        SummaryInput {
            username: &self.profile.login,
            year: self.year,
            is_rolling: self.is_rolling,
            stats: &self.stats,
            issues_count: self.counts.issues,
            top_languages: &self.top_languages,
            top_repositories: &self.top_repositories,
            number_format: self.number_format,
        }
    }

    /// Prompt data for the AI collaborator
    pub fn digest(&self) -> ReportDigest {
        ReportDigest::from_input(&self.summary_input())
    }

    /// Use the collaborator's reply when it is valid, otherwise keep the
    /// fallback summary and record why
    pub fn apply_ai_reply(&mut self, content: &str) {
        match parse_ai_reply(content) {
            Ok(summary) => self.summary = summary,
            Err(err) => {
                tracing::warn!(%err, "AI reply rejected, keeping fallback summary");
                self.summary = fallback_summary(&self.summary_input()).with_reason(err.to_string());
            }
        }
    }

    pub fn title(&self) -> String {
        if self.is_rolling {
            format!("{} GitHub Report: the past year", self.profile.login)
        } else {
            format!("{} {} GitHub Annual Report", self.profile.login, self.year)
        }
    }

    pub fn snapshot(&self, generated_at: DateTime<Utc>) -> Result<Snapshot<'_>> {
        let mut stats = serde_json::to_value(&self.stats)?;
        if let Some(fields) = stats.as_object_mut() {
            fields.remove("heatmapWeeks");
        }

        Ok(Snapshot {
            generated_at,
            year: self.year,
            is_rolling: self.is_rolling,
            timezone: &self.time_zone,
            username: &self.profile.login,
            profile: &self.profile,
            ai_mode: self.summary.mode,
            ai_reason: self.summary.reason.as_deref(),
            rate_limit: self.rate_limit.as_ref(),
            stats,
            issues_count: self.counts.issues,
            pr_count: self.counts.pull_requests,
            top_repos: &self.top_repositories,
            top_languages: &self.top_languages,
            ai_summary: &self.summary,
        })
    }

    pub fn dry_run_digest(&self, generated_at: DateTime<Utc>) -> DryRunDigest {
        DryRunDigest {
            generated_at,
            username: self.profile.login.clone(),
            year: self.year,
            total_contributions: self.stats.total_contributions,
            average_contributions_per_day: self.stats.average_contributions_per_day,
            max_contributions_month: self.stats.max_contributions_month.clone(),
            ai_mode: self.summary.mode,
            issues_count: self.counts.issues,
            pr_count: self.counts.pull_requests,
        }
    }
}

/// Runs the statistics engine and assembles a report
pub struct ReportBuilder {
    config: Config,
}

impl ReportBuilder {
    /// Create a new builder
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn build(
        &self,
        payload: &ProfilePayload,
        window: &ReportWindow,
        counts: ActivityCounts,
    ) -> Result<Report> {
        let stats = derive_yearly_statistics(payload.calendar(), &window.options)?;

        let rows = payload.repositories();
        let mut repos = top_repositories(rows, self.config.top_repositories);
        let mut languages = top_languages(rows, self.config.top_languages);
        if self.config.pad_placeholders {
            repos = pad_repositories(repos, self.config.top_repositories);
            languages = pad_languages(languages, self.config.top_languages);
        }

        tracing::info!(
            user = %payload.user.login,
            year = window.year(),
            rolling = window.is_rolling,
            total = stats.total_contributions,
            "built report"
        );

        let mut report = Report {
            profile: ProfileSummary::from(&payload.user),
            year: window.year(),
            is_rolling: window.is_rolling,
            time_zone: window.options.time_zone.clone(),
            stats,
            top_repositories: repos,
            top_languages: languages,
            counts,
            summary: Summary {
                mode: SummaryMode::Fallback,
                intro: String::new(),
                sections: Vec::new(),
                reason: None,
            },
            rate_limit: payload.rate_limit.clone(),
            number_format: self.config.number_format(),
        };
        report.summary = fallback_summary(&report.summary_input()).with_reason(FALLBACK_REASON);

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarDay, CalendarWeek, ContributionCalendar, RepositoryContribution, RepositoryNode, TotalCount};
    use crate::stats::DateRange;
    use chrono::{NaiveDate, TimeZone};

    fn create_test_payload() -> ProfilePayload {
        let mut payload = ProfilePayload::default();
        payload.user.login = "octocat".to_string();
        payload.user.contributions_collection.contribution_calendar = ContributionCalendar {
            total_contributions: Some(15),
            weeks: vec![CalendarWeek {
                contribution_days: vec![
                    CalendarDay::new("2024-12-31", 5, 2),
                    CalendarDay::new("2025-01-01", 10, 3),
                    CalendarDay::new("2025-01-02", 0, 4),
                ],
            }],
        };
        payload.user.contributions_collection.commit_contributions_by_repository = vec![RepositoryContribution {
            repository: Some(RepositoryNode {
                name_with_owner: "octocat/hello".to_string(),
                ..Default::default()
            }),
            contributions: Some(TotalCount { total_count: 12 }),
        }];
        payload
    }

    fn calendar_window(year: i32) -> ReportWindow {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        ReportWindow::resolve(Some(year), "UTC", now).unwrap()
    }

    #[test]
    fn test_builder_creation_validates_config() {
        let mut config = Config::default();
        config.time_zone = "Bad/Zone".to_string();
        assert!(ReportBuilder::new(config).is_err());
        assert!(ReportBuilder::new(Config::default()).is_ok());
    }

    #[test]
    fn test_build_calendar_year_report() {
        let builder = ReportBuilder::new(Config::default()).unwrap();
        let counts = ActivityCounts { issues: 4, pull_requests: 2 };
        let report = builder.build(&create_test_payload(), &calendar_window(2025), counts).unwrap();

        assert_eq!(report.stats.total_contributions, 10);
        assert_eq!(report.stats.total_days_considered, 2);
        assert_eq!(report.top_repositories.len(), 3);
        assert_eq!(report.top_repositories[0].commits, 12);
        assert_eq!(report.top_languages.len(), 5);
        assert_eq!(report.summary.mode, SummaryMode::Fallback);
        assert_eq!(report.title(), "octocat 2025 GitHub Annual Report");
    }

    #[test]
    fn test_build_rolling_report() {
        let builder = ReportBuilder::new(Config::default()).unwrap();
        let mut window = calendar_window(2025);
        window.is_rolling = true;
        window.options.date_range = Some(DateRange::new(
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ));

        let report = builder.build(&create_test_payload(), &window, ActivityCounts::default()).unwrap();
        assert_eq!(report.stats.total_contributions, 15);
        assert!(report.summary.intro.contains("the past year"));
    }

    #[test]
    fn test_build_without_padding() {
        let mut config = Config::default();
        config.pad_placeholders = false;
        let builder = ReportBuilder::new(config).unwrap();
        let report = builder
            .build(&create_test_payload(), &calendar_window(2025), ActivityCounts::default())
            .unwrap();

        assert_eq!(report.top_repositories.len(), 1);
        assert!(report.top_languages.is_empty());
    }

    #[test]
    fn test_snapshot_omits_heatmap() {
        let builder = ReportBuilder::new(Config::default()).unwrap();
        let report = builder
            .build(&create_test_payload(), &calendar_window(2025), ActivityCounts { issues: 1, pull_requests: 3 })
            .unwrap();
        let generated_at = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        let json = serde_json::to_value(report.snapshot(generated_at).unwrap()).unwrap();
        assert!(json["stats"].get("heatmapWeeks").is_none());
        assert_eq!(json["stats"]["totalContributions"], 10);
        assert_eq!(json["prCount"], 3);
        assert_eq!(json["aiMode"], "fallback");
        assert_eq!(json["username"], "octocat");

        let digest = report.dry_run_digest(generated_at);
        assert_eq!(digest.total_contributions, 10);
        assert_eq!(digest.max_contributions_month.as_deref(), Some("2025-01"));
    }

    #[test]
    fn test_apply_ai_reply() {
        let builder = ReportBuilder::new(Config::default()).unwrap();
        let mut report = builder
            .build(&create_test_payload(), &calendar_window(2025), ActivityCounts::default())
            .unwrap();

        report.apply_ai_reply(r#"{"intro":"Busy January.","sections":[{"heading":"Overview","content":"10 contributions."}]}"#);
        assert_eq!(report.summary.mode, SummaryMode::Ai);
        assert_eq!(report.summary.intro, "Busy January.");

        report.apply_ai_reply(r#"{"intro":""}"#);
        assert_eq!(report.summary.mode, SummaryMode::Fallback);
        assert!(report.summary.reason.as_deref().unwrap().contains("missing intro"));
        assert_eq!(report.digest().username, "octocat");
    }
}
