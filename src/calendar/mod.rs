//! Input model for the contribution payload.
//!
//! These types mirror what the GitHub GraphQL collaborator returns. Both field
//! conventions (`contributionCount`/`count`, `contributionLevel`/`level`,
//! `contributionDays`/`days`) are accepted here so nothing downstream has to
//! care which one arrived.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Qualitative contribution bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionLevel {
    FirstQuartile,
    SecondQuartile,
    ThirdQuartile,
    FourthQuartile,
    /// Day outside the observed window
    #[serde(rename = "NULL")]
    Excluded,
    /// Also catches levels this crate does not know about
    #[default]
    #[serde(other)]
    None,
}

/// Contribution calendar as returned by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: Option<u32>,
    #[serde(default)]
    pub weeks: Vec<CalendarWeek>,
}

/// One column of the calendar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    #[serde(default, alias = "days")]
    pub contribution_days: Vec<CalendarDay>,
}

/// One day of the calendar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// ISO date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "count")]
    pub contribution_count: Option<u32>,
    #[serde(default, alias = "level")]
    pub contribution_level: Option<ContributionLevel>,
    /// 0 = Sunday .. 6 = Saturday
    #[serde(default)]
    pub weekday: Option<u8>,
}

impl CalendarDay {
    /// Create a day with a count and no explicit level
    pub fn new(date: impl Into<String>, count: u32, weekday: u8) -> Self {
        Self {
            date: Some(date.into()),
            contribution_count: Some(count),
            contribution_level: None,
            weekday: Some(weekday),
        }
    }

    pub fn count(&self) -> u32 {
        self.contribution_count.unwrap_or(0)
    }

    pub fn level(&self) -> ContributionLevel {
        self.contribution_level.unwrap_or_default()
    }
}

/// Commit contributions to a single repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryContribution {
    #[serde(default)]
    pub repository: Option<RepositoryNode>,
    #[serde(default)]
    pub contributions: Option<TotalCount>,
}

impl RepositoryContribution {
    pub fn commits(&self) -> u32 {
        self.contributions.as_ref().map_or(0, |c| c.total_count)
    }
}

/// Repository metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name_with_owner: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazer_count: Option<u32>,
    #[serde(default)]
    pub fork_count: Option<u32>,
    #[serde(default)]
    pub languages: Option<LanguageConnection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageConnection {
    #[serde(default)]
    pub edges: Vec<LanguageEdge>,
}

/// Byte size of one language inside a repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageEdge {
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub node: Option<LanguageNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageNode {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    #[serde(default)]
    pub total_count: u32,
}

/// Everything the acquisition collaborator fetched for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub user: UserProfile,
    #[serde(default)]
    pub rate_limit: Option<RateLimit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub followers: Option<TotalCount>,
    #[serde(default)]
    pub following: Option<TotalCount>,
    #[serde(default)]
    pub contributions_collection: ContributionsCollection,
}

impl UserProfile {
    /// Name to display, falling back to the login
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.login,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    #[serde(default)]
    pub contribution_calendar: ContributionCalendar,
    #[serde(default)]
    pub commit_contributions_by_repository: Vec<RepositoryContribution>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub remaining: u32,
    #[serde(default)]
    pub reset_at: Option<String>,
}

#[derive(Deserialize)]
struct DataEnvelope {
    data: ProfilePayload,
}

impl ProfilePayload {
    /// Parse a saved payload, with or without the GraphQL `data` envelope
    pub fn from_json(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        if value.get("data").is_some() {
            let envelope: DataEnvelope = serde_json::from_value(value)?;
            return Ok(envelope.data);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn calendar(&self) -> &ContributionCalendar {
        &self.user.contributions_collection.contribution_calendar
    }

    pub fn repositories(&self) -> &[RepositoryContribution] {
        &self.user.contributions_collection.commit_contributions_by_repository
    }
}
