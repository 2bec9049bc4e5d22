use crate::error::{RecapError, Result};
use crate::summary::{Summary, SummaryInput, SummaryMode, SummarySection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MAX_SECTIONS: usize = 3;
const DEFAULT_HEADING: &str = "Analysis";

/// Statistics handed to the AI collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDigest {
    pub username: String,
    pub year: i32,
    pub mode: String,
    pub total_contributions: u64,
    pub average_per_day: f64,
    pub longest_streak: u32,
    pub longest_gap: u32,
    pub most_active_month: Option<String>,
    pub max_contributions_day: u32,
    pub max_contributions_date: Option<NaiveDate>,
    pub issues_count: u32,
    /// "#1 Rust, #2 Go"
    pub top_languages: String,
    /// "owner/name(commits), ..."
    pub top_repos: String,
}

impl ReportDigest {
    pub fn from_input(input: &SummaryInput<'_>) -> Self {
        let stats = input.stats;

        let top_languages = input
            .top_languages
            .iter()
            .take(3)
            .enumerate()
            .map(|(i, lang)| format!("#{} {}", i + 1, lang.language))
            .collect::<Vec<_>>()
            .join(", ");

        let top_repos = input
            .top_repositories
            .iter()
            .take(3)
            .map(|repo| format!("{}({})", repo.name_with_owner, repo.commits))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            username: input.username.to_string(),
            year: input.year,
            mode: if input.is_rolling {
                "Rolling 365 Days".to_string()
            } else {
                "Calendar Year".to_string()
            },
            total_contributions: stats.total_contributions,
            average_per_day: stats.average_contributions_per_day,
            longest_streak: stats.longest_streak,
            longest_gap: stats.longest_gap,
            most_active_month: stats.max_contributions_month.clone(),
            max_contributions_day: stats.max_contributions_in_a_day,
            max_contributions_date: stats.max_contributions_date,
            issues_count: input.issues_count,
            top_languages,
            top_repos,
        }
    }
}

/// Instructions for the AI collaborator
pub fn system_prompt() -> String {
    let mut prompt = String::new();

    prompt.push_str("You are an assistant that writes GitHub annual report summaries.\n");
    prompt.push_str("Write a dense, verifiable summary. Avoid filler, hype and boilerplate.\n");
    prompt.push_str("Rules:\n");
    prompt.push_str("1. Every claim must come from the input data; prefer concrete numbers, dates, rankings and repository names.\n");
    prompt.push_str("2. Lead with the conclusion, then the evidence.\n");
    prompt.push_str("3. Keep each section to at most two sentences.\n");
    prompt.push_str("4. If a value is missing, skip it instead of guessing.\n");
    prompt.push_str("Reply with JSON shaped exactly as {\"intro\":string,\"sections\":[{\"heading\":string,\"content\":string}]}.\n");
    prompt.push_str("Use exactly 3 sections: contribution overview, rhythm and consistency, technology and projects.\n");

    prompt
}

/// Request carrying the digest
pub fn user_prompt(digest: &ReportDigest) -> Result<String> {
    let mut prompt = String::new();

    prompt.push_str("Write the JSON report summary for the data below.\n");
    if digest.mode == "Calendar Year" {
        prompt.push_str(&format!("Mode: calendar year {}.\n", digest.year));
    } else {
        prompt.push_str("Mode: rolling window over the past 365 days.\n");
    }
    prompt.push_str("Cover total contributions, daily average, peak month, peak day, longest streak and gap, issues, top languages and top repositories.\n");
    prompt.push_str(&format!("Data: {}\n", serde_json::to_string(digest)?));

    Ok(prompt)
}

#[derive(Deserialize)]
struct AiReply {
    #[serde(default)]
    intro: Option<String>,
    #[serde(default)]
    sections: Option<Vec<AiSection>>,
}

#[derive(Deserialize)]
struct AiSection {
    #[serde(default)]
    heading: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Validate the collaborator's JSON reply and turn it into a summary
pub fn parse_ai_reply(content: &str) -> Result<Summary> {
    let content = content.trim();
    if content.is_empty() {
        return Err(RecapError::ai_reply("empty content"));
    }

    let reply: AiReply = serde_json::from_str(content)?;

    let intro = reply
        .intro
        .filter(|intro| !intro.trim().is_empty())
        .ok_or_else(|| RecapError::ai_reply("missing intro"))?;

    let sections = reply.sections.unwrap_or_default();
    if sections.is_empty() {
        return Err(RecapError::ai_reply("missing sections"));
    }

    Ok(Summary {
        mode: SummaryMode::Ai,
        intro,
        sections: sections
            .into_iter()
            .take(MAX_SECTIONS)
            .map(|section| SummarySection {
                heading: section.heading.unwrap_or_else(|| DEFAULT_HEADING.to_string()),
                content: section.content.unwrap_or_default(),
            })
            .collect(),
        reason: None,
    })
}
