//! Top repositories and languages.

use crate::calendar::RepositoryContribution;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_REPOSITORY_LIMIT: usize = 3;
pub const DEFAULT_LANGUAGE_LIMIT: usize = 5;

const PLACEHOLDER_REPOSITORY: &str = "No repository data";
const PLACEHOLDER_DESCRIPTION: &str = "No repositories with commits in this period.";
const PLACEHOLDER_LANGUAGE: &str = "N/A";

/// Repository ranked by commit volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAggregate {
    pub name_with_owner: String,
    pub url: String,
    pub description: String,
    pub stars: u32,
    pub forks: u32,
    pub commits: u32,
}

/// Language ranked by bytes across all repositories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageAggregate {
    pub language: String,
    pub bytes: u64,
    /// Share of all counted bytes, 0 when nothing was counted
    pub ratio: f64,
}

/// Rank repositories by commits, then stars (both descending), then name
pub fn top_repositories(rows: &[RepositoryContribution], limit: usize) -> Vec<RepositoryAggregate> {
    let mut repos: Vec<RepositoryAggregate> = rows
        .iter()
        .filter_map(|row| {
            let repo = row.repository.as_ref()?;
            Some(RepositoryAggregate {
                name_with_owner: repo.name_with_owner.clone(),
                url: repo.url.clone(),
                description: repo.description.clone().unwrap_or_default(),
                stars: repo.stargazer_count.unwrap_or(0),
                forks: repo.fork_count.unwrap_or(0),
                commits: row.commits(),
            })
        })
        .collect();

    repos.sort_by(|a, b| {
        b.commits
            .cmp(&a.commits)
            .then_with(|| b.stars.cmp(&a.stars))
            .then_with(|| a.name_with_owner.cmp(&b.name_with_owner))
    });
    repos.truncate(limit);

    repos
}

/// Sum language bytes over every repository and rank by total bytes, then name
pub fn top_languages(rows: &[RepositoryContribution], limit: usize) -> Vec<LanguageAggregate> {
    let mut language_bytes: HashMap<&str, u64> = HashMap::new();
    let mut total_bytes: u64 = 0;

    let edges = rows
        .iter()
        .filter_map(|row| row.repository.as_ref()?.languages.as_ref())
        .flat_map(|languages| &languages.edges);

    for edge in edges {
        let size = edge.size.unwrap_or(0);
        let name = edge.node.as_ref().and_then(|node| node.name.as_deref());

        match name {
            Some(name) if !name.is_empty() && size > 0 => {
                *language_bytes.entry(name).or_insert(0) += size;
                total_bytes += size;
            }
            _ => {}
        }
    }

    let mut items: Vec<LanguageAggregate> = language_bytes
        .into_iter()
        .map(|(language, bytes)| LanguageAggregate {
            language: language.to_string(),
            bytes,
            ratio: if total_bytes > 0 {
                bytes as f64 / total_bytes as f64
            } else {
                0.0
            },
        })
        .collect();

    items.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.language.cmp(&b.language)));
    items.truncate(limit);

    items
}

/// Fill the list up to `target` entries with placeholder repositories
pub fn pad_repositories(mut repos: Vec<RepositoryAggregate>, target: usize) -> Vec<RepositoryAggregate> {
    repos.truncate(target);
    while repos.len() < target {
        repos.push(RepositoryAggregate {
            name_with_owner: PLACEHOLDER_REPOSITORY.to_string(),
            url: String::new(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            stars: 0,
            forks: 0,
            commits: 0,
        });
    }
    repos
}

/// Fill the list up to `target` entries with "N/A" languages
pub fn pad_languages(mut languages: Vec<LanguageAggregate>, target: usize) -> Vec<LanguageAggregate> {
    languages.truncate(target);
    while languages.len() < target {
        languages.push(LanguageAggregate {
            language: PLACEHOLDER_LANGUAGE.to_string(),
            bytes: 0,
            ratio: 0.0,
        });
    }
    languages
}
