use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Public metadata for one GitHub repository, using GitHub's field names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub full_name: String, // "owner/repo"
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
}

impl RepositorySummary {
    /// Forks and archived repositories are never shown
    pub fn is_listed(&self) -> bool {
        !self.fork && !self.archived
    }

    /// Match on either the short name or "owner/repo", case-insensitive
    pub fn matches_name(&self, query: &str) -> bool {
        self.name.eq_ignore_ascii_case(query) || self.full_name.eq_ignore_ascii_case(query)
    }
}

/// Drop forks and archived repositories, then order by stars (desc),
/// breaking ties by most recently updated.
pub fn prepare_for_display(repos: Vec<RepositorySummary>) -> Vec<RepositorySummary> {
    let mut listed: Vec<RepositorySummary> =
        repos.into_iter().filter(RepositorySummary::is_listed).collect();
    listed.sort_by_key(|repo| (Reverse(repo.stargazers_count), Reverse(repo.updated_at)));
    listed
}
