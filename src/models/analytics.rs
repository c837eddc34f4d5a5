use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::{GitHubUser, Repository};

/// One row of the aggregated language distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDatum {
    pub name: String,
    pub bytes: u64,
    /// Number of distinct repositories contributing this language.
    pub repos: u32,
    pub percentage: f64,
    pub color: String,
}

/// One calendar day in the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitBucket {
    /// UTC calendar day, the bucket identity.
    pub day: NaiveDate,
    /// Short display label, e.g. "Jan 1".
    pub date: String,
    pub commits: u32,
}

/// Per-repository commit count within the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoCommitRank {
    pub name: String,
    pub commits: u32,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_repos: u32,
    pub total_commits: u32,
    /// None when no language data exists, never an empty string.
    pub top_language: Option<String>,
    pub most_active_repo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesView {
    pub languages: Vec<LanguageDatum>,
    pub total_repos: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsView {
    pub timeseries: Vec<CommitBucket>,
    pub by_repo: Vec<RepoCommitRank>,
    pub total_commits: u32,
}

/// Commit activity as embedded in the analytics view; same content as
/// [`CommitsView`] but the total is keyed `total` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsSummary {
    pub timeseries: Vec<CommitBucket>,
    pub by_repo: Vec<RepoCommitRank>,
    pub total: u32,
}

impl From<CommitsView> for CommitsSummary {
    fn from(view: CommitsView) -> Self {
        Self {
            timeseries: view.timeseries,
            by_repo: view.by_repo,
            total: view.total_commits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsView {
    pub user: GitHubUser,
    /// First 20 repositories only; the full list is available via the repos view.
    pub repos: Vec<Repository>,
    pub languages: Vec<LanguageDatum>,
    pub commits: CommitsSummary,
    pub stats: UserStats,
    pub insights: Vec<String>,
}

/// Payload of one aggregation view, as cached and as served.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    User(GitHubUser),
    Repos(Vec<Repository>),
    Languages(LanguagesView),
    Commits(CommitsView),
    Analytics(Box<AnalyticsView>),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RateLimitSnapshot {
    pub remaining: Option<u32>,
    /// Unix timestamp of the next quota reset.
    pub reset: Option<u64>,
}

/// Success response envelope for every view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub data: ViewData,
    pub cached: bool,
    pub rate_limit: RateLimitSnapshot,
}
