use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client, StatusCode};

use crate::error::{Error, Result};
use crate::github::paginator::{classify_status, Paginator};
use crate::github::rate_limit::RateLimitTracker;
use crate::models::{CommitSummary, GitHubUser, LanguageBytes, RateLimitSnapshot, Repository};

/// Repositories fetched per user, at most.
const MAX_REPOS: usize = 100;
/// Commits fetched per repository, at most.
const MAX_COMMITS: usize = 1000;

/// Upstream API surface, abstracted so aggregation code can be exercised
/// against in-memory fakes.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<GitHubUser>;

    /// Owned repositories, most recently pushed first.
    async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>>;

    async fn get_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes>;

    /// Commits authored since the given instant. Empty repositories yield an
    /// empty list, not an error.
    async fn get_repo_commits(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitSummary>>;

    /// Latest known quota figures, for the response envelope.
    fn rate_limit(&self) -> RateLimitSnapshot;
}

pub struct GitHubClient {
    client: Client,
    tracker: RateLimitTracker,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitpulse/0.1"),
        );
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            tracker: RateLimitTracker::new(),
            base_url: "https://api.github.com".to_string(),
        })
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        self.tracker.update_from_response(&response);

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, username));
        }

        Ok(response.json().await?)
    }

    async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?type=owner&sort=pushed&direction=desc",
            self.base_url, username
        );
        let paginator = Paginator::new(&self.client, &self.tracker);
        tracing::info!("Fetching repositories for: {}", username);
        paginator.fetch_limited(&url, MAX_REPOS, username).await
    }

    async fn get_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        let url = format!("{}/repos/{}/{}/languages", self.base_url, owner, repo);
        tracing::debug!("Fetching languages for: {}/{}", owner, repo);

        let response = self.client.get(&url).send().await?;
        self.tracker.update_from_response(&response);

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, repo));
        }

        Ok(response.json().await?)
    }

    async fn get_repo_commits(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitSummary>> {
        let url = format!(
            "{}/repos/{}/{}/commits?since={}",
            self.base_url,
            owner,
            repo,
            since.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let paginator = Paginator::new(&self.client, &self.tracker);
        tracing::debug!("Fetching commits for: {}/{}", owner, repo);

        match paginator.fetch_limited(&url, MAX_COMMITS, repo).await {
            Ok(commits) => Ok(commits),
            // 409 is GitHub's answer for an empty repository; a vanished repo
            // reads the same as one with no history.
            Err(Error::Upstream(StatusCode::CONFLICT)) | Err(Error::NotFound(_)) => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn rate_limit(&self) -> RateLimitSnapshot {
        self.tracker.snapshot()
    }
}
