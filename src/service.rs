use std::str::FromStr;
use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};

use crate::analytics::{
    aggregate_languages, build_timeseries, compute_user_stats, generate_insights,
    rank_repos_by_commits, FanoutCoordinator,
};
use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::models::{
    AnalyticsView, CommitsView, Envelope, LanguagesView, Repository, ViewData,
};

/// Repositories embedded in the analytics view.
const ANALYTICS_REPO_PREVIEW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    User,
    Repos,
    Languages,
    Commits,
    Analytics,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::User => "user",
            ViewType::Repos => "repos",
            ViewType::Languages => "languages",
            ViewType::Commits => "commits",
            ViewType::Analytics => "analytics",
        }
    }

    /// Cache key for one aggregation request. The window length is part of
    /// the key only for the views it parameterizes.
    pub fn cache_key(&self, username: &str, days: i64) -> String {
        match self {
            ViewType::Commits | ViewType::Analytics => {
                format!("{}:{}:{}", self.as_str(), username, days)
            }
            _ => format!("{}:{}", self.as_str(), username),
        }
    }
}

impl FromStr for ViewType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(ViewType::User),
            "repos" => Ok(ViewType::Repos),
            "languages" => Ok(ViewType::Languages),
            "commits" => Ok(ViewType::Commits),
            "analytics" => Ok(ViewType::Analytics),
            other => Err(Error::Validation(format!("Invalid type parameter: {}", other))),
        }
    }
}

/// The aggregation entry points behind the dispatcher: validates the request,
/// consults the cache, fans out to the upstream API, and assembles the
/// response envelope.
pub struct AnalyticsService {
    api: Arc<dyn GitHubApi>,
    cache: ResultCache,
    fanout: FanoutCoordinator,
}

impl AnalyticsService {
    /// The cache is constructed by the caller and handed in; nothing here is
    /// process-global, so two services never share state by accident.
    pub fn new(api: Arc<dyn GitHubApi>, cache: ResultCache, config: &Config) -> Self {
        let fanout = FanoutCoordinator::new(
            api.clone(),
            config.concurrency_limit,
            config.language_repo_cap,
            config.commit_repo_cap,
        );
        Self { api, cache, fanout }
    }

    pub async fn fetch_view(&self, username: &str, view: ViewType, days: i64) -> Result<Envelope> {
        if username.trim().is_empty() {
            return Err(Error::Validation("Username is required".to_string()));
        }

        let key = view.cache_key(username, days);
        if let Some(data) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {}", key);
            return Ok(Envelope {
                data,
                cached: true,
                rate_limit: self.api.rate_limit(),
            });
        }

        tracing::info!("Building {} view for {}", view.as_str(), username);
        let data = match view {
            ViewType::User => ViewData::User(self.api.get_user(username).await?),
            ViewType::Repos => ViewData::Repos(self.api.get_user_repos(username).await?),
            ViewType::Languages => {
                let repos = self.api.get_user_repos(username).await?;
                ViewData::Languages(self.build_languages(username, &repos).await)
            }
            ViewType::Commits => {
                let repos = self.api.get_user_repos(username).await?;
                ViewData::Commits(self.build_commits(username, &repos, days).await)
            }
            ViewType::Analytics => {
                ViewData::Analytics(Box::new(self.build_analytics(username, days).await?))
            }
        };

        self.cache.put(&key, data.clone());
        Ok(Envelope {
            data,
            cached: false,
            rate_limit: self.api.rate_limit(),
        })
    }

    async fn build_languages(&self, username: &str, repos: &[Repository]) -> LanguagesView {
        let by_repo = self.fanout.languages_by_repo(username, repos).await;
        LanguagesView {
            languages: aggregate_languages(repos, &by_repo),
            total_repos: repos.len() as u32,
        }
    }

    async fn build_commits(&self, username: &str, repos: &[Repository], days: i64) -> CommitsView {
        let now = Utc::now();
        let since = now - ChronoDuration::days(days.max(0));
        let by_repo = self.fanout.commits_by_repo(username, repos, since).await;

        let dates: Vec<_> = by_repo
            .values()
            .flatten()
            .map(|c| c.authored_at())
            .collect();
        let timeseries = build_timeseries(&dates, days, now);
        // The bucket series is the authoritative window filter; boundary
        // commits upstream let through are not counted.
        let total_commits = timeseries.iter().map(|b| b.commits).sum();

        CommitsView {
            timeseries,
            by_repo: rank_repos_by_commits(&by_repo, username),
            total_commits,
        }
    }

    async fn build_analytics(&self, username: &str, days: i64) -> Result<AnalyticsView> {
        // User and repo list are load-bearing: either failing fails the
        // request, and the first fatal error wins.
        let (user, repos) = tokio::try_join!(
            self.api.get_user(username),
            self.api.get_user_repos(username)
        )?;

        let (languages_view, commits_view) = tokio::join!(
            self.build_languages(username, &repos),
            self.build_commits(username, &repos, days)
        );

        let stats = compute_user_stats(&repos, &languages_view.languages, &commits_view);
        let insights = generate_insights(&stats, &commits_view.timeseries);

        let mut repos = repos;
        repos.truncate(ANALYTICS_REPO_PREVIEW);

        Ok(AnalyticsView {
            user,
            repos,
            languages: languages_view.languages,
            commits: commits_view.into(),
            stats,
            insights,
        })
    }
}
