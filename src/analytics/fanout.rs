use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::github::GitHubApi;
use crate::models::{CommitSummary, LanguageBytes, Repository};

/// Issues bounded-concurrency per-repository requests and collects whatever
/// succeeds. A failed repository is logged and omitted from the result map;
/// it never aborts its siblings or the batch.
pub struct FanoutCoordinator {
    api: Arc<dyn GitHubApi>,
    concurrency: usize,
    language_repo_cap: usize,
    commit_repo_cap: usize,
}

impl FanoutCoordinator {
    pub fn new(
        api: Arc<dyn GitHubApi>,
        concurrency: usize,
        language_repo_cap: usize,
        commit_repo_cap: usize,
    ) -> Self {
        Self {
            api,
            concurrency: concurrency.max(1),
            language_repo_cap,
            commit_repo_cap,
        }
    }

    /// Language breakdowns for the first `language_repo_cap` repositories,
    /// in the order the repository list arrived.
    pub async fn languages_by_repo(
        &self,
        owner: &str,
        repos: &[Repository],
    ) -> HashMap<String, LanguageBytes> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = Vec::new();

        for repo in repos.iter().take(self.language_repo_cap) {
            let api = self.api.clone();
            let sem = semaphore.clone();
            let owner = owner.to_string();
            let name = repo.name.clone();

            tasks.push(async move {
                let _permit = sem.acquire().await.ok()?;
                match api.get_repo_languages(&owner, &name).await {
                    Ok(languages) => Some((name, languages)),
                    Err(e) => {
                        tracing::warn!("Failed to fetch languages for {}/{}: {}", owner, name, e);
                        None
                    }
                }
            });
        }

        join_all(tasks).await.into_iter().flatten().collect()
    }

    /// Commits since `since` for the `commit_repo_cap` most recently pushed
    /// repositories. Repositories that were never pushed to sort last.
    pub async fn commits_by_repo(
        &self,
        owner: &str,
        repos: &[Repository],
        since: DateTime<Utc>,
    ) -> HashMap<String, Vec<CommitSummary>> {
        let mut by_pushed: Vec<&Repository> = repos.iter().collect();
        by_pushed.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = Vec::new();

        for repo in by_pushed.into_iter().take(self.commit_repo_cap) {
            let api = self.api.clone();
            let sem = semaphore.clone();
            let owner = owner.to_string();
            let name = repo.name.clone();

            tasks.push(async move {
                let _permit = sem.acquire().await.ok()?;
                match api.get_repo_commits(&owner, &name, since).await {
                    Ok(commits) => Some((name, commits)),
                    Err(e) => {
                        tracing::warn!("Failed to fetch commits for {}/{}: {}", owner, name, e);
                        None
                    }
                }
            });
        }

        join_all(tasks).await.into_iter().flatten().collect()
    }
}
