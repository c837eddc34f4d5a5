use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Optional personal access token. Absence lowers the rate-limit ceiling
    /// but is not an error.
    pub github_token: Option<String>,
    pub cache_ttl_minutes: u64,
    pub request_timeout_secs: u64,
    pub concurrency_limit: usize,
    pub language_repo_cap: usize,
    pub commit_repo_cap: usize,
    pub default_window_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let cache_ttl_minutes = env::var("CACHE_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let concurrency_limit = env::var("CONCURRENCY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let language_repo_cap = env::var("LANGUAGE_REPO_CAP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let commit_repo_cap = env::var("COMMIT_REPO_CAP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        let default_window_days = env::var("DEFAULT_WINDOW_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(90);

        Self {
            github_token,
            cache_ttl_minutes,
            request_timeout_secs,
            concurrency_limit,
            language_repo_cap,
            commit_repo_cap,
            default_window_days,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            cache_ttl_minutes: 60,
            request_timeout_secs: 10,
            concurrency_limit: 10,
            language_repo_cap: 30,
            commit_repo_cap: 20,
            default_window_days: 90,
        }
    }
}
