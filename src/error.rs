use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("GitHub rate limit exceeded")]
    RateLimited,

    #[error("GitHub API error: status {0}")]
    Upstream(StatusCode),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status the dispatcher should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::NotFound(_) => 404,
            Error::RateLimited => 429,
            _ => 500,
        }
    }

    /// Message safe to show to the caller. The underlying upstream status is
    /// never exposed here.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::NotFound(_) => "User not found".to_string(),
            Error::RateLimited => {
                "Rate limit exceeded. Please add a GitHub Personal Access Token.".to_string()
            }
            _ => "Failed to fetch data from GitHub. Please try again.".to_string(),
        }
    }
}
