pub mod analytics;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod service;

pub use cache::ResultCache;
pub use config::Config;
pub use error::{Error, Result};
pub use github::{GitHubApi, GitHubClient};
pub use service::{AnalyticsService, ViewType};
