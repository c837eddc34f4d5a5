pub mod client;
pub mod paginator;
pub mod rate_limit;

pub use client::{GitHubApi, GitHubClient};
pub use paginator::Paginator;
pub use rate_limit::RateLimitTracker;
