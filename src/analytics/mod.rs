pub mod fanout;
pub mod insights;
pub mod languages;
pub mod palette;
pub mod stats;
pub mod timeseries;

pub use fanout::FanoutCoordinator;
pub use insights::generate_insights;
pub use languages::aggregate_languages;
pub use stats::compute_user_stats;
pub use timeseries::{build_timeseries, rank_repos_by_commits};
