use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitpulse::{AnalyticsService, Config, GitHubClient, ResultCache, ViewType};

#[derive(Parser, Debug)]
#[command(name = "gitpulse")]
#[command(version = "0.1.0")]
#[command(about = "Aggregate a GitHub profile into language, commit, and activity views")]
struct Args {
    /// GitHub username to analyze
    username: String,

    /// View to build (user, repos, languages, commits, analytics)
    #[arg(short, long, default_value = "analytics")]
    view: String,

    /// Trailing window in days for commit views
    #[arg(short, long)]
    days: Option<i64>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitpulse=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env();

    let view: ViewType = args.view.parse()?;
    let days = args.days.unwrap_or(config.default_window_days);

    let client = GitHubClient::new(
        config.github_token.as_deref(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let cache = ResultCache::new(Duration::from_secs(config.cache_ttl_minutes * 60));
    let service = AnalyticsService::new(Arc::new(client), cache, &config);

    tracing::info!("Building {} view for {}", view.as_str(), args.username);
    let envelope = service.fetch_view(&args.username, view, days).await?;

    let output = serde_json::to_string_pretty(&envelope)?;
    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}
