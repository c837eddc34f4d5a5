use crate::models::{CommitBucket, UserStats};

/// Renders the summary facts derivable from the aggregated stats, in a fixed
/// order. Facts whose precondition is unmet are skipped, not emitted empty.
pub fn generate_insights(stats: &UserStats, timeseries: &[CommitBucket]) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(language) = &stats.top_language {
        insights.push(format!("Most used language: {}", language));
    }

    if let Some(repo) = &stats.most_active_repo {
        insights.push(format!("Most active repository: {}", repo));
    }

    // Earliest bucket wins a tie for the peak.
    if let Some(peak) = timeseries.iter().max_by(|a, b| {
        a.commits
            .cmp(&b.commits)
            .then_with(|| b.day.cmp(&a.day))
    }) {
        if peak.commits > 0 {
            insights.push(format!(
                "Peak activity day: {} with {} commits",
                peak.date, peak.commits
            ));
        }
    }

    if !timeseries.is_empty() {
        let total: u32 = timeseries.iter().map(|b| b.commits).sum();
        let avg = f64::from(total) / timeseries.len() as f64;
        insights.push(format!("Average commits per day: {:.1}", avg));
    }

    insights
}
