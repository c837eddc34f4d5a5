use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::models::{CommitBucket, CommitSummary, RepoCommitRank};

/// Repositories kept in the per-repo commit ranking.
const RANKING_CAP: usize = 10;

/// Buckets commit author dates into `days` contiguous UTC calendar days, the
/// last bucket being the day of `now`.
///
/// Bucket identity is the calendar date, so output order never depends on
/// commit arrival order. Commits outside the window match no bucket and are
/// dropped; the upstream `since` filter is second-granularity and is not
/// trusted to be exact at the window edge.
pub fn build_timeseries(
    dates: &[DateTime<Utc>],
    days: i64,
    now: DateTime<Utc>,
) -> Vec<CommitBucket> {
    if days <= 0 {
        return Vec::new();
    }

    let start = now.date_naive() - Duration::days(days - 1);
    let mut counts = vec![0u32; days as usize];

    for date in dates {
        let offset = (date.date_naive() - start).num_days();
        if (0..days).contains(&offset) {
            counts[offset as usize] += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, commits)| {
            let day = start + Duration::days(i as i64);
            CommitBucket {
                day,
                date: short_label(day),
                commits,
            }
        })
        .collect()
}

/// "Jan 1"-style label used by charts and insights.
fn short_label(day: NaiveDate) -> String {
    format!("{} {}", day.format("%b"), day.day())
}

/// Ranks repositories by commit count within the window: zero-count entries
/// are dropped, the rest sorted descending and capped to the top 10. Ties
/// break by name so the ranking does not inherit map iteration order.
pub fn rank_repos_by_commits(
    commits_by_repo: &HashMap<String, Vec<CommitSummary>>,
    owner: &str,
) -> Vec<RepoCommitRank> {
    let mut ranking: Vec<RepoCommitRank> = commits_by_repo
        .iter()
        .filter(|(_, commits)| !commits.is_empty())
        .map(|(name, commits)| RepoCommitRank {
            name: name.clone(),
            commits: commits.len() as u32,
            url: format!("https://github.com/{}/{}", owner, name),
        })
        .collect();

    ranking.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.name.cmp(&b.name)));
    ranking.truncate(RANKING_CAP);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::models::{CommitAuthor, CommitDetails};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn commit(date: DateTime<Utc>) -> CommitSummary {
        CommitSummary {
            sha: "abc123".to_string(),
            commit: CommitDetails {
                message: "update".to_string(),
                author: CommitAuthor {
                    name: "alice".to_string(),
                    email: "alice@example.com".to_string(),
                    date,
                },
            },
            html_url: None,
        }
    }

    #[test]
    fn test_bucket_completeness() {
        let now = at(2024, 3, 15, 12);
        let series = build_timeseries(&[], 7, now);

        assert_eq!(series.len(), 7);
        for pair in series.windows(2) {
            assert_eq!(pair[1].day - pair[0].day, Duration::days(1));
        }
        assert_eq!(series[6].day, now.date_naive());
        assert!(series.iter().all(|b| b.commits == 0));
    }

    #[test]
    fn test_three_day_window_scenario() {
        let now = at(2024, 1, 3, 18);
        let dates = vec![
            at(2024, 1, 1, 9),
            at(2024, 1, 1, 12),
            at(2024, 1, 1, 23),
            at(2024, 1, 3, 7),
        ];

        let series = build_timeseries(&dates, 3, now);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, "Jan 1");
        assert_eq!(series[0].commits, 3);
        assert_eq!(series[1].date, "Jan 2");
        assert_eq!(series[1].commits, 0);
        assert_eq!(series[2].date, "Jan 3");
        assert_eq!(series[2].commits, 1);

        let total: u32 = series.iter().map(|b| b.commits).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_out_of_window_commits_are_dropped() {
        let now = at(2024, 1, 10, 12);
        let dates = vec![at(2024, 1, 1, 0), at(2023, 12, 31, 23), at(2024, 1, 10, 1)];

        let series = build_timeseries(&dates, 3, now);
        let total: u32 = series.iter().map(|b| b.commits).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_non_positive_window_is_empty() {
        let now = at(2024, 1, 1, 0);
        assert!(build_timeseries(&[at(2024, 1, 1, 0)], 0, now).is_empty());
        assert!(build_timeseries(&[at(2024, 1, 1, 0)], -5, now).is_empty());
    }

    #[test]
    fn test_ranking_caps_at_ten() {
        let date = at(2024, 2, 1, 0);
        let mut by_repo = HashMap::new();
        for i in 0..15 {
            let commits = vec![commit(date); i + 1];
            by_repo.insert(format!("repo-{:02}", i), commits);
        }

        let ranking = rank_repos_by_commits(&by_repo, "alice");
        assert_eq!(ranking.len(), 10);
        for pair in ranking.windows(2) {
            assert!(pair[0].commits >= pair[1].commits);
        }
        assert_eq!(ranking[0].name, "repo-14");
        assert_eq!(ranking[0].commits, 15);
        assert_eq!(ranking[0].url, "https://github.com/alice/repo-14");
    }

    #[test]
    fn test_ranking_drops_empty_repos() {
        let date = at(2024, 2, 1, 0);
        let mut by_repo = HashMap::new();
        by_repo.insert("active".to_string(), vec![commit(date)]);
        by_repo.insert("idle".to_string(), Vec::new());

        let ranking = rank_repos_by_commits(&by_repo, "alice");
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].name, "active");
    }

    #[test]
    fn test_ranking_ties_break_by_name() {
        let date = at(2024, 2, 1, 0);
        let mut by_repo = HashMap::new();
        by_repo.insert("zeta".to_string(), vec![commit(date)]);
        by_repo.insert("alpha".to_string(), vec![commit(date)]);

        let ranking = rank_repos_by_commits(&by_repo, "alice");
        assert_eq!(ranking[0].name, "alpha");
        assert_eq!(ranking[1].name, "zeta");
    }
}
