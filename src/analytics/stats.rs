use crate::models::{CommitsView, LanguageDatum, Repository, UserStats};

/// Derives the profile summary from the full repository list and the two
/// aggregated views. `languages` and `commits.by_repo` are already ranked,
/// so the top entries are the leaders.
pub fn compute_user_stats(
    repos: &[Repository],
    languages: &[LanguageDatum],
    commits: &CommitsView,
) -> UserStats {
    let total_stars = repos.iter().map(|r| u64::from(r.stargazers_count)).sum();
    let total_forks = repos.iter().map(|r| u64::from(r.forks_count)).sum();

    UserStats {
        total_stars,
        total_forks,
        total_repos: repos.len() as u32,
        total_commits: commits.total_commits,
        top_language: languages.first().map(|l| l.name.clone()),
        most_active_repo: commits.by_repo.first().map(|r| r.name.clone()),
    }
}
