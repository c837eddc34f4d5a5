use std::collections::{HashMap, HashSet};

use crate::analytics::palette;
use crate::models::{LanguageBytes, LanguageDatum, Repository};

struct LanguageAccum {
    bytes: u64,
    repos: HashSet<String>,
    first_seen: usize,
}

/// Merges per-repository byte counts into a ranked language distribution.
///
/// Repositories are walked in upstream order so that byte-count ties resolve
/// to first-encounter order, which keeps the output reproducible. Repositories
/// absent from `by_repo` (failed fetches, uncapped tail) contribute nothing.
pub fn aggregate_languages(
    repos: &[Repository],
    by_repo: &HashMap<String, LanguageBytes>,
) -> Vec<LanguageDatum> {
    let mut accum: HashMap<String, LanguageAccum> = HashMap::new();
    let mut next_rank = 0;

    for repo in repos {
        let Some(languages) = by_repo.get(&repo.name) else {
            continue;
        };
        // Per-repo maps are unordered; sort so first_seen assignment is stable.
        let mut pairs: Vec<_> = languages.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (language, bytes) in pairs {
            let entry = accum.entry(language.clone()).or_insert_with(|| {
                let rank = next_rank;
                next_rank += 1;
                LanguageAccum {
                    bytes: 0,
                    repos: HashSet::new(),
                    first_seen: rank,
                }
            });
            entry.bytes += bytes;
            entry.repos.insert(repo.name.clone());
        }
    }

    let grand_total: u64 = accum.values().map(|a| a.bytes).sum();

    let mut data: Vec<(LanguageDatum, usize)> = accum
        .into_iter()
        .map(|(name, a)| {
            let percentage = if grand_total > 0 {
                a.bytes as f64 / grand_total as f64 * 100.0
            } else {
                0.0
            };
            let color = palette::color_for(&name);
            (
                LanguageDatum {
                    name,
                    bytes: a.bytes,
                    repos: a.repos.len() as u32,
                    percentage,
                    color,
                },
                a.first_seen,
            )
        })
        .collect();

    data.sort_by(|(a, a_seen), (b, b_seen)| {
        b.bytes.cmp(&a.bytes).then_with(|| a_seen.cmp(b_seen))
    });

    data.into_iter().map(|(datum, _)| datum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::models::RepositoryOwner;

    fn repo(name: &str) -> Repository {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("alice/{}", name),
            owner: RepositoryOwner {
                login: "alice".to_string(),
                avatar_url: String::new(),
            },
            html_url: format!("https://github.com/alice/{}", name),
            description: None,
            fork: false,
            created_at: t,
            updated_at: t,
            pushed_at: Some(t),
            homepage: None,
            size: 0,
            stargazers_count: 0,
            watchers_count: 0,
            language: None,
            forks_count: 0,
            open_issues_count: 0,
            default_branch: "main".to_string(),
            topics: Vec::new(),
        }
    }

    fn bytes(pairs: &[(&str, u64)]) -> LanguageBytes {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_aggregates_across_repos() {
        let repos = vec![repo("web"), repo("api")];
        let mut by_repo = HashMap::new();
        by_repo.insert("web".to_string(), bytes(&[("TypeScript", 800), ("CSS", 200)]));
        by_repo.insert("api".to_string(), bytes(&[("TypeScript", 200)]));

        let result = aggregate_languages(&repos, &by_repo);
        assert_eq!(result.len(), 2);

        let ts = &result[0];
        assert_eq!(ts.name, "TypeScript");
        assert_eq!(ts.bytes, 1000);
        assert_eq!(ts.repos, 2);
        assert!((ts.percentage - 83.3).abs() < 0.05);

        let css = &result[1];
        assert_eq!(css.name, "CSS");
        assert_eq!(css.bytes, 200);
        assert_eq!(css.repos, 1);
        assert!((css.percentage - 16.7).abs() < 0.05);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let repos = vec![repo("a"), repo("b"), repo("c")];
        let mut by_repo = HashMap::new();
        by_repo.insert("a".to_string(), bytes(&[("Rust", 7001), ("Shell", 33)]));
        by_repo.insert("b".to_string(), bytes(&[("Rust", 999), ("Python", 4242)]));
        by_repo.insert("c".to_string(), bytes(&[("Zig", 17)]));

        let result = aggregate_languages(&repos, &by_repo);
        let total: f64 = result.iter().map(|d| d.percentage).sum();
        assert!((total - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let result = aggregate_languages(&[], &HashMap::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_repos_without_fetched_languages_are_skipped() {
        // 5 repos, language fetch succeeded for 3; totals come from those 3.
        let repos: Vec<_> = ["a", "b", "c", "d", "e"].iter().map(|n| repo(n)).collect();
        let mut by_repo = HashMap::new();
        by_repo.insert("a".to_string(), bytes(&[("Go", 100)]));
        by_repo.insert("c".to_string(), bytes(&[("Go", 50)]));
        by_repo.insert("e".to_string(), bytes(&[("Go", 50)]));

        let result = aggregate_languages(&repos, &by_repo);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].bytes, 200);
        assert_eq!(result[0].repos, 3);
        assert!((result[0].percentage - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let repos = vec![repo("first"), repo("second")];
        let mut by_repo = HashMap::new();
        by_repo.insert("first".to_string(), bytes(&[("Elm", 500)]));
        by_repo.insert("second".to_string(), bytes(&[("Nim", 500)]));

        let result = aggregate_languages(&repos, &by_repo);
        assert_eq!(result[0].name, "Elm");
        assert_eq!(result[1].name, "Nim");
    }

    #[test]
    fn test_zero_byte_totals_produce_zero_percentages() {
        let repos = vec![repo("empty")];
        let mut by_repo = HashMap::new();
        by_repo.insert("empty".to_string(), bytes(&[("Text", 0)]));

        let result = aggregate_languages(&repos, &by_repo);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].percentage, 0.0);
    }
}
