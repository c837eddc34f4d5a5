use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::models::ViewData;

struct CacheEntry {
    data: ViewData,
    inserted_at: Instant,
}

/// Time-boxed memo of aggregation results, keyed by
/// `(username, view-type, window)` rendered as a string.
///
/// Expired entries are evicted on read; there is no background sweep.
/// Concurrent `put`s on the same key are last-writer-wins, which is fine:
/// within the TTL both writers computed the same upstream truth.
pub struct ResultCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<ViewData> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.data.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: &str, data: ViewData) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LanguagesView, ViewData};

    fn sample() -> ViewData {
        ViewData::Languages(LanguagesView {
            languages: Vec::new(),
            total_repos: 3,
        })
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = ResultCache::new(Duration::from_secs(60));
        cache.put("languages:alice", sample());

        let hit = cache.get("languages:alice");
        assert!(matches!(
            hit,
            Some(ViewData::Languages(LanguagesView { total_repos: 3, .. }))
        ));
    }

    #[test]
    fn test_expired_entry_is_absent_and_evicted() {
        let cache = ResultCache::new(Duration::ZERO);
        cache.put("commits:alice:90", sample());

        assert!(cache.get("commits:alice:90").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = ResultCache::new(Duration::from_secs(60));
        cache.put("languages:alice", sample());

        assert!(cache.get("languages:bob").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = ResultCache::new(Duration::from_secs(60));
        cache.put("user:alice", sample());
        cache.clear();
        assert!(cache.is_empty());
    }
}
