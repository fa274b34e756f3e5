use super::GeocodeResult;
use crate::core::constants::CENTER_KEY_PREFIX;
use crate::prelude::{Arc, HashMap, Mutex};

/// Session cache of geocoding answers, keyed by the exact query string.
///
/// Entries are never evicted. Clones share the same storage, so one cache can
/// be handed to several resolvers (e.g. the map views of different days).
#[derive(Clone, Default)]
pub struct GeocodeCache {
    inner: Arc<Mutex<CacheInner>>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, GeocodeResult>,
    hits: u64,
    misses: u64,
}

/// Snapshot of cache usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under which the center of `destination` is stored
    pub fn center_key(destination: &str) -> String {
        format!("{}{}", CENTER_KEY_PREFIX, destination)
    }

    /// Looks `key` up, counting the hit or miss
    pub fn get(&self, key: &str) -> Option<GeocodeResult> {
        let mut inner = self.lock();
        match inner.entries.get(key).cloned() {
            Some(result) => {
                inner.hits += 1;
                Some(result)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Stores a result; the first answer for a key wins
    pub fn insert(&self, key: impl Into<String>, result: GeocodeResult) {
        self.lock().entries.entry(key.into()).or_insert(result);
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entries: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        // A poisoned cache still holds valid entries
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for GeocodeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("GeocodeCache")
            .field("entries", &stats.entries)
            .field("hits", &stats.hits)
            .field("misses", &stats.misses)
            .finish()
    }
}
