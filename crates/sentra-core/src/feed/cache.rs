// ── Full-range response cache ──
//
// Time-boxed cache for the capped full-range fetch. Keys are the query
// parameters that shape the result set — the page number is deliberately
// absent. Entries are never individually evicted; the whole cache is
// cleared on every explicit refresh and the handful of distinct
// filter/day combinations keeps it small in practice.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use sentra_api::{Activity, Severity};

/// Cache key for a full-range fetch: everything that shapes the result
/// set except pagination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    days: u32,
    status: Option<Severity>,
    source: Option<String>,
}

impl CacheKey {
    pub(crate) fn new(days: u32, status: Option<Severity>, source: Option<String>) -> Self {
        Self {
            days,
            status,
            source,
        }
    }
}

struct CacheEntry {
    data: Arc<Vec<Activity>>,
    fetched_at: Instant,
}

/// TTL cache over full-range activity responses.
///
/// Uses `tokio::time::Instant` so tests can drive expiry with a paused
/// clock.
pub(crate) struct FullRangeCache {
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl FullRangeCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Return the cached data if the entry exists and is younger than the
    /// TTL. A stale entry is a miss; it stays in place until overwritten
    /// or cleared.
    pub(crate) fn get(&self, key: &CacheKey) -> Option<Arc<Vec<Activity>>> {
        let entry = self.entries.get(key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(Arc::clone(&entry.data))
        } else {
            None
        }
    }

    /// Store a result under the key, stamped with the current time.
    pub(crate) fn insert(&self, key: CacheKey, data: Arc<Vec<Activity>>) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop every entry.
    pub(crate) fn clear(&self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
