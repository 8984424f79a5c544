//! Time-bounded cache for Navitia responses.
//!
//! Entries are never evicted: the key space is the set of stops ever queried,
//! which is small and bounded. Staleness is discovered lazily on lookup, so
//! there is no background timer.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Default freshness window for cached departure boards.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Source of the current instant.
///
/// Production code uses [`SystemClock`]; tests substitute a clock they can
/// advance by hand.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

/// The monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

/// A map whose entries are only served while younger than the TTL.
///
/// The cache does no locking of its own; callers that share it wrap it in a
/// mutex together with whatever work must be serialized with it.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Create an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Return the value for `key` if it was stored less than one TTL before `now`.
    ///
    /// A stale entry is left in place; it is only replaced by the next insert.
    pub fn get_fresh(&self, key: &K, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;
        let age = now.saturating_duration_since(entry.stored_at);
        (age < self.ttl).then(|| entry.value.clone())
    }

    /// Insert or overwrite the entry for `key`, stamped with `now`.
    pub fn insert(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                stored_at: now,
                value,
            },
        );
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_misses() {
        let cache: TtlCache<&str, u32> = TtlCache::new(DEFAULT_TTL);
        assert_eq!(cache.get_fresh(&"a", Instant::now()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn fresh_until_ttl_elapses() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1, start);

        assert_eq!(cache.get_fresh(&"a", start), Some(1));
        assert_eq!(cache.get_fresh(&"a", start + Duration::from_secs(59)), Some(1));
        // Exactly one TTL old is already stale
        assert_eq!(cache.get_fresh(&"a", start + Duration::from_secs(60)), None);
        assert_eq!(cache.get_fresh(&"a", start + Duration::from_secs(3600)), None);
    }

    #[test]
    fn stale_entry_is_kept_until_overwritten() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1, start);

        let later = start + Duration::from_secs(90);
        assert_eq!(cache.get_fresh(&"a", later), None);
        assert_eq!(cache.len(), 1);

        cache.insert("a", 2, later);
        assert_eq!(cache.get_fresh(&"a", later), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_independent() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1, start);
        cache.insert("b", 2, start + Duration::from_secs(30));

        let now = start + Duration::from_secs(70);
        assert_eq!(cache.get_fresh(&"a", now), None);
        assert_eq!(cache.get_fresh(&"b", now), Some(2));
    }

    #[test]
    fn lookup_before_insert_instant_counts_as_fresh() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1, start + Duration::from_secs(5));
        assert_eq!(cache.get_fresh(&"a", start), Some(1));
    }

    #[test]
    fn default_ttl_is_one_minute() {
        let cache: TtlCache<&str, u32> = TtlCache::new(DEFAULT_TTL);
        assert_eq!(cache.ttl(), Duration::from_secs(60));
    }
}
