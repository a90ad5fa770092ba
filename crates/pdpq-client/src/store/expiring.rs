use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use super::clock::Clock;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Thread-safe string-keyed store whose entries expire `ttl` after insertion.
///
/// A single `RwLock` guards the map, so `get`, `put`, and `clear` are
/// linearizable with respect to each other. A poisoned lock is recovered: the
/// map holds no invariant a panicking writer could break halfway.
pub struct ExpiringStore<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<V: Clone> ExpiringStore<V> {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) <= self.ttl
    }

    /// Value for `key` if stored and not older than the TTL. Never mutates.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let g = self.read();
        let entry = g.get(key)?;
        if self.is_fresh(entry, now) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let now = self.clock.now();
        let mut g = self.write();
        let key = key.into();
        // stored_at never moves backwards for a key
        let stored_at = match g.get(&key) {
            Some(prev) if prev.stored_at > now => prev.stored_at,
            _ => now,
        };
        g.insert(key, CacheEntry { value, stored_at });
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Physically drop expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut g = self.write();
        let before = g.len();
        g.retain(|_, e| now.saturating_duration_since(e.stored_at) <= self.ttl);
        before - g.len()
    }

    /// Number of physical entries, expired ones included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ManualClock;

    fn store(ttl_secs: u64) -> (Arc<ManualClock>, ExpiringStore<Vec<u8>>) {
        let clock = Arc::new(ManualClock::new());
        let s = ExpiringStore::new(clock.clone(), Duration::from_secs(ttl_secs));
        (clock, s)
    }

    #[test]
    fn get_within_ttl_including_boundary() {
        let (clock, s) = store(60);
        s.put("k", b"v".to_vec());

        clock.advance(Duration::from_secs(30));
        assert_eq!(s.get("k").as_deref(), Some(&b"v"[..]));

        clock.advance(Duration::from_secs(30));
        assert_eq!(s.get("k").as_deref(), Some(&b"v"[..]));
    }

    #[test]
    fn absent_strictly_after_ttl() {
        let (clock, s) = store(60);
        s.put("k", b"v".to_vec());
        clock.advance(Duration::from_secs(60) + Duration::from_nanos(1));
        assert!(s.get("k").is_none());
        // lazy: still physically present
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn never_stored_is_absent() {
        let (_clock, s) = store(60);
        assert!(s.get("missing").is_none());
    }

    #[test]
    fn overwrite_refreshes_timestamp() {
        let (clock, s) = store(60);
        s.put("k", b"old".to_vec());
        clock.advance(Duration::from_secs(50));
        s.put("k", b"new".to_vec());
        clock.advance(Duration::from_secs(50));
        assert_eq!(s.get("k").as_deref(), Some(&b"new"[..]));
    }

    #[test]
    fn timestamp_does_not_go_backwards() {
        let (clock, s) = store(60);
        clock.advance(Duration::from_secs(100));
        s.put("k", b"a".to_vec());
        clock.rewind(Duration::from_secs(100));
        s.put("k", b"b".to_vec());
        // entry keeps the later timestamp, so it expires relative to t=100
        clock.advance(Duration::from_secs(161));
        assert!(s.get("k").is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let (_clock, s) = store(60);
        s.put("a", b"1".to_vec());
        s.put("b", b"2".to_vec());
        s.clear();
        assert!(s.get("a").is_none());
        assert!(s.get("b").is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn purge_expired_drops_only_stale_entries() {
        let (clock, s) = store(60);
        s.put("short", b"1".to_vec());
        clock.advance(Duration::from_secs(45));
        s.put("long", b"2".to_vec());
        clock.advance(Duration::from_secs(30));

        assert_eq!(s.purge_expired(), 1);
        assert_eq!(s.len(), 1);
        assert!(s.get("long").is_some());
    }

    #[test]
    fn concurrent_put_get_clear() {
        let clock: Arc<dyn Clock> = Arc::new(crate::store::SystemClock);
        let s = Arc::new(ExpiringStore::<u64>::new(clock, Duration::from_secs(60)));

        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let s = Arc::clone(&s);
                std::thread::spawn(move || {
                    for i in 0..500u64 {
                        let key = format!("k{}", i % 16);
                        s.put(key.clone(), t * 1000 + i);
                        let _ = s.get(&key);
                        if i % 100 == 0 {
                            s.clear();
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(s.len() <= 16);
    }
}
