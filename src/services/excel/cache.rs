use lru::LruCache;
use parking_lot::Mutex;
use std::hash::Hash;
use std::num::NonZeroUsize;

/// Fixed-capacity LRU map that can be shared between threads.
///
/// The lock is only held while touching the map. Values are computed outside
/// of it, so two callers missing on the same key may both compute; the later
/// insert wins.
pub struct BoundedCache<K, V> {
    inner: Mutex<LruCache<K, V>>,
}

impl<K: Hash + Eq, V: Clone> BoundedCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    pub fn insert(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    pub fn get_or_try_insert_with<E, F>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let value = compute()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = BoundedCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get(&"a"), Some(1));

        cache.insert("c", 3);
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"c"), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_compute_runs_once_per_key() {
        let cache = BoundedCache::new(4);
        let mut calls = 0;

        for _ in 0..3 {
            let value: Result<i32, ()> = cache.get_or_try_insert_with("k", || {
                calls += 1;
                Ok(7)
            });
            assert_eq!(value, Ok(7));
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache: BoundedCache<&str, i32> = BoundedCache::new(4);

        let first: Result<i32, &str> = cache.get_or_try_insert_with("k", || Err("boom"));
        assert_eq!(first, Err("boom"));
        assert!(cache.is_empty());

        let second: Result<i32, &str> = cache.get_or_try_insert_with("k", || Ok(1));
        assert_eq!(second, Ok(1));
    }

    #[test]
    fn test_zero_capacity_still_holds_one_entry() {
        let cache = BoundedCache::new(0);
        cache.insert(1, "x");
        assert_eq!(cache.get(&1), Some("x"));
    }
}
