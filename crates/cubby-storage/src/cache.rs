//! Advisory existence cache
//!
//! Maps bucket names and `bucket/key` pairs to a confirmed existence flag so
//! repeated checks can skip the remote head call. Absence of an entry means
//! "unknown", not "false". A remote not-found is cached as `false` and stays
//! cached until a local mutating operation invalidates it - objects created or
//! deleted by other writers are invisible here until this process touches the
//! same bucket/key. Callers needing strong consistency must bypass the cache.
//!
//! Each map is bounded by an LRU capacity; there is no TTL.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct ExistenceCache {
    buckets: Mutex<LruCache<String, bool>>,
    objects: Mutex<LruCache<String, bool>>,
}

fn object_key(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, key)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ExistenceCache {
    /// Create a cache with the given per-map capacity (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        ExistenceCache {
            buckets: Mutex::new(LruCache::new(capacity)),
            objects: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached answer for a bucket, or `None` when unknown.
    pub fn bucket(&self, name: &str) -> Option<bool> {
        lock(&self.buckets).get(name).copied()
    }

    /// Cached answer for an object, or `None` when unknown.
    pub fn object(&self, bucket: &str, key: &str) -> Option<bool> {
        lock(&self.objects).get(&object_key(bucket, key)).copied()
    }

    pub fn mark_bucket(&self, name: &str, exists: bool) {
        lock(&self.buckets).put(name.to_string(), exists);
    }

    pub fn mark_object(&self, bucket: &str, key: &str, exists: bool) {
        lock(&self.objects).put(object_key(bucket, key), exists);
    }

    /// Forget a bucket entry (used on delete; the next check goes remote).
    pub fn unmark_bucket(&self, name: &str) {
        lock(&self.buckets).pop(name);
    }

    /// Forget an object entry (used on delete; the next check goes remote).
    pub fn unmark_object(&self, bucket: &str, key: &str) {
        lock(&self.objects).pop(&object_key(bucket, key));
    }
}
