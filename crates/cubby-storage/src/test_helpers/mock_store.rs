//! Mock ObjectStore implementation for testing
//!
//! Keeps buckets and objects in memory, counts every remote call so tests can
//! assert that cached answers short-circuit, and supports injecting a backend
//! failure.

use crate::traits::{BucketSummary, ObjectStore, ObjectSummary, PartTag, StoreError, StoreResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct MultipartSession {
    bucket: String,
    key: String,
    parts: BTreeMap<i32, Vec<u8>>,
}

/// In-memory object store with call counting and failure injection.
#[derive(Default)]
pub struct MemoryObjectStore {
    buckets: Mutex<HashMap<String, HashMap<String, Vec<u8>>>>,
    uploads: Mutex<HashMap<String, MultipartSession>>,
    failure: Mutex<Option<String>>,
    remote_calls: AtomicUsize,
    upload_counter: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of calls that reached this collaborator.
    pub fn remote_calls(&self) -> usize {
        self.remote_calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with a backend error.
    pub fn set_backend_failure(&self, message: &str) {
        *lock(&self.failure) = Some(message.to_string());
    }

    pub fn clear_backend_failure(&self) {
        *lock(&self.failure) = None;
    }

    /// Seed a bucket without going through the trait (no call counted).
    pub fn insert_bucket(&self, name: &str) {
        lock(&self.buckets).entry(name.to_string()).or_default();
    }

    /// Seed an object without going through the trait (no call counted).
    pub fn insert_object(&self, bucket: &str, key: &str, data: Vec<u8>) {
        lock(&self.buckets)
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), data);
    }

    pub fn has_bucket(&self, name: &str) -> bool {
        lock(&self.buckets).contains_key(name)
    }

    pub fn has_object(&self, bucket: &str, key: &str) -> bool {
        lock(&self.buckets)
            .get(bucket)
            .is_some_and(|b| b.contains_key(key))
    }

    pub fn object_data(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        lock(&self.buckets).get(bucket)?.get(key).cloned()
    }

    /// Count the call and fail if a failure is injected.
    fn tick(&self) -> StoreResult<()> {
        self.remote_calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.failure).as_ref() {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn create_bucket(&self, bucket: &str) -> StoreResult<()> {
        self.tick()?;
        lock(&self.buckets).entry(bucket.to_string()).or_default();
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> StoreResult<()> {
        self.tick()?;
        lock(&self.buckets)
            .remove(bucket)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(bucket.to_string()))
    }

    async fn list_buckets(&self) -> StoreResult<Vec<BucketSummary>> {
        self.tick()?;
        let mut names: Vec<String> = lock(&self.buckets).keys().cloned().collect();
        names.sort();
        Ok(names
            .into_iter()
            .map(|name| BucketSummary {
                name,
                creation_date: None,
            })
            .collect())
    }

    async fn bucket_exists(&self, bucket: &str) -> StoreResult<bool> {
        self.tick()?;
        Ok(lock(&self.buckets).contains_key(bucket))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        _content_type: &str,
    ) -> StoreResult<()> {
        self.tick()?;
        let mut buckets = lock(&self.buckets);
        let entries = buckets
            .get_mut(bucket)
            .ok_or_else(|| StoreError::NotFound(bucket.to_string()))?;
        entries.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        self.tick()?;
        Ok(lock(&self.buckets)
            .get(bucket)
            .is_some_and(|b| b.contains_key(key)))
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes> {
        self.tick()?;
        lock(&self.buckets)
            .get(bucket)
            .and_then(|b| b.get(key))
            .map(|data| Bytes::from(data.clone()))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", bucket, key)))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StoreResult<()> {
        self.tick()?;
        // S3 object deletion is idempotent; a missing key is not an error.
        if let Some(entries) = lock(&self.buckets).get_mut(bucket) {
            entries.remove(key);
        }
        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> StoreResult<()> {
        self.tick()?;
        if let Some(entries) = lock(&self.buckets).get_mut(bucket) {
            for key in keys {
                entries.remove(key);
            }
        }
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> StoreResult<Vec<ObjectSummary>> {
        self.tick()?;
        let buckets = lock(&self.buckets);
        let entries = buckets
            .get(bucket)
            .ok_or_else(|| StoreError::NotFound(bucket.to_string()))?;
        let mut keys: Vec<&String> = entries.keys().filter(|k| k.starts_with(prefix)).collect();
        keys.sort();
        Ok(keys
            .into_iter()
            .map(|k| ObjectSummary {
                key: k.clone(),
                size: entries.get(k).map(|d| d.len() as i64),
                last_modified: None,
                etag: None,
            })
            .collect())
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> StoreResult<()> {
        self.tick()?;
        let mut buckets = lock(&self.buckets);
        let data = buckets
            .get(source_bucket)
            .and_then(|b| b.get(source_key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", source_bucket, source_key)))?;
        let dest = buckets
            .get_mut(dest_bucket)
            .ok_or_else(|| StoreError::NotFound(dest_bucket.to_string()))?;
        dest.insert(dest_key.to_string(), data);
        Ok(())
    }

    async fn create_multipart_upload(&self, bucket: &str, key: &str) -> StoreResult<String> {
        self.tick()?;
        let id = format!("upload-{}", self.upload_counter.fetch_add(1, Ordering::SeqCst) + 1);
        lock(&self.uploads).insert(
            id.clone(),
            MultipartSession {
                bucket: bucket.to_string(),
                key: key.to_string(),
                parts: BTreeMap::new(),
            },
        );
        Ok(id)
    }

    async fn upload_part(
        &self,
        _bucket: &str,
        _key: &str,
        upload_id: &str,
        part_number: i32,
        body: Bytes,
    ) -> StoreResult<String> {
        self.tick()?;
        let mut uploads = lock(&self.uploads);
        let session = uploads
            .get_mut(upload_id)
            .ok_or_else(|| StoreError::NotFound(upload_id.to_string()))?;
        session.parts.insert(part_number, body.to_vec());
        Ok(format!("\"etag-{}\"", part_number))
    }

    async fn complete_multipart_upload(
        &self,
        _bucket: &str,
        _key: &str,
        upload_id: &str,
        parts: &[PartTag],
    ) -> StoreResult<()> {
        self.tick()?;
        let session = lock(&self.uploads)
            .remove(upload_id)
            .ok_or_else(|| StoreError::NotFound(upload_id.to_string()))?;

        let mut assembled = Vec::new();
        for part in parts {
            let data = session.parts.get(&part.part_number).ok_or_else(|| {
                StoreError::Backend(format!("part {} was never uploaded", part.part_number))
            })?;
            assembled.extend_from_slice(data);
        }

        lock(&self.buckets)
            .entry(session.bucket)
            .or_default()
            .insert(session.key, assembled);
        Ok(())
    }

    async fn abort_multipart_upload(
        &self,
        _bucket: &str,
        _key: &str,
        upload_id: &str,
    ) -> StoreResult<()> {
        self.tick()?;
        lock(&self.uploads)
            .remove(upload_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(upload_id.to_string()))
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StoreResult<String> {
        self.tick()?;
        Ok(format!(
            "https://example.com/presigned/get/{}/{}?expires={}",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }

    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StoreResult<String> {
        self.tick()?;
        Ok(format!(
            "https://example.com/presigned/put/{}/{}?expires={}",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }
}
