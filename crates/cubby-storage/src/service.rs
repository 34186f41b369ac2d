//! Storage operation layer
//!
//! [`StorageService`] fronts the remote collaborator with one shape per
//! operation: validate parameters, call the backend, update the existence
//! cache, and return a typed result. Every failure is also appended to the
//! caller's [`ErrorReport`] so the boundary can render the full ordered record
//! list. The cache and the report replace what used to be process-global
//! state: the cache is instance state on the service, the report is owned by
//! the request.

use crate::cache::ExistenceCache;
use crate::error::{ServiceError, ServiceResult};
use crate::report::ErrorReport;
use crate::traits::{BucketSummary, ObjectStore, ObjectSummary, PartTag, StoreError};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Presign operation for object retrieval.
pub const PRESIGN_OP_GET: &str = "getObject";
/// Presign operation for direct upload.
pub const PRESIGN_OP_PUT: &str = "putObject";

pub struct StorageService {
    store: Arc<dyn ObjectStore>,
    cache: ExistenceCache,
    presign_expiry: Duration,
}

impl StorageService {
    pub fn new(store: Arc<dyn ObjectStore>, cache_capacity: usize, presign_expiry: Duration) -> Self {
        StorageService {
            store,
            cache: ExistenceCache::new(cache_capacity),
            presign_expiry,
        }
    }

    fn record(&self, report: &ErrorReport, err: ServiceError) -> ServiceError {
        report.add(err.to_record());
        err
    }

    fn require_field(
        &self,
        report: &ErrorReport,
        operation: &'static str,
        field: &'static str,
        value: &str,
    ) -> ServiceResult<()> {
        if value.trim().is_empty() {
            return Err(self.record(
                report,
                ServiceError::validation(format!("{} must be a non-empty string", field))
                    .with("operation", operation)
                    .with(field, value),
            ));
        }
        Ok(())
    }

    fn remote_error(
        &self,
        report: &ErrorReport,
        operation: &'static str,
        err: &StoreError,
        context: &[(&'static str, &str)],
    ) -> ServiceError {
        let mut service_err =
            ServiceError::remote(format!("{} failed", operation)).with("error", err.to_string());
        for (key, value) in context {
            service_err = service_err.with(key, *value);
        }
        self.record(report, service_err)
    }

    pub async fn create_bucket(&self, report: &ErrorReport, bucket: &str) -> ServiceResult<()> {
        self.require_field(report, "create_bucket", "bucket", bucket)?;

        match self.store.create_bucket(bucket).await {
            Ok(()) => {
                self.cache.mark_bucket(bucket, true);
                Ok(())
            }
            Err(e) => Err(self.remote_error(report, "create_bucket", &e, &[("bucket", bucket)])),
        }
    }

    pub async fn list_buckets(&self, report: &ErrorReport) -> ServiceResult<Vec<BucketSummary>> {
        match self.store.list_buckets().await {
            Ok(buckets) => {
                for bucket in &buckets {
                    self.cache.mark_bucket(&bucket.name, true);
                }
                Ok(buckets)
            }
            Err(e) => Err(self.remote_error(report, "list_buckets", &e, &[])),
        }
    }

    /// Check bucket existence, consulting the cache first. A remote not-found
    /// is cached as `false`; remote failures are surfaced and not cached.
    pub async fn bucket_exists(&self, report: &ErrorReport, bucket: &str) -> ServiceResult<bool> {
        self.require_field(report, "bucket_exists", "bucket", bucket)?;

        if let Some(cached) = self.cache.bucket(bucket) {
            tracing::debug!(bucket = %bucket, exists = cached, "bucket existence cache hit");
            return Ok(cached);
        }

        match self.store.bucket_exists(bucket).await {
            Ok(exists) => {
                self.cache.mark_bucket(bucket, exists);
                Ok(exists)
            }
            Err(e) => Err(self.remote_error(report, "bucket_exists", &e, &[("bucket", bucket)])),
        }
    }

    pub async fn delete_bucket(&self, report: &ErrorReport, bucket: &str) -> ServiceResult<()> {
        self.require_field(report, "delete_bucket", "bucket", bucket)?;

        match self.store.delete_bucket(bucket).await {
            Ok(()) => {
                self.cache.unmark_bucket(bucket);
                Ok(())
            }
            Err(e) => Err(self.remote_error(report, "delete_bucket", &e, &[("bucket", bucket)])),
        }
    }

    pub async fn upload_object(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> ServiceResult<()> {
        self.require_field(report, "upload_object", "bucket", bucket)?;
        self.require_field(report, "upload_object", "key", key)?;

        let content_type = content_type.unwrap_or(DEFAULT_CONTENT_TYPE);

        match self.store.put_object(bucket, key, data, content_type).await {
            Ok(()) => {
                self.cache.mark_object(bucket, key, true);
                Ok(())
            }
            Err(e) => Err(self.remote_error(
                report,
                "upload_object",
                &e,
                &[("bucket", bucket), ("key", key)],
            )),
        }
    }

    /// Check object existence, consulting the cache first. A remote not-found
    /// is cached as `false`; remote failures are surfaced and not cached.
    pub async fn object_exists(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
    ) -> ServiceResult<bool> {
        self.require_field(report, "object_exists", "bucket", bucket)?;
        self.require_field(report, "object_exists", "key", key)?;

        if let Some(cached) = self.cache.object(bucket, key) {
            tracing::debug!(bucket = %bucket, key = %key, exists = cached, "object existence cache hit");
            return Ok(cached);
        }

        match self.store.object_exists(bucket, key).await {
            Ok(exists) => {
                self.cache.mark_object(bucket, key, exists);
                Ok(exists)
            }
            Err(e) => Err(self.remote_error(
                report,
                "object_exists",
                &e,
                &[("bucket", bucket), ("key", key)],
            )),
        }
    }

    /// Fetch an object's bytes. Always hits the backend; a missing key maps to
    /// a not-found error rather than a remote failure.
    pub async fn fetch_object(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
    ) -> ServiceResult<Bytes> {
        self.require_field(report, "fetch_object", "bucket", bucket)?;
        self.require_field(report, "fetch_object", "key", key)?;

        match self.store.get_object(bucket, key).await {
            Ok(bytes) => Ok(bytes),
            Err(StoreError::NotFound(_)) => Err(self.record(
                report,
                ServiceError::not_found(format!(
                    "File \"{}\" not found in bucket \"{}\"",
                    key, bucket
                ))
                .with("bucket", bucket)
                .with("key", key),
            )),
            Err(e) => Err(self.remote_error(
                report,
                "fetch_object",
                &e,
                &[("bucket", bucket), ("key", key)],
            )),
        }
    }

    pub async fn delete_object(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
    ) -> ServiceResult<()> {
        self.require_field(report, "delete_object", "bucket", bucket)?;
        self.require_field(report, "delete_object", "key", key)?;

        match self.store.delete_object(bucket, key).await {
            Ok(()) => {
                self.cache.unmark_object(bucket, key);
                Ok(())
            }
            Err(e) => Err(self.remote_error(
                report,
                "delete_object",
                &e,
                &[("bucket", bucket), ("key", key)],
            )),
        }
    }

    pub async fn delete_objects(
        &self,
        report: &ErrorReport,
        bucket: &str,
        keys: &[String],
    ) -> ServiceResult<()> {
        self.require_field(report, "delete_objects", "bucket", bucket)?;

        if keys.is_empty() {
            return Err(self.record(
                report,
                ServiceError::validation("keys must be a non-empty array")
                    .with("operation", "delete_objects")
                    .with("bucket", bucket),
            ));
        }
        if keys.iter().any(|k| k.trim().is_empty()) {
            return Err(self.record(
                report,
                ServiceError::validation("keys must not contain empty entries")
                    .with("operation", "delete_objects")
                    .with("bucket", bucket),
            ));
        }

        match self.store.delete_objects(bucket, keys).await {
            Ok(()) => {
                for key in keys {
                    self.cache.unmark_object(bucket, key);
                }
                Ok(())
            }
            Err(e) => {
                Err(self.remote_error(report, "delete_objects", &e, &[("bucket", bucket)]))
            }
        }
    }

    pub async fn list_objects(
        &self,
        report: &ErrorReport,
        bucket: &str,
        prefix: Option<&str>,
    ) -> ServiceResult<Vec<ObjectSummary>> {
        self.require_field(report, "list_objects", "bucket", bucket)?;

        let prefix = prefix.unwrap_or("");
        match self.store.list_objects(bucket, prefix).await {
            Ok(objects) => Ok(objects),
            Err(e) => Err(self.remote_error(
                report,
                "list_objects",
                &e,
                &[("bucket", bucket), ("prefix", prefix)],
            )),
        }
    }

    pub async fn copy_object(
        &self,
        report: &ErrorReport,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> ServiceResult<()> {
        self.require_field(report, "copy_object", "sourceBucket", source_bucket)?;
        self.require_field(report, "copy_object", "sourceKey", source_key)?;
        self.require_field(report, "copy_object", "destBucket", dest_bucket)?;
        self.require_field(report, "copy_object", "destKey", dest_key)?;

        match self
            .store
            .copy_object(source_bucket, source_key, dest_bucket, dest_key)
            .await
        {
            Ok(()) => {
                self.cache.mark_object(dest_bucket, dest_key, true);
                Ok(())
            }
            Err(e) => Err(self.remote_error(
                report,
                "copy_object",
                &e,
                &[
                    ("sourceBucket", source_bucket),
                    ("sourceKey", source_key),
                    ("destBucket", dest_bucket),
                    ("destKey", dest_key),
                ],
            )),
        }
    }

    /// Start a multipart upload; the returned id is opaque and passed through
    /// unmodified on every subsequent part/complete/abort call.
    pub async fn initiate_multipart_upload(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
    ) -> ServiceResult<String> {
        self.require_field(report, "initiate_multipart_upload", "bucket", bucket)?;
        self.require_field(report, "initiate_multipart_upload", "key", key)?;

        match self.store.create_multipart_upload(bucket, key).await {
            Ok(upload_id) => Ok(upload_id),
            Err(e) => Err(self.remote_error(
                report,
                "initiate_multipart_upload",
                &e,
                &[("bucket", bucket), ("key", key)],
            )),
        }
    }

    pub async fn upload_part(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        body: Bytes,
    ) -> ServiceResult<PartTag> {
        self.require_field(report, "upload_part", "bucket", bucket)?;
        self.require_field(report, "upload_part", "key", key)?;
        self.require_field(report, "upload_part", "uploadId", upload_id)?;

        if part_number < 1 {
            return Err(self.record(
                report,
                ServiceError::validation("partNumber must be a positive integer")
                    .with("operation", "upload_part")
                    .with("partNumber", part_number.to_string()),
            ));
        }

        match self
            .store
            .upload_part(bucket, key, upload_id, part_number, body)
            .await
        {
            Ok(etag) => Ok(PartTag { etag, part_number }),
            Err(e) => Err(self.remote_error(
                report,
                "upload_part",
                &e,
                &[("bucket", bucket), ("key", key), ("uploadId", upload_id)],
            )),
        }
    }

    /// Complete a multipart upload from the full ordered part list. Part
    /// contiguity and completeness are the backend's responsibility.
    pub async fn complete_multipart_upload(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[PartTag],
    ) -> ServiceResult<()> {
        self.require_field(report, "complete_multipart_upload", "bucket", bucket)?;
        self.require_field(report, "complete_multipart_upload", "key", key)?;
        self.require_field(report, "complete_multipart_upload", "uploadId", upload_id)?;

        if parts.is_empty() {
            return Err(self.record(
                report,
                ServiceError::validation("parts must be a non-empty array")
                    .with("operation", "complete_multipart_upload")
                    .with("bucket", bucket)
                    .with("key", key),
            ));
        }
        if parts
            .iter()
            .any(|p| p.part_number < 1 || p.etag.trim().is_empty())
        {
            return Err(self.record(
                report,
                ServiceError::validation(
                    "parts must contain positive part numbers and non-empty ETags",
                )
                .with("operation", "complete_multipart_upload")
                .with("bucket", bucket)
                .with("key", key),
            ));
        }

        match self
            .store
            .complete_multipart_upload(bucket, key, upload_id, parts)
            .await
        {
            Ok(()) => {
                self.cache.mark_object(bucket, key, true);
                Ok(())
            }
            Err(e) => Err(self.remote_error(
                report,
                "complete_multipart_upload",
                &e,
                &[("bucket", bucket), ("key", key), ("uploadId", upload_id)],
            )),
        }
    }

    pub async fn abort_multipart_upload(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> ServiceResult<()> {
        self.require_field(report, "abort_multipart_upload", "bucket", bucket)?;
        self.require_field(report, "abort_multipart_upload", "key", key)?;
        self.require_field(report, "abort_multipart_upload", "uploadId", upload_id)?;

        match self
            .store
            .abort_multipart_upload(bucket, key, upload_id)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => Err(self.remote_error(
                report,
                "abort_multipart_upload",
                &e,
                &[("bucket", bucket), ("key", key), ("uploadId", upload_id)],
            )),
        }
    }

    /// Generate a presigned URL for retrieval (`getObject`, the default) or
    /// upload (`putObject`). Any other operation is rejected before the
    /// backend is contacted.
    pub async fn presign_url(
        &self,
        report: &ErrorReport,
        bucket: &str,
        key: &str,
        operation: &str,
        expires_in: Option<u64>,
    ) -> ServiceResult<String> {
        self.require_field(report, "presign_url", "bucket", bucket)?;
        self.require_field(report, "presign_url", "key", key)?;

        if expires_in == Some(0) {
            return Err(self.record(
                report,
                ServiceError::validation("expires_in must be a positive integer")
                    .with("operation", "presign_url"),
            ));
        }
        let expires = Duration::from_secs(expires_in.unwrap_or(self.presign_expiry.as_secs()));

        let result = match operation {
            PRESIGN_OP_GET => self.store.presign_get(bucket, key, expires).await,
            PRESIGN_OP_PUT => self.store.presign_put(bucket, key, expires).await,
            other => {
                return Err(self.record(
                    report,
                    ServiceError::unsupported(format!("Unsupported operation: {}", other))
                        .with("operation", other),
                ));
            }
        };

        result.map_err(|e| {
            self.remote_error(report, "presign_url", &e, &[("bucket", bucket), ("key", key)])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_helpers::MemoryObjectStore;

    fn service(store: Arc<MemoryObjectStore>) -> StorageService {
        StorageService::new(store, 64, Duration::from_secs(900))
    }

    #[tokio::test]
    async fn test_create_bucket_primes_cache() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        svc.create_bucket(&report, "media").await.expect("create");
        assert_eq!(store.remote_calls(), 1);

        // Existence now answers from the cache without a remote round trip.
        let exists = svc.bucket_exists(&report, "media").await.expect("exists");
        assert!(exists);
        assert_eq!(store.remote_calls(), 1);
        assert!(!report.has_errors());
    }

    #[tokio::test]
    async fn test_delete_bucket_invalidates_cache() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        svc.create_bucket(&report, "media").await.expect("create");
        svc.delete_bucket(&report, "media").await.expect("delete");
        let calls_before = store.remote_calls();

        // The stale true entry is gone; the next check must go remote.
        let exists = svc.bucket_exists(&report, "media").await.expect("exists");
        assert!(!exists);
        assert_eq!(store.remote_calls(), calls_before + 1);
    }

    #[tokio::test]
    async fn test_not_found_is_cached_as_false() {
        let store = Arc::new(MemoryObjectStore::new());
        store.insert_bucket("media");
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let exists = svc
            .object_exists(&report, "media", "missing.bin")
            .await
            .expect("exists");
        assert!(!exists);
        assert_eq!(store.remote_calls(), 1);

        // Second check answers false from the cache, no second remote call.
        let exists = svc
            .object_exists(&report, "media", "missing.bin")
            .await
            .expect("exists");
        assert!(!exists);
        assert_eq!(store.remote_calls(), 1);
    }

    #[tokio::test]
    async fn test_upload_marks_object_and_short_circuits_existence() {
        let store = Arc::new(MemoryObjectStore::new());
        store.insert_bucket("media");
        let svc = service(store.clone());
        let report = ErrorReport::new();

        svc.upload_object(&report, "media", "a.bin", Bytes::from_static(b"data"), None)
            .await
            .expect("upload");
        let calls = store.remote_calls();

        let exists = svc
            .object_exists(&report, "media", "a.bin")
            .await
            .expect("exists");
        assert!(exists);
        assert_eq!(store.remote_calls(), calls);
    }

    #[tokio::test]
    async fn test_validation_short_circuits_before_remote_call() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let err = svc
            .upload_object(&report, "", "a.bin", Bytes::from_static(b"data"), None)
            .await
            .expect_err("empty bucket must fail");

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.remote_calls(), 0);
        assert_eq!(report.len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_vs_validation_failure() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        store.set_backend_failure("connection reset");
        let err = svc
            .create_bucket(&report, "valid-name")
            .await
            .expect_err("backend failure must surface");
        assert_eq!(err.kind, ErrorKind::Remote);
        assert_eq!(store.remote_calls(), 1);

        let err = svc
            .create_bucket(&report, "")
            .await
            .expect_err("validation must fail");
        assert_eq!(err.kind, ErrorKind::Validation);
        // Validation never reached the collaborator.
        assert_eq!(store.remote_calls(), 1);
        assert_eq!(report.len(), 2);
    }

    #[tokio::test]
    async fn test_remote_failure_records_context() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        store.set_backend_failure("connection reset");
        svc.create_bucket(&report, "media")
            .await
            .expect_err("backend failure");

        let records = report.snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "create_bucket failed");
        assert_eq!(
            records[0].context.get("bucket").map(String::as_str),
            Some("media")
        );
        assert!(records[0]
            .context
            .get("error")
            .is_some_and(|e| e.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_existence_check_failure_is_not_cached() {
        let store = Arc::new(MemoryObjectStore::new());
        store.insert_bucket("media");
        let svc = service(store.clone());
        let report = ErrorReport::new();

        store.set_backend_failure("throttled");
        let err = svc
            .bucket_exists(&report, "media")
            .await
            .expect_err("remote failure");
        assert_eq!(err.kind, ErrorKind::Remote);

        // After recovery the check goes remote again instead of replaying a
        // cached failure.
        store.clear_backend_failure();
        let calls_before = store.remote_calls();
        let exists = svc.bucket_exists(&report, "media").await.expect("exists");
        assert!(exists);
        assert_eq!(store.remote_calls(), calls_before + 1);
    }

    #[tokio::test]
    async fn test_batch_delete_rejects_empty_input() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let err = svc
            .delete_objects(&report, "media", &[])
            .await
            .expect_err("empty keys must fail");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.remote_calls(), 0);
        assert_eq!(report.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_delete_unmarks_each_key() {
        let store = Arc::new(MemoryObjectStore::new());
        store.insert_bucket("media");
        store.insert_object("media", "a.bin", b"a".to_vec());
        store.insert_object("media", "b.bin", b"b".to_vec());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        // Prime the cache with both keys.
        assert!(svc.object_exists(&report, "media", "a.bin").await.expect("a"));
        assert!(svc.object_exists(&report, "media", "b.bin").await.expect("b"));

        let keys = vec!["a.bin".to_string(), "b.bin".to_string()];
        svc.delete_objects(&report, "media", &keys).await.expect("delete");

        // Entries return to unknown; the next checks go remote and see the
        // deletion.
        let calls_before = store.remote_calls();
        assert!(!svc.object_exists(&report, "media", "a.bin").await.expect("a"));
        assert!(!svc.object_exists(&report, "media", "b.bin").await.expect("b"));
        assert_eq!(store.remote_calls(), calls_before + 2);
    }

    #[tokio::test]
    async fn test_list_buckets_marks_every_returned_bucket() {
        let store = Arc::new(MemoryObjectStore::new());
        store.insert_bucket("alpha");
        store.insert_bucket("beta");
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let buckets = svc.list_buckets(&report).await.expect("list");
        assert_eq!(buckets.len(), 2);
        let calls = store.remote_calls();

        assert!(svc.bucket_exists(&report, "alpha").await.expect("alpha"));
        assert!(svc.bucket_exists(&report, "beta").await.expect("beta"));
        assert_eq!(store.remote_calls(), calls);
    }

    #[tokio::test]
    async fn test_copy_marks_destination() {
        let store = Arc::new(MemoryObjectStore::new());
        store.insert_bucket("src");
        store.insert_bucket("dst");
        store.insert_object("src", "a.bin", b"payload".to_vec());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        svc.copy_object(&report, "src", "a.bin", "dst", "b.bin")
            .await
            .expect("copy");
        let calls = store.remote_calls();

        assert!(svc.object_exists(&report, "dst", "b.bin").await.expect("exists"));
        assert_eq!(store.remote_calls(), calls);
        assert_eq!(store.object_data("dst", "b.bin"), Some(b"payload".to_vec()));
    }

    #[tokio::test]
    async fn test_fetch_object_distinguishes_not_found() {
        let store = Arc::new(MemoryObjectStore::new());
        store.insert_bucket("media");
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let err = svc
            .fetch_object(&report, "media", "missing.bin")
            .await
            .expect_err("missing object");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.contains("missing.bin"));

        store.insert_object("media", "a.bin", b"data".to_vec());
        let bytes = svc.fetch_object(&report, "media", "a.bin").await.expect("fetch");
        assert_eq!(&bytes[..], b"data");
    }

    #[tokio::test]
    async fn test_multipart_round_trip_marks_object() {
        let store = Arc::new(MemoryObjectStore::new());
        store.insert_bucket("media");
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let upload_id = svc
            .initiate_multipart_upload(&report, "media", "big.bin")
            .await
            .expect("initiate");

        let part1 = svc
            .upload_part(&report, "media", "big.bin", &upload_id, 1, Bytes::from_static(b"hello "))
            .await
            .expect("part 1");
        let part2 = svc
            .upload_part(&report, "media", "big.bin", &upload_id, 2, Bytes::from_static(b"world"))
            .await
            .expect("part 2");
        assert_eq!(part1.part_number, 1);
        assert_eq!(part2.part_number, 2);

        svc.complete_multipart_upload(&report, "media", "big.bin", &upload_id, &[part1, part2])
            .await
            .expect("complete");

        assert_eq!(store.object_data("media", "big.bin"), Some(b"hello world".to_vec()));

        // Completion marks the assembled object as existing.
        let calls = store.remote_calls();
        assert!(svc.object_exists(&report, "media", "big.bin").await.expect("exists"));
        assert_eq!(store.remote_calls(), calls);
    }

    #[tokio::test]
    async fn test_upload_part_rejects_non_positive_part_number() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let err = svc
            .upload_part(&report, "media", "big.bin", "upload-1", 0, Bytes::new())
            .await
            .expect_err("part number 0 must fail");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.remote_calls(), 0);
    }

    #[tokio::test]
    async fn test_complete_multipart_rejects_empty_parts() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let err = svc
            .complete_multipart_upload(&report, "media", "big.bin", "upload-1", &[])
            .await
            .expect_err("empty parts must fail");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.remote_calls(), 0);
    }

    #[tokio::test]
    async fn test_presign_rejects_unsupported_operation() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let err = svc
            .presign_url(&report, "media", "a.bin", "deleteObject", None)
            .await
            .expect_err("unsupported op must fail");
        assert_eq!(err.kind, ErrorKind::Unsupported);
        assert!(err.message.contains("deleteObject"));
        assert_eq!(store.remote_calls(), 0);
        assert_eq!(report.len(), 1);
    }

    #[tokio::test]
    async fn test_presign_default_and_explicit_expiry() {
        let store = Arc::new(MemoryObjectStore::new());
        let svc = service(store.clone());
        let report = ErrorReport::new();

        let url = svc
            .presign_url(&report, "media", "a.bin", PRESIGN_OP_GET, None)
            .await
            .expect("presign get");
        assert!(url.contains("expires=900"));

        let url = svc
            .presign_url(&report, "media", "a.bin", PRESIGN_OP_PUT, Some(60))
            .await
            .expect("presign put");
        assert!(url.contains("/put/"));
        assert!(url.contains("expires=60"));
    }
}
