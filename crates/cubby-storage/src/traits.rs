//! Storage collaborator trait
//!
//! This module defines the ObjectStore trait that remote storage backends
//! implement. The gateway forwards each operation essentially 1:1; anything
//! beyond parameter marshaling (part ordering, upload-session bookkeeping,
//! bucket emptiness rules) is the backend's responsibility.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Collaborator-level errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for collaborator operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A bucket as reported by the backend's listing call.
#[derive(Debug, Clone, Serialize)]
pub struct BucketSummary {
    pub name: String,
    pub creation_date: Option<String>,
}

/// An object as reported by the backend's prefix listing.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: Option<i64>,
    pub last_modified: Option<String>,
    pub etag: Option<String>,
}

/// Identifier/number pair for one part of a multipart upload.
///
/// Serialized with the S3 wire field names so request and response bodies
/// match what SDK clients already produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartTag {
    #[serde(rename = "ETag")]
    pub etag: String,
    #[serde(rename = "PartNumber")]
    pub part_number: i32,
}

/// Storage collaborator trait
///
/// Existence checks return `Ok(false)` for a clean not-found answer; only
/// genuine backend failures surface as `Err`. `get_object` distinguishes a
/// missing key (`StoreError::NotFound`) from other failures so callers can
/// map it to a 404.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn create_bucket(&self, bucket: &str) -> StoreResult<()>;

    async fn delete_bucket(&self, bucket: &str) -> StoreResult<()>;

    async fn list_buckets(&self) -> StoreResult<Vec<BucketSummary>>;

    async fn bucket_exists(&self, bucket: &str) -> StoreResult<bool>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StoreResult<()>;

    async fn object_exists(&self, bucket: &str, key: &str) -> StoreResult<bool>;

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes>;

    async fn delete_object(&self, bucket: &str, key: &str) -> StoreResult<()>;

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> StoreResult<()>;

    async fn list_objects(&self, bucket: &str, prefix: &str) -> StoreResult<Vec<ObjectSummary>>;

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> StoreResult<()>;

    /// Start a multipart upload and return its opaque session id.
    async fn create_multipart_upload(&self, bucket: &str, key: &str) -> StoreResult<String>;

    /// Upload one part; returns the part's ETag.
    async fn upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        body: Bytes,
    ) -> StoreResult<String>;

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[PartTag],
    ) -> StoreResult<()>;

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> StoreResult<()>;

    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration)
        -> StoreResult<String>;

    async fn presign_put(&self, bucket: &str, key: &str, expires_in: Duration)
        -> StoreResult<String>;
}
