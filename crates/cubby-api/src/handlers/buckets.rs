//! Bucket lifecycle handlers.

use crate::error::{ApiError, ErrorResponse, ValidatedJson};
use crate::handlers::{ExistsResponse, MessageResponse};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use cubby_storage::{BucketSummary, ErrorReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BucketRequest {
    pub bucket: String,
}

#[derive(Debug, Deserialize)]
pub struct BucketQuery {
    pub bucket: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BucketListResponse {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub buckets: Vec<BucketSummary>,
}

/// Create a bucket
#[utoipa::path(
    post,
    path = "/bucket",
    tag = "buckets",
    request_body = BucketRequest,
    responses(
        (status = 200, description = "Bucket created", body = MessageResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn create_bucket(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<BucketRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    state
        .service
        .create_bucket(&report, &request.bucket)
        .await
        .map_err(|e| ApiError::failure("Bucket creation failed", e, &report))?;

    Ok(Json(MessageResponse::new("Bucket created")))
}

/// List all buckets
#[utoipa::path(
    get,
    path = "/buckets",
    tag = "buckets",
    responses(
        (status = 200, description = "Buckets fetched successfully", body = BucketListResponse),
        (status = 400, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_buckets(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    let buckets = state
        .service
        .list_buckets(&report)
        .await
        .map_err(|e| ApiError::failure("Failed to list buckets", e, &report))?;

    Ok(Json(BucketListResponse {
        success: true,
        buckets,
    }))
}

/// Check whether a bucket exists
#[utoipa::path(
    get,
    path = "/bucket/exists",
    tag = "buckets",
    params(("bucket" = String, Query, description = "Bucket name")),
    responses(
        (status = 200, description = "Existence answer", body = ExistsResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn bucket_exists(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BucketQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();
    let bucket = query.bucket.as_deref().unwrap_or("");

    let exists = state
        .service
        .bucket_exists(&report, bucket)
        .await
        .map_err(|e| ApiError::failure("Bucket existence check failed", e, &report))?;

    Ok(Json(ExistsResponse {
        success: true,
        exists,
    }))
}

/// Delete a bucket
#[utoipa::path(
    delete,
    path = "/bucket",
    tag = "buckets",
    request_body = BucketRequest,
    responses(
        (status = 200, description = "Bucket deleted", body = MessageResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_bucket(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<BucketRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    state
        .service
        .delete_bucket(&report, &request.bucket)
        .await
        .map_err(|e| ApiError::failure("Bucket deletion failed", e, &report))?;

    Ok(Json(MessageResponse::new("Bucket deleted")))
}
