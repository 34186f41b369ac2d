//! Multipart upload orchestration handlers.
//!
//! The upload-id is opaque and passed through unmodified; part payloads arrive
//! base64-encoded in JSON bodies. Part ordering and completeness are the
//! storage backend's responsibility.

use crate::error::{ApiError, ErrorResponse, ValidatedJson};
use crate::handlers::MessageResponse;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use cubby_storage::{ErrorReport, PartTag, ServiceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct InitiateRequest {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InitiateResponse {
    #[serde(rename = "uploadId")]
    pub upload_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadPartRequest {
    pub bucket: String,
    pub key: String,
    #[serde(rename = "uploadId")]
    pub upload_id: String,
    #[serde(rename = "partNumber")]
    pub part_number: i32,
    #[serde(rename = "bodyBase64")]
    pub body_base64: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadPartResponse {
    #[serde(rename = "ETag")]
    pub etag: String,
    #[serde(rename = "PartNumber")]
    pub part_number: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteRequest {
    pub bucket: String,
    pub key: String,
    #[serde(rename = "uploadId")]
    pub upload_id: String,
    #[schema(value_type = Vec<Object>)]
    pub parts: Vec<PartTag>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AbortRequest {
    pub bucket: String,
    pub key: String,
    #[serde(rename = "uploadId")]
    pub upload_id: String,
}

/// Start a multipart upload
#[utoipa::path(
    post,
    path = "/multipart/initiate",
    tag = "multipart",
    request_body = InitiateRequest,
    responses(
        (status = 200, description = "Upload session created", body = InitiateResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn initiate_multipart_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<InitiateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    let upload_id = state
        .service
        .initiate_multipart_upload(&report, &request.bucket, &request.key)
        .await
        .map_err(|e| ApiError::failure("Failed to initiate multipart upload", e, &report))?;

    Ok(Json(InitiateResponse { upload_id }))
}

/// Upload one part of a multipart upload
#[utoipa::path(
    post,
    path = "/multipart/upload-part",
    tag = "multipart",
    request_body = UploadPartRequest,
    responses(
        (status = 200, description = "Part uploaded", body = UploadPartResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_part(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UploadPartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    let body = BASE64.decode(&request.body_base64).map_err(|e| {
        let err = ServiceError::validation(format!("bodyBase64 is not valid base64: {}", e))
            .with("bucket", &request.bucket)
            .with("key", &request.key);
        report.add(err.to_record());
        ApiError::failure("Failed to upload part", err, &report)
    })?;

    let tag = state
        .service
        .upload_part(
            &report,
            &request.bucket,
            &request.key,
            &request.upload_id,
            request.part_number,
            Bytes::from(body),
        )
        .await
        .map_err(|e| ApiError::failure("Failed to upload part", e, &report))?;

    let PartTag { etag, part_number } = tag;
    Ok(Json(UploadPartResponse { etag, part_number }))
}

/// Complete a multipart upload from the full ordered part list
#[utoipa::path(
    post,
    path = "/multipart/complete",
    tag = "multipart",
    request_body = CompleteRequest,
    responses(
        (status = 200, description = "Multipart upload completed", body = MessageResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn complete_multipart_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CompleteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    state
        .service
        .complete_multipart_upload(
            &report,
            &request.bucket,
            &request.key,
            &request.upload_id,
            &request.parts,
        )
        .await
        .map_err(|e| ApiError::failure("Failed to complete multipart upload", e, &report))?;

    Ok(Json(MessageResponse::new(
        "Multipart upload completed successfully",
    )))
}

/// Abort a multipart upload
#[utoipa::path(
    post,
    path = "/multipart/abort",
    tag = "multipart",
    request_body = AbortRequest,
    responses(
        (status = 200, description = "Multipart upload aborted", body = MessageResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn abort_multipart_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<AbortRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    state
        .service
        .abort_multipart_upload(&report, &request.bucket, &request.key, &request.upload_id)
        .await
        .map_err(|e| ApiError::failure("Failed to abort multipart upload", e, &report))?;

    Ok(Json(MessageResponse::new(format!(
        "Multipart upload aborted for \"{}/{}\"",
        request.bucket, request.key
    ))))
}
