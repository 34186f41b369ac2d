//! Object lifecycle handlers: upload, existence, fetch, delete, list, copy.

use crate::error::{ApiError, ErrorResponse, ValidatedJson};
use crate::handlers::{ExistsResponse, MessageResponse};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use cubby_core::ErrorMetadata;
use cubby_storage::{ErrorReport, ObjectSummary, ServiceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct ObjectQuery {
    pub bucket: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ObjectRequest {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchDeleteRequest {
    pub bucket: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub bucket: Option<String>,
    pub prefix: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyRequest {
    pub source_bucket: String,
    pub source_key: String,
    pub dest_bucket: String,
    pub dest_key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileListResponse {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub files: Vec<ObjectSummary>,
}

/// Upload a file from a multipart form (`bucket`, `key`, `file` fields)
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = MessageResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    let mut bucket = String::new();
    let mut key = String::new();
    let mut file: Option<(Bytes, Option<String>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bare(
            "Upload failed",
            ServiceError::validation(format!("Invalid multipart form: {}", e)),
        )
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("bucket") => {
                bucket = field.text().await.map_err(|e| {
                    ApiError::bare(
                        "Upload failed",
                        ServiceError::validation(format!("Invalid bucket field: {}", e)),
                    )
                })?;
            }
            Some("key") => {
                key = field.text().await.map_err(|e| {
                    ApiError::bare(
                        "Upload failed",
                        ServiceError::validation(format!("Invalid key field: {}", e)),
                    )
                })?;
            }
            Some("file") => {
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await.map_err(|e| {
                    ApiError::bare(
                        "Upload failed",
                        ServiceError::validation(format!("Invalid file field: {}", e)),
                    )
                })?;
                file = Some((data, content_type));
            }
            _ => {}
        }
    }

    let Some((data, content_type)) = file else {
        let err = ServiceError::validation("file is a required form field")
            .with("bucket", &bucket)
            .with("key", &key);
        report.add(err.to_record());
        return Err(ApiError::failure("Upload failed", err, &report));
    };

    state
        .service
        .upload_object(&report, &bucket, &key, data, content_type.as_deref())
        .await
        .map_err(|e| ApiError::failure("Upload failed", e, &report))?;

    Ok(Json(MessageResponse::new("File uploaded successfully")))
}

/// Check whether a file exists
#[utoipa::path(
    get,
    path = "/file/exists",
    tag = "files",
    params(
        ("bucket" = String, Query, description = "Bucket name"),
        ("key" = String, Query, description = "Object key")
    ),
    responses(
        (status = 200, description = "Existence answer", body = ExistsResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn file_exists(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ObjectQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();
    let bucket = query.bucket.as_deref().unwrap_or("");
    let key = query.key.as_deref().unwrap_or("");

    let exists = state
        .service
        .object_exists(&report, bucket, key)
        .await
        .map_err(|e| ApiError::failure("File existence check failed", e, &report))?;

    Ok(Json(ExistsResponse {
        success: true,
        exists,
    }))
}

/// Download a file
#[utoipa::path(
    get,
    path = "/file",
    tag = "files",
    params(
        ("bucket" = String, Query, description = "Bucket name"),
        ("key" = String, Query, description = "Object key")
    ),
    responses(
        (status = 200, description = "Object bytes"),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ObjectQuery>,
) -> Result<Response, ApiError> {
    let report = ErrorReport::new();
    let bucket = query.bucket.as_deref().unwrap_or("");
    let key = query.key.as_deref().unwrap_or("");

    let bytes = state
        .service
        .fetch_object(&report, bucket, key)
        .await
        .map_err(|e| {
            let summary = e.client_message();
            ApiError::failure(summary, e, &report)
        })?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    )
        .into_response())
}

/// Delete a file
#[utoipa::path(
    delete,
    path = "/file",
    tag = "files",
    request_body = ObjectRequest,
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ObjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    state
        .service
        .delete_object(&report, &request.bucket, &request.key)
        .await
        .map_err(|e| ApiError::failure("Failed to delete file", e, &report))?;

    Ok(Json(MessageResponse::new("File deleted")))
}

/// Delete multiple files
#[utoipa::path(
    delete,
    path = "/files",
    tag = "files",
    request_body = BatchDeleteRequest,
    responses(
        (status = 200, description = "Files deleted", body = MessageResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_files(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<BatchDeleteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    state
        .service
        .delete_objects(&report, &request.bucket, &request.keys)
        .await
        .map_err(|e| ApiError::failure("Failed to delete files", e, &report))?;

    Ok(Json(MessageResponse::new("Files deleted successfully")))
}

/// List files, optionally filtered by prefix
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    params(
        ("bucket" = String, Query, description = "Bucket name"),
        ("prefix" = Option<String>, Query, description = "Key prefix filter")
    ),
    responses(
        (status = 200, description = "Objects in the bucket", body = FileListResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();
    let bucket = query.bucket.as_deref().unwrap_or("");

    let files = state
        .service
        .list_objects(&report, bucket, query.prefix.as_deref())
        .await
        .map_err(|e| ApiError::failure("Failed to list files", e, &report))?;

    Ok(Json(FileListResponse {
        success: true,
        files,
    }))
}

/// Copy a file from one bucket/key to another
#[utoipa::path(
    post,
    path = "/file/copy",
    tag = "files",
    request_body = CopyRequest,
    responses(
        (status = 200, description = "File copied", body = MessageResponse),
        (status = 400, description = "Invalid input or storage failure", body = ErrorResponse)
    )
)]
pub async fn copy_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CopyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();

    state
        .service
        .copy_object(
            &report,
            &request.source_bucket,
            &request.source_key,
            &request.dest_bucket,
            &request.dest_key,
        )
        .await
        .map_err(|e| ApiError::failure("Failed to copy file", e, &report))?;

    Ok(Json(MessageResponse::new(format!(
        "File copied from \"{}/{}\" to \"{}/{}\"",
        request.source_bucket, request.source_key, request.dest_bucket, request.dest_key
    ))))
}
