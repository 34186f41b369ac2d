//! Presigned URL handler.

use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use cubby_storage::service::PRESIGN_OP_GET;
use cubby_storage::ErrorReport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct PresignQuery {
    pub bucket: Option<String>,
    pub key: Option<String>,
    /// Operation kind: "getObject" (default) or "putObject".
    pub op: Option<String>,
    /// Expiry in seconds; the configured default applies when omitted.
    pub expires_in: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PresignResponse {
    pub success: bool,
    pub url: String,
}

/// Generate a presigned URL for retrieval or upload
#[utoipa::path(
    get,
    path = "/presign",
    tag = "presign",
    params(
        ("bucket" = String, Query, description = "Bucket name"),
        ("key" = String, Query, description = "Object key"),
        ("op" = Option<String>, Query, description = "Operation: getObject (default) or putObject"),
        ("expires_in" = Option<u64>, Query, description = "Expiry in seconds")
    ),
    responses(
        (status = 200, description = "Presigned URL", body = PresignResponse),
        (status = 400, description = "Invalid input, unsupported operation, or storage failure", body = ErrorResponse)
    )
)]
pub async fn presign(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PresignQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = ErrorReport::new();
    let bucket = query.bucket.as_deref().unwrap_or("");
    let key = query.key.as_deref().unwrap_or("");
    let op = query.op.as_deref().unwrap_or(PRESIGN_OP_GET);

    let url = state
        .service
        .presign_url(&report, bucket, key, op, query.expires_in)
        .await
        .map_err(|e| ApiError::failure("Failed to generate presigned URL", e, &report))?;

    Ok(Json(PresignResponse { success: true, url }))
}
