//! HTTP error response conversion
//!
//! Every failure renders as `{success: false, message, errors?}` where
//! `errors` is the request report's snapshot at failure time. The status code
//! comes from the typed error's [`ErrorMetadata`]: 400 for validation,
//! unsupported presign operations, and collaborator-reported failures, 404 for
//! a missing object on fetch, 500 for anything unexpected.
//!
//! **Handler pattern:** build one `ErrorReport` per request, pass it into the
//! storage service, and `map_err` failures into [`ApiError::failure`] with the
//! endpoint's summary message.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cubby_core::{ErrorMetadata, LogLevel};
use cubby_storage::{ErrorRecord, ErrorReport, ServiceError};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    /// Ordered error records collected while handling the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub errors: Option<Vec<ErrorRecord>>,
}

/// A failed request: endpoint-level summary, the typed error that stopped the
/// operation, and the report's records for the response body.
#[derive(Debug)]
pub struct ApiError {
    summary: String,
    error: ServiceError,
    records: Vec<ErrorRecord>,
}

impl ApiError {
    /// Failure carrying the request report's snapshot.
    pub fn failure(summary: impl Into<String>, error: ServiceError, report: &ErrorReport) -> Self {
        ApiError {
            summary: summary.into(),
            error,
            records: report.snapshot(),
        }
    }

    /// Failure raised before an operation ran (no report in scope yet); the
    /// error's own record stands in for the snapshot.
    pub fn bare(summary: impl Into<String>, error: ServiceError) -> Self {
        let records = vec![error.to_record()];
        ApiError {
            summary: summary.into(),
            error,
            records,
        }
    }
}

/// Convert JSON body deserialization failures into a 400 with the standard
/// error shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let error =
            ServiceError::validation(format!("Invalid request body: {}", rejection.body_text()));
        ApiError::bare("Invalid request body", error)
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on
/// deserialization failure. Use this instead of `Json<T>` so invalid bodies
/// share the API error shape.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(ApiError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &ServiceError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = code, "Request failed");
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_error(&self.error);

        let status = StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let errors = if self.records.is_empty() {
            None
        } else {
            Some(self.records)
        };

        let body = Json(ErrorResponse {
            success: false,
            message: self.summary,
            errors,
        });

        (status, body).into_response()
    }
}
