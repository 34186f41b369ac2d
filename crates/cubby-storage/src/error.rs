//! Typed operation errors
//!
//! Operations return a single `Result` whose error carries a kind, message,
//! and context map. The kind drives HTTP status mapping at the boundary; the
//! context becomes the error record appended to the request's report.

use crate::report::ErrorRecord;
use cubby_core::{ErrorMetadata, LogLevel};
use std::collections::BTreeMap;

/// Failure classification for gateway operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input; raised before any remote call.
    Validation,
    /// The storage collaborator reported a failure.
    Remote,
    /// The requested object does not exist.
    NotFound,
    /// The requested operation kind is not supported.
    Unsupported,
    /// Anything escaping the above.
    Internal,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl ServiceError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ServiceError {
            kind,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Remote, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attach a context entry (builder style).
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    /// The record form appended to the request's error report.
    pub fn to_record(&self) -> ErrorRecord {
        ErrorRecord::new(self.message.clone(), self.context.clone())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ErrorMetadata for ServiceError {
    fn http_status_code(&self) -> u16 {
        match self.kind {
            ErrorKind::Validation | ErrorKind::Unsupported | ErrorKind::Remote => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self.kind {
            ErrorKind::Validation => "INVALID_INPUT",
            ErrorKind::Remote => "STORAGE_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Unsupported => "UNSUPPORTED_OPERATION",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self.kind {
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.message.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self.kind {
            ErrorKind::Validation | ErrorKind::Unsupported | ErrorKind::NotFound => LogLevel::Debug,
            ErrorKind::Remote | ErrorKind::Internal => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_drives_status_code() {
        assert_eq!(ServiceError::validation("bad").http_status_code(), 400);
        assert_eq!(ServiceError::remote("down").http_status_code(), 400);
        assert_eq!(ServiceError::not_found("gone").http_status_code(), 404);
        assert_eq!(ServiceError::unsupported("nope").http_status_code(), 400);
        assert_eq!(ServiceError::internal("bug").http_status_code(), 500);
    }

    #[test]
    fn test_internal_message_is_masked() {
        let err = ServiceError::internal("stack details");
        assert_eq!(err.client_message(), "Internal server error");

        let err = ServiceError::validation("bucket is required");
        assert_eq!(err.client_message(), "bucket is required");
    }

    #[test]
    fn test_record_carries_context() {
        let err = ServiceError::remote("createBucket failed")
            .with("bucket", "media")
            .with("error", "timeout");
        let record = err.to_record();
        assert_eq!(record.message, "createBucket failed");
        assert_eq!(record.context.get("bucket").map(String::as_str), Some("media"));
        assert_eq!(record.context.get("error").map(String::as_str), Some("timeout"));
    }
}
