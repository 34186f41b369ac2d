//! Request handlers, grouped by domain.

pub mod buckets;
pub mod multipart;
pub mod objects;
pub mod presign;

use serde::Serialize;
use utoipa::ToSchema;

/// Standard success envelope for mutating operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            success: true,
            message: message.into(),
        }
    }
}

/// Success envelope for existence checks.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExistsResponse {
    pub success: bool,
    pub exists: bool,
}
