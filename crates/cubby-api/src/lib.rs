//! Cubby API
//!
//! HTTP surface of the gateway: axum handlers that forward bucket/object
//! lifecycle requests to the storage service, with consistent success/error
//! response shapes and OpenAPI documentation.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;
