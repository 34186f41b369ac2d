//! Route configuration and setup.

use crate::handlers::{buckets, multipart, objects, presign};
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use cubby_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route(
            "/bucket",
            post(buckets::create_bucket).delete(buckets::delete_bucket),
        )
        .route("/buckets", get(buckets::list_buckets))
        .route("/bucket/exists", get(buckets::bucket_exists))
        .route("/upload", post(objects::upload_file))
        .route(
            "/file",
            get(objects::get_file).delete(objects::delete_file),
        )
        .route("/file/exists", get(objects::file_exists))
        .route(
            "/files",
            get(objects::list_files).delete(objects::delete_files),
        )
        .route("/file/copy", post(objects::copy_file))
        .route(
            "/multipart/initiate",
            post(multipart::initiate_multipart_upload),
        )
        .route("/multipart/upload-part", post(multipart::upload_part))
        .route(
            "/multipart/complete",
            post(multipart::complete_multipart_upload),
        )
        .route("/multipart/abort", post(multipart::abort_multipart_upload))
        .route("/presign", get(presign::presign))
        .route("/health", get(health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
