//! Application initialization: storage client, state, and routes.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use axum::Router;
use cubby_core::Config;
use std::sync::Arc;

/// Build the storage service and router from configuration.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let service = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        service,
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
