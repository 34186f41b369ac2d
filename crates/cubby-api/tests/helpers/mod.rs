//! Test helpers: build the app router over an in-memory object store.
//!
//! Run from workspace root: `cargo test -p cubby-api`.

use axum_test::TestServer;
use cubby_api::setup::routes;
use cubby_api::state::AppState;
use cubby_core::Config;
use cubby_storage::test_helpers::MemoryObjectStore;
use cubby_storage::StorageService;
use std::sync::Arc;
use std::time::Duration;

/// Test application: server plus a handle on the mock store for seeding and
/// call-count assertions.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryObjectStore>,
}

pub async fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryObjectStore::new());
    let config = Config::default();

    let service = Arc::new(StorageService::new(
        store.clone(),
        config.existence_cache_capacity,
        Duration::from_secs(config.presign_expiry_secs),
    ));

    let state = Arc::new(AppState {
        service,
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");

    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp { server, store }
}
