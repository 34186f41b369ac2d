//! Application state.
//!
//! The storage service (client + cache) is constructed once at startup and
//! shared by every handler; error reports are per-request and never live here.

use cubby_core::Config;
use cubby_storage::StorageService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StorageService>,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
