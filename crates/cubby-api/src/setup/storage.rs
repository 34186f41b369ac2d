//! Storage setup and initialization
//!
//! The S3 client is constructed once, before the router exists; handlers share
//! the resulting service. There is no lazy initialization on first use.

use anyhow::Result;
use cubby_core::Config;
use cubby_storage::{S3ObjectStore, StorageService};
use std::sync::Arc;
use std::time::Duration;

pub async fn setup_storage(config: &Config) -> Result<Arc<StorageService>> {
    tracing::info!(region = %config.aws_region, "Initializing storage client...");

    let store = S3ObjectStore::new(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build S3 client: {}", e))?;

    tracing::info!(
        endpoint = config.s3_endpoint.as_deref().unwrap_or("aws"),
        cache_capacity = config.existence_cache_capacity,
        "Storage client initialized successfully"
    );

    Ok(Arc::new(StorageService::new(
        Arc::new(store),
        config.existence_cache_capacity,
        Duration::from_secs(config.presign_expiry_secs),
    )))
}
