//! Storage setup

use anyhow::{Context, Result};
use carelog_core::Config;
use carelog_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Setup local filesystem storage for uploaded documents
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.upload_dir.clone(), config.upload_base_url.clone())
        .await
        .context("Failed to initialize upload storage")?;

    tracing::info!(
        upload_dir = %config.upload_dir,
        base_url = %config.upload_base_url,
        "Local storage initialized"
    );

    Ok(Arc::new(storage))
}
