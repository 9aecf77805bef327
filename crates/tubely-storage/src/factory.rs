use crate::{LocalStorage, S3Storage, Storage, StorageResult};
use std::sync::Arc;
use tubely_core::Config;

/// Local asset store for thumbnails
pub async fn create_asset_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.assets_root, config.assets_base_url.clone()).await?;
    tracing::info!(
        root = %config.assets_root.display(),
        base_url = %config.assets_base_url,
        "Asset storage ready"
    );
    Ok(Arc::new(storage))
}

/// S3 object store for videos
pub fn create_object_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = S3Storage::new(
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
    )?;
    tracing::info!(
        bucket = %config.s3_bucket,
        region = %config.s3_region,
        endpoint = ?config.s3_endpoint,
        "Object storage ready"
    );
    Ok(Arc::new(storage))
}
