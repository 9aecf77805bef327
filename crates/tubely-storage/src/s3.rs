use crate::traits::{check_key, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::buffered::BufWriter;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// Credentials come from the standard AWS environment variables.
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::from_store(Arc::new(store), bucket, region, endpoint_url))
    }

    /// Wrap an already-built object store (e.g. `InMemory` in tests)
    pub fn from_store(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> Self {
        S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        }
    }

    fn content_type_attributes(content_type: &str) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        attributes
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        check_key(storage_key)?;
        let size = data.len() as u64;
        let location = ObjectPath::from(storage_key);

        let mut opts = PutOptions::default();
        opts.attributes = Self::content_type_attributes(content_type);

        let start = std::time::Instant::now();

        self.store
            .put_opts(&location, PutPayload::from(data), opts)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn upload_file(
        &self,
        storage_key: &str,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<String> {
        check_key(storage_key)?;
        let location = ObjectPath::from(storage_key);
        let start = std::time::Instant::now();

        let mut file = tokio::fs::File::open(source).await?;
        // Buffers small files into a single PUT, switches to multipart for large ones
        let mut writer = BufWriter::new(self.store.clone(), location)
            .with_attributes(Self::content_type_attributes(content_type));

        let copied = match tokio::io::copy(&mut file, &mut writer).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(abort_err) = writer.abort().await {
                    tracing::warn!(error = %abort_err, key = %storage_key, "Failed to abort S3 upload");
                }
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    "S3 streaming upload failed"
                );
                return Err(StorageError::UploadFailed(e.to_string()));
            }
        };

        writer.shutdown().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = copied,
                "S3 upload completion failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = copied,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 file upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses path-style: {endpoint}/{bucket}/{key}
    fn public_url(&self, storage_key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, storage_key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, storage_key
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;
    use object_store::ObjectStoreExt;

    fn in_memory() -> (Arc<InMemory>, S3Storage) {
        let store = Arc::new(InMemory::new());
        let storage = S3Storage::from_store(
            store.clone(),
            "tubely-videos".to_string(),
            "us-east-2".to_string(),
            None,
        );
        (store, storage)
    }

    #[test]
    fn test_public_url_aws() {
        let (_, storage) = in_memory();
        assert_eq!(
            storage.public_url("landscape/abc.mp4"),
            "https://tubely-videos.s3.us-east-2.amazonaws.com/landscape/abc.mp4"
        );
    }

    #[test]
    fn test_public_url_custom_endpoint() {
        let storage = S3Storage::from_store(
            Arc::new(InMemory::new()),
            "tubely".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000/".to_string()),
        );
        assert_eq!(
            storage.public_url("other/x.mp4"),
            "http://localhost:9000/tubely/other/x.mp4"
        );
    }

    #[tokio::test]
    async fn test_upload_with_key_sets_content_type() {
        let (store, storage) = in_memory();
        storage
            .upload_with_key("portrait/a.mp4", Bytes::from_static(b"abc"), "video/mp4")
            .await
            .unwrap();

        let result = store.get(&ObjectPath::from("portrait/a.mp4")).await.unwrap();
        assert_eq!(
            result
                .attributes
                .get(&Attribute::ContentType)
                .map(|v| AsRef::<str>::as_ref(v)),
            Some("video/mp4")
        );
        assert_eq!(result.bytes().await.unwrap().as_ref(), b"abc");
    }

    #[tokio::test]
    async fn test_upload_file_streams_contents() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("prepared.mp4");
        std::fs::write(&source, vec![7u8; 64 * 1024]).unwrap();

        let (store, storage) = in_memory();
        let url = storage
            .upload_file("landscape/b.mp4", &source, "video/mp4")
            .await
            .unwrap();

        assert!(url.ends_with("/landscape/b.mp4"));
        let bytes = store
            .get(&ObjectPath::from("landscape/b.mp4"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(bytes.len(), 64 * 1024);
    }

    #[tokio::test]
    async fn test_upload_file_missing_source() {
        let (_, storage) = in_memory();
        let result = storage
            .upload_file("other/c.mp4", Path::new("/nonexistent/c.mp4"), "video/mp4")
            .await;
        assert!(matches!(result, Err(StorageError::IoError(_))));
    }
}
