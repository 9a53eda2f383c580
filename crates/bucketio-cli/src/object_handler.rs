//! Object storage handler for bucketio-cli
//!
//! Resolves object URLs to adapters over a native storage client.

use anyhow::{Context, Result};
use bucketio::{ClientConfig, ObjectReader, ObjectUrl, ObjectWriter, StoreClient};
use bytes::Bytes;
use std::sync::Arc;
use tracing::info;

/// Check if a string looks like an object URL
pub fn is_object_url(path: &str) -> bool {
    ["s3://", "gs://", "gcs://", "az://", "azblob://", "memory://"]
        .iter()
        .any(|scheme| path.starts_with(scheme))
}

/// Parse and validate an object URL
pub fn parse_object_url(url: &str) -> Result<ObjectUrl> {
    if !is_object_url(url) {
        return Err(bucketio::Error::InvalidUrl(format!(
            "{} is not an object URL (expected s3://, gs://, az:// or memory://)",
            url
        ))
        .into());
    }
    Ok(ObjectUrl::parse(url)?)
}

/// Create a native client for the URL's provider, keeping the other settings
fn create_client(url: &ObjectUrl, config: &ClientConfig) -> Result<Arc<StoreClient>> {
    let config = ClientConfig {
        provider: url.provider,
        ..config.clone()
    };
    let client = StoreClient::new(config)
        .with_context(|| format!("Failed to create storage client for {}", url))?;
    Ok(Arc::new(client))
}

/// Upload `body` to the object at `url`
pub fn put_object(url: &ObjectUrl, config: &ClientConfig, body: Bytes) -> Result<()> {
    info!("Uploading {} bytes to {}", body.len(), url.describe());

    let writer = ObjectWriter::from_handle(create_client(url, config)?)?;
    writer
        .write(&url.bucket, &url.key, body)
        .with_context(|| format!("Failed to write {}", url))?;
    Ok(())
}

/// Download the object at `url`
pub fn get_object(url: &ObjectUrl, config: &ClientConfig) -> Result<Bytes> {
    info!("Downloading {}", url.describe());

    let reader = ObjectReader::from_handle(create_client(url, config)?)?;
    let data = reader
        .read(&url.bucket, &url.key)
        .with_context(|| format!("Failed to read {}", url))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketio::Provider;

    #[test]
    fn test_is_object_url() {
        assert!(is_object_url("s3://bucket/file.tar"));
        assert!(is_object_url("gs://bucket/file.tar"));
        assert!(is_object_url("az://container/file.tar"));
        assert!(is_object_url("azblob://container/file.tar"));
        assert!(is_object_url("memory://scratch/file.tar"));
        assert!(!is_object_url("/local/path/file.tar"));
        assert!(!is_object_url("http://example.com/file.tar"));
    }

    #[test]
    fn test_url_provider_overrides_config() {
        let url = parse_object_url("memory://scratch/key").unwrap();
        let client = create_client(&url, &ClientConfig::default()).unwrap();
        assert_eq!(client.provider(), Provider::Memory);
    }

    #[test]
    fn test_get_missing_memory_object() {
        let url = parse_object_url("memory://scratch/missing").unwrap();
        let err = get_object(&url, &ClientConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<bucketio::Error>(),
            Some(bucketio::Error::ReadFailed { .. })
        ));
    }
}
