//! Native storage client backed by `object_store`

use crate::client::ObjectClient;
use crate::config::{ClientConfig, Provider};
use crate::error::ServiceError;
use crate::runtime::{block_on, get_runtime};
use crate::{Error, Result};
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing::{debug, trace};

#[derive(Debug)]
enum Backend {
    /// A cloud provider; a store is built per request for the target bucket
    Cloud(ClientConfig),
    /// One in-memory store per bucket name
    Memory(Mutex<HashMap<String, Arc<InMemory>>>),
}

/// The storage client the adapters accept from untyped handles.
///
/// Bridges the async `object_store` API to blocking calls on a shared Tokio
/// runtime. Must not be called from inside an async context.
#[derive(Debug)]
pub struct StoreClient {
    backend: Backend,
    runtime: Arc<Runtime>,
}

impl StoreClient {
    /// Create a client for the configured provider
    ///
    /// # Errors
    /// Returns an error if the provider was not compiled in or the runtime
    /// cannot be created
    pub fn new(config: ClientConfig) -> Result<Self> {
        let backend = match config.provider {
            Provider::Memory => Backend::Memory(Mutex::new(HashMap::new())),
            provider if provider_enabled(provider) => Backend::Cloud(config),
            provider => {
                return Err(Error::Config(format!(
                    "Provider '{}' is not enabled in this build",
                    provider
                )))
            }
        };

        Ok(Self {
            backend,
            runtime: get_runtime()?,
        })
    }

    /// Create a client backed by a fresh in-memory store
    pub fn memory() -> Result<Self> {
        Self::new(ClientConfig {
            provider: Provider::Memory,
            ..ClientConfig::default()
        })
    }

    /// The storage service this client talks to
    pub fn provider(&self) -> Provider {
        match &self.backend {
            Backend::Cloud(config) => config.provider,
            Backend::Memory(_) => Provider::Memory,
        }
    }

    fn resolve(
        &self,
        bucket: &str,
        key: &str,
    ) -> std::result::Result<(Arc<dyn ObjectStore>, Path), ServiceError> {
        let path = object_path(key)?;
        match &self.backend {
            Backend::Memory(buckets) => {
                let mut buckets = buckets.lock().unwrap_or_else(|e| e.into_inner());
                let store: Arc<dyn ObjectStore> = buckets
                    .entry(bucket.to_string())
                    .or_insert_with(|| Arc::new(InMemory::new()))
                    .clone();
                Ok((store, path))
            }
            Backend::Cloud(config) => Ok((build_cloud_store(config, bucket)?, path)),
        }
    }
}

impl ObjectClient for StoreClient {
    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> std::result::Result<(), ServiceError> {
        let (store, path) = self.resolve(bucket, key)?;
        trace!("PUT {} ({} bytes) via {}", path, body.len(), self.provider());

        block_on(&self.runtime, async {
            store.put(&path, PutPayload::from(body)).await
        })
        .ok_or_else(nested_runtime)??;

        debug!("Stored {}/{}", bucket, key);
        Ok(())
    }

    fn get_object(&self, bucket: &str, key: &str) -> std::result::Result<Bytes, ServiceError> {
        let (store, path) = self.resolve(bucket, key)?;
        trace!("GET {} via {}", path, self.provider());

        let data = block_on(&self.runtime, async {
            let result = store.get(&path).await?;
            result.bytes().await
        })
        .ok_or_else(nested_runtime)??;

        debug!("Fetched {} bytes from {}/{}", data.len(), bucket, key);
        Ok(data)
    }
}

/// Map a key onto an object path without rewriting it.
///
/// Keys that `object_store` would normalize (empty, leading or trailing `/`,
/// `//`, `.` or `..` segments) are rejected so distinct keys never share an
/// object.
fn object_path(key: &str) -> std::result::Result<Path, ServiceError> {
    let invalid = |reason: String| ServiceError::InvalidKey {
        key: key.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(invalid("key is empty".to_string()));
    }
    let path = Path::parse(key).map_err(|e| invalid(e.to_string()))?;
    if path.as_ref() != key {
        return Err(invalid(format!("would be stored as '{}'", path)));
    }
    Ok(path)
}

fn nested_runtime() -> ServiceError {
    ServiceError::Runtime("blocking storage call made from within an async runtime".to_string())
}

fn provider_enabled(provider: Provider) -> bool {
    match provider {
        Provider::S3 => cfg!(feature = "aws"),
        Provider::Gcs => cfg!(feature = "gcp"),
        Provider::Azure => cfg!(feature = "azure"),
        Provider::Memory => true,
    }
}

fn build_cloud_store(
    config: &ClientConfig,
    bucket: &str,
) -> std::result::Result<Arc<dyn ObjectStore>, ServiceError> {
    match config.provider {
        #[cfg(feature = "aws")]
        Provider::S3 => {
            let mut builder = object_store::aws::AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .with_allow_http(config.allow_http);
            if let Some(region) = &config.region {
                builder = builder.with_region(region);
            }
            if let Some(endpoint) = &config.endpoint {
                builder = builder.with_endpoint(endpoint);
            }
            Ok(Arc::new(builder.build()?))
        }
        #[cfg(feature = "gcp")]
        Provider::Gcs => {
            let store = object_store::gcp::GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()?;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "azure")]
        Provider::Azure => {
            let store = object_store::azure::MicrosoftAzureBuilder::from_env()
                .with_container_name(bucket)
                .build()?;
            Ok(Arc::new(store))
        }
        other => Err(ServiceError::Runtime(format!(
            "No cloud store available for provider '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let client = StoreClient::memory().unwrap();
        assert_eq!(client.provider(), Provider::Memory);

        client
            .put_object("bucket", "dir/key.bin", Bytes::from_static(b"payload"))
            .unwrap();
        let data = client.get_object("bucket", "dir/key.bin").unwrap();
        assert_eq!(data.as_ref(), b"payload");
    }

    #[test]
    fn test_memory_buckets_are_separate() {
        let client = StoreClient::memory().unwrap();
        client
            .put_object("first", "key", Bytes::from_static(b"one"))
            .unwrap();

        let err = client.get_object("second", "key").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ObjectStore(object_store::Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_bucket_names_are_not_split() {
        let client = StoreClient::memory().unwrap();
        client.put_object("x/y", "z", Bytes::from_static(b"xy")).unwrap();

        assert!(client.get_object("x", "y/z").is_err());
        assert_eq!(client.get_object("x/y", "z").unwrap().as_ref(), b"xy");
    }

    #[test]
    fn test_object_path_keeps_key_verbatim() {
        assert_eq!(object_path("dir/key.bin").unwrap().as_ref(), "dir/key.bin");

        for key in ["", "a//b", "/lead", "trail/", "a/./b", "a/../b", "."] {
            assert!(
                matches!(object_path(key), Err(ServiceError::InvalidKey { .. })),
                "key {:?} was accepted",
                key
            );
        }
    }

    #[test]
    fn test_put_overwrites() {
        let client = StoreClient::memory().unwrap();
        client.put_object("b", "k", Bytes::from_static(b"old")).unwrap();
        client.put_object("b", "k", Bytes::from_static(b"new")).unwrap();
        assert_eq!(client.get_object("b", "k").unwrap().as_ref(), b"new");
    }

    #[test]
    fn test_refuses_async_context() {
        let client = StoreClient::memory().unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        let result = runtime.block_on(async { client.get_object("b", "k") });
        assert!(matches!(result, Err(ServiceError::Runtime(_))));
    }

    #[cfg(not(feature = "gcp"))]
    #[test]
    fn test_disabled_provider_rejected() {
        let config = ClientConfig {
            provider: Provider::Gcs,
            ..ClientConfig::default()
        };
        assert!(matches!(StoreClient::new(config), Err(Error::Config(_))));
    }
}
