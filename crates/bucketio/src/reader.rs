//! ObjectReader - forwards object reads to a storage client

use crate::client::{client_from_handle, ObjectClient};
use crate::{Error, Result};
use bytes::Bytes;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Reads whole objects through a storage client
#[derive(Clone)]
pub struct ObjectReader {
    connection: Arc<dyn ObjectClient>,
}

impl ObjectReader {
    /// Create a reader over any client with the put/get capability
    pub fn new(client: Arc<dyn ObjectClient>) -> Self {
        Self { connection: client }
    }

    /// Create a reader from an untyped client handle
    ///
    /// # Errors
    /// Returns [`Error::InvalidClient`] if the handle is not a
    /// [`StoreClient`](crate::StoreClient)
    pub fn from_handle(handle: Arc<dyn Any + Send + Sync>) -> Result<Self> {
        Ok(Self::new(client_from_handle(handle)?))
    }

    /// The client this reader forwards to
    pub fn connection(&self) -> &Arc<dyn ObjectClient> {
        &self.connection
    }

    /// Fetch the object at `bucket`/`key`
    ///
    /// # Errors
    /// Returns [`Error::ReadFailed`] carrying the client's error if the get
    /// fails; a failed read never yields empty data
    pub fn read(&self, bucket: &str, key: &str) -> Result<Bytes> {
        match self.connection.get_object(bucket, key) {
            Ok(data) => {
                debug!("Read {} bytes from {}/{}", data.len(), bucket, key);
                Ok(data)
            }
            Err(source) => {
                error!("Failed to read {}/{}: {}", bucket, key, source);
                Err(Error::ReadFailed {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    source,
                })
            }
        }
    }
}

impl fmt::Debug for ObjectReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectReader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockObjectClient;
    use crate::{ServiceError, StoreClient};

    #[test]
    fn test_from_handle() {
        let client = Arc::new(StoreClient::memory().unwrap());
        assert!(ObjectReader::from_handle(client).is_ok());

        let err = ObjectReader::from_handle(Arc::new(String::from("not a client"))).unwrap_err();
        assert!(matches!(err, Error::InvalidClient { .. }));

        let handle: Arc<dyn Any + Send + Sync> = Arc::new(StoreClient::memory().unwrap());
        assert!(ObjectReader::from_handle(handle).is_ok());

        let handle: Arc<dyn Any + Send + Sync> = Arc::new(7i32);
        match ObjectReader::from_handle(handle) {
            Err(Error::InvalidClient { found, .. }) => assert_eq!(found, "i32"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_error_caught_if_read_fails() {
        let mut mock = MockObjectClient::new();
        mock.expect_get_object().times(1).returning(|_, _| {
            Err(ServiceError::Response {
                operation: "InvalidKeyPair.Duplicate".to_string(),
                code: "Duplicate".to_string(),
                message: "This is a custom message".to_string(),
            })
        });

        let reader = ObjectReader::new(Arc::new(mock));
        match reader.read("my-bucket", "my-key") {
            Err(Error::ReadFailed {
                bucket,
                key,
                source: ServiceError::Response { code, .. },
            }) => {
                assert_eq!(bucket, "my-bucket");
                assert_eq!(key, "my-key");
                assert_eq!(code, "Duplicate");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_get_request_made() {
        let mut mock = MockObjectClient::new();
        mock.expect_get_object()
            .withf(|bucket, key| bucket == "my-bucket" && key == "my-key")
            .times(1)
            .returning(|_, _| Ok(Bytes::from_static(b"contents")));
        mock.expect_put_object().never();

        let reader = ObjectReader::new(Arc::new(mock));
        let data = reader.read("my-bucket", "my-key").unwrap();
        assert_eq!(data.as_ref(), b"contents");
    }

    #[test]
    fn test_empty_object_is_not_a_failure() {
        let mut mock = MockObjectClient::new();
        mock.expect_get_object()
            .times(1)
            .returning(|_, _| Ok(Bytes::new()));

        let reader = ObjectReader::new(Arc::new(mock));
        assert!(reader.read("b", "empty").unwrap().is_empty());
    }
}
