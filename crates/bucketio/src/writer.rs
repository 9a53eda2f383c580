//! ObjectWriter - forwards object writes to a storage client

use crate::client::{client_from_handle, ObjectClient};
use crate::error::Result;
use crate::payload::payload_bytes;
use bytes::Bytes;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Writes whole objects through a storage client.
///
/// Every call is a single put request; failures are returned to the caller
/// unchanged and never retried.
#[derive(Clone)]
pub struct ObjectWriter {
    connection: Arc<dyn ObjectClient>,
}

impl ObjectWriter {
    /// Create a writer over any client with the put/get capability
    pub fn new(client: Arc<dyn ObjectClient>) -> Self {
        Self { connection: client }
    }

    /// Create a writer from an untyped client handle
    ///
    /// # Errors
    /// Returns [`Error::InvalidClient`](crate::Error::InvalidClient) if the
    /// handle is not a [`StoreClient`](crate::StoreClient)
    pub fn from_handle(handle: Arc<dyn Any + Send + Sync>) -> Result<Self> {
        Ok(Self::new(client_from_handle(handle)?))
    }

    /// The client this writer forwards to
    pub fn connection(&self) -> &Arc<dyn ObjectClient> {
        &self.connection
    }

    /// Store `body` as the object at `bucket`/`key`
    ///
    /// # Errors
    /// Returns [`Error::Service`](crate::Error::Service) with the client's
    /// error if the put fails
    pub fn write(&self, bucket: &str, key: &str, body: Bytes) -> Result<()> {
        debug!("Writing {} bytes to {}/{}", body.len(), bucket, key);
        self.connection.put_object(bucket, key, body)?;
        Ok(())
    }

    /// Store a dynamically typed body, which must be a raw byte sequence
    ///
    /// # Errors
    /// Returns [`Error::InvalidPayload`](crate::Error::InvalidPayload) without
    /// contacting the client if `body` is not `Bytes`, `Vec<u8>`, `Box<[u8]>`
    /// or `&'static [u8]`
    pub fn write_any<T: Any>(&self, bucket: &str, key: &str, body: &T) -> Result<()> {
        let body = payload_bytes(body)?;
        self.write(bucket, key, body)
    }
}

impl fmt::Debug for ObjectWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectWriter").finish_non_exhaustive()
    }
}
