//! The storage client capability the adapters forward to

use crate::error::ServiceError;
use crate::{Error, Result, StoreClient};
use bytes::Bytes;
use std::any::{type_name, Any};
use std::sync::Arc;

/// A connection to an object storage service that can put and get objects.
///
/// Implementations own whatever transport, credentials and thread-safety the
/// service needs; the adapters only forward calls and never retry.
#[cfg_attr(test, mockall::automock)]
pub trait ObjectClient: Send + Sync {
    /// Store `body` under `bucket`/`key`, replacing any existing object
    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> std::result::Result<(), ServiceError>;

    /// Fetch the full contents of `bucket`/`key`
    fn get_object(&self, bucket: &str, key: &str) -> std::result::Result<Bytes, ServiceError>;
}

/// Check an untyped client handle once, accepting only [`StoreClient`].
pub(crate) fn client_from_handle(
    handle: Arc<dyn Any + Send + Sync>,
) -> Result<Arc<dyn ObjectClient>> {
    match handle.downcast::<StoreClient>() {
        Ok(client) => Ok(client),
        Err(handle) => Err(Error::InvalidClient {
            expected: type_name::<StoreClient>(),
            found: describe_handle(handle.as_ref()),
        }),
    }
}

/// Best-effort name for a rejected handle; erased values carry no type name.
fn describe_handle(handle: &(dyn Any + Send + Sync)) -> &'static str {
    macro_rules! known {
        ($($ty:ty),* $(,)?) => {
            $(
                if handle.is::<$ty>() {
                    return type_name::<$ty>();
                }
            )*
        };
    }

    known!(
        Arc<dyn ObjectClient>,
        Box<dyn ObjectClient>,
        String,
        &'static str,
        Vec<u8>,
        Bytes,
        bool,
        i32,
        i64,
        u32,
        u64,
        usize,
        f64,
    );
    "an unrecognized type"
}
