//! Runtime payload type checks

use crate::{Error, Result};
use bytes::Bytes;
use std::any::{type_name, Any};

/// Convert a dynamically typed value into an object body.
///
/// Only raw byte sequences are accepted: `Bytes`, `Vec<u8>`, `Box<[u8]>` and
/// `&'static [u8]`. Strings, numbers and structured values are rejected
/// rather than encoded.
pub(crate) fn payload_bytes<T: Any>(body: &T) -> Result<Bytes> {
    let any = body as &dyn Any;

    if let Some(bytes) = any.downcast_ref::<Bytes>() {
        Ok(bytes.clone())
    } else if let Some(vec) = any.downcast_ref::<Vec<u8>>() {
        Ok(Bytes::copy_from_slice(vec))
    } else if let Some(boxed) = any.downcast_ref::<Box<[u8]>>() {
        Ok(Bytes::copy_from_slice(boxed))
    } else if let Some(slice) = any.downcast_ref::<&'static [u8]>() {
        Ok(Bytes::from_static(*slice))
    } else {
        Err(Error::InvalidPayload {
            found: type_name::<T>(),
        })
    }
}
