//! # bucketio
//!
//! Type-checked adapters over an object storage client. An [`ObjectWriter`]
//! forwards `write(bucket, key, body)` to the client's put-object call and an
//! [`ObjectReader`] forwards `read(bucket, key)` to its get-object call. Bytes
//! pass through unchanged; nothing is retried, buffered or cached.
//!
//! ## Architecture
//!
//! - [`ObjectClient`]: the put/get capability both adapters forward to
//! - [`StoreClient`]: the native client, built on `object_store` and driven
//!   through an internal Tokio runtime so every call blocks
//! - [`ObjectWriter`] / [`ObjectReader`]: the adapters. `from_handle` checks an
//!   untyped handle once at construction and `write_any` rejects payloads that
//!   are not raw byte sequences
//!
//! ```no_run
//! use bucketio::{ObjectReader, ObjectWriter, StoreClient};
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! # fn main() -> bucketio::Result<()> {
//! let client = Arc::new(StoreClient::memory()?);
//! let writer = ObjectWriter::from_handle(client.clone())?;
//! let reader = ObjectReader::from_handle(client)?;
//!
//! writer.write("bucket", "key", Bytes::from_static(b"Test data"))?;
//! assert_eq!(reader.read("bucket", "key")?.as_ref(), b"Test data");
//! # Ok(())
//! # }
//! ```

#![warn(missing_debug_implementations)]

mod client;
pub mod config;
mod error;
mod location;
mod payload;
mod reader;
mod runtime;
mod store;
mod writer;

pub use client::ObjectClient;
pub use config::{ClientConfig, Config, Provider};
pub use error::{Error, Result, ServiceError};
pub use location::ObjectUrl;
pub use reader::ObjectReader;
pub use store::StoreClient;
pub use writer::ObjectWriter;
