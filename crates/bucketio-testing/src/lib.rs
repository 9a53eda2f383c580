//! Testing utilities and fixtures for bucketio
//!
//! This crate provides a recording storage client, payload fixtures and call
//! assertions for testing code built on bucketio adapters.

use bucketio::{ObjectClient, ServiceError};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

pub mod assertions;
pub mod fixtures;

/// A call received by a [`RecordingClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Put {
        bucket: String,
        key: String,
        body: Bytes,
    },
    Get {
        bucket: String,
        key: String,
    },
}

/// An in-process storage client that records every call it receives.
///
/// Objects written with `put_object` can be read back with `get_object`.
/// Reads of missing objects fail with a `NoSuchKey` response.
#[derive(Debug, Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    objects: Mutex<HashMap<(String, String), Bytes>>,
    failure: Option<(String, String)>,
}

impl RecordingClient {
    /// Creates an empty recording client
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client whose every call fails with the given error code
    pub fn failing(code: &str, message: &str) -> Self {
        Self {
            failure: Some((code.to_string(), message.to_string())),
            ..Self::default()
        }
    }

    /// Seeds an object without recording a call
    pub fn with_object(self, bucket: &str, key: &str, body: &[u8]) -> Self {
        lock(&self.objects).insert(
            (bucket.to_string(), key.to_string()),
            Bytes::copy_from_slice(body),
        );
        self
    }

    /// Returns every call received so far, in order
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// Returns only the put calls
    pub fn puts(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Put { .. }))
            .collect()
    }

    /// Returns only the get calls
    pub fn gets(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Get { .. }))
            .collect()
    }

    fn fail(&self, operation: &str) -> Option<ServiceError> {
        self.failure
            .as_ref()
            .map(|(code, message)| ServiceError::Response {
                operation: operation.to_string(),
                code: code.clone(),
                message: message.clone(),
            })
    }
}

impl ObjectClient for RecordingClient {
    fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), ServiceError> {
        lock(&self.calls).push(Call::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: body.clone(),
        });

        if let Some(err) = self.fail("PutObject") {
            return Err(err);
        }

        lock(&self.objects).insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }

    fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, ServiceError> {
        lock(&self.calls).push(Call::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        if let Some(err) = self.fail("GetObject") {
            return Err(err);
        }

        lock(&self.objects)
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| ServiceError::Response {
                operation: "GetObject".to_string(),
                code: "NoSuchKey".to_string(),
                message: format!("The specified key does not exist: {}/{}", bucket, key),
            })
    }
}

/// Locks a mutex, recovering the data if a panicking test poisoned it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
