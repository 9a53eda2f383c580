//! Common test fixtures for bucketio testing

use bucketio::{ObjectWriter, Result};
use bytes::Bytes;
use std::collections::HashMap;

/// Bucket used by the standard fixtures
pub const TEST_BUCKET: &str = "bucket";

/// Key used by the standard fixtures
pub const TEST_KEY: &str = "key";

/// The standard small text payload
pub fn test_payload() -> Bytes {
    Bytes::from_static(b"Test data")
}

/// A deterministic binary payload of `size` bytes covering every byte value
pub fn binary_payload(size: usize) -> Bytes {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Attempts to write each kind of non-byte payload through `writer`.
///
/// Returns the payload description alongside the write result so callers can
/// assert every one was rejected.
pub fn write_non_byte_payloads(writer: &ObjectWriter) -> Vec<(&'static str, Result<()>)> {
    let mut mapping = HashMap::new();
    mapping.insert("key", b"bytes".to_vec());

    vec![
        ("integer", writer.write_any(TEST_BUCKET, TEST_KEY, &1i64)),
        ("string slice", writer.write_any(TEST_BUCKET, TEST_KEY, &"body")),
        (
            "owned string",
            writer.write_any(TEST_BUCKET, TEST_KEY, &String::from("body")),
        ),
        ("float", writer.write_any(TEST_BUCKET, TEST_KEY, &1.123f64)),
        ("mapping", writer.write_any(TEST_BUCKET, TEST_KEY, &mapping)),
    ]
}
