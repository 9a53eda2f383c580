//! Common assertions for bucketio testing

use crate::{Call, RecordingClient};

/// Asserts that exactly one call was made and it was a put with these arguments
pub fn assert_single_put(client: &RecordingClient, bucket: &str, key: &str, body: &[u8]) {
    let calls = client.calls();
    assert_eq!(calls.len(), 1, "Expected exactly one call, got {:?}", calls);

    match &calls[0] {
        Call::Put {
            bucket: b,
            key: k,
            body: data,
        } => {
            assert_eq!(b, bucket, "Bucket mismatch");
            assert_eq!(k, key, "Key mismatch");
            assert_eq!(data.as_ref(), body, "Body mismatch");
        }
        other => panic!("Expected a put call, got {:?}", other),
    }
}

/// Asserts that exactly one call was made and it was a get with these arguments
pub fn assert_single_get(client: &RecordingClient, bucket: &str, key: &str) {
    let calls = client.calls();
    assert_eq!(calls.len(), 1, "Expected exactly one call, got {:?}", calls);
    assert_eq!(
        calls[0],
        Call::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        "Get call mismatch"
    );
}

/// Asserts that the client never received a put
pub fn assert_no_puts(client: &RecordingClient) {
    let puts = client.puts();
    assert!(puts.is_empty(), "Expected no put calls, got {:?}", puts);
}
