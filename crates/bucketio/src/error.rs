use thiserror::Error;

/// Errors returned by a storage client while serving a single request.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// The service answered with an error code
    #[error("{operation} failed ({code}): {message}")]
    Response {
        operation: String,
        code: String,
        message: String,
    },

    /// The key cannot be stored without being rewritten
    #[error("Invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Runtime error: {0}")]
    Runtime(String),
}

#[derive(Error, Debug)]
pub enum Error {
    /// The client handle is not the expected storage client type
    #[error("Invalid client: expected {expected}, got {found}")]
    InvalidClient {
        expected: &'static str,
        found: &'static str,
    },

    /// The payload is not a raw byte sequence
    #[error("Invalid payload: expected a byte sequence, got {found}")]
    InvalidPayload { found: &'static str },

    #[error("Storage service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Failed to read object {bucket}/{key}: {source}")]
    ReadFailed {
        bucket: String,
        key: String,
        #[source]
        source: ServiceError,
    },

    #[error("Invalid object URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error is a type mismatch on a client handle or payload
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::InvalidClient { .. } | Error::InvalidPayload { .. })
    }
}
