use crate::config::Provider;
use crate::{Error, Result};
use std::fmt;
use url::Url;

/// An object address such as `s3://bucket/path/to/object`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrl {
    /// Storage service selected by the URL scheme
    pub provider: Provider,
    /// The bucket or container name
    pub bucket: String,
    /// The object key within the bucket
    pub key: String,
}

impl ObjectUrl {
    /// Parse an object URL.
    ///
    /// Accepted schemes are `s3`, `gs`/`gcs`, `az`/`azblob` and `memory`.
    pub fn parse(url: &str) -> Result<Self> {
        let parsed =
            Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

        let provider: Provider = parsed.scheme().parse().map_err(|_| {
            Error::InvalidUrl(format!(
                "Unsupported scheme: {}. Use s3://, gs://, az:// or memory://",
                parsed.scheme()
            ))
        })?;

        let bucket = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::InvalidUrl(format!("Missing bucket name: {}", url)))?
            .to_string();

        let key = parsed.path().trim_start_matches('/').to_string();
        if key.is_empty() {
            return Err(Error::InvalidUrl(format!("Missing object key: {}", url)));
        }

        Ok(ObjectUrl {
            provider,
            bucket,
            key,
        })
    }

    /// Human-readable description of the location
    pub fn describe(&self) -> String {
        format!(
            "{} bucket '{}' key '{}'",
            self.provider.display_name(),
            self.bucket,
            self.key
        )
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = match self.provider {
            Provider::S3 => "s3",
            Provider::Gcs => "gs",
            Provider::Azure => "az",
            Provider::Memory => "memory",
        };
        write!(f, "{}://{}/{}", scheme, self.bucket, self.key)
    }
}
