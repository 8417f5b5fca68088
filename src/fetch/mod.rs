//! Object retrieval.
//!
//! [`ObjectStore`] is the capability the pipeline fetches through.
//! [`S3Store`] talks to S3 with the ambient AWS configuration and
//! [`InMemoryStore`] serves fixed objects from memory.

mod error;
mod memory;
mod s3;

pub use error::{FetchError, FetchErrorKind};
pub use memory::InMemoryStore;
pub use s3::S3Store;

use bytes::Bytes;
use std::time::Instant;
use tracing::info;

/// Reads whole objects out of a bucket.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the full content of `bucket/key`.
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, FetchError>;
}

/// Fetches one object and hands back its bytes untouched.
#[tracing::instrument(skip_all, fields(bucket = %bucket, key = %key))]
pub async fn fetch_object<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    key: &str,
) -> Result<Bytes, FetchError> {
    let started = Instant::now();
    let bytes = store.get(bucket, key).await?;

    info!(
        bytes = bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Object downloaded"
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_object_returns_bytes_unchanged() {
        let payload: &'static [u8] = b"Country\r\n\"US\"\r\n\xff\x00tail";
        let store = InMemoryStore::new().with_object("bucket", "data.csv", payload);

        let bytes = fetch_object(&store, "bucket", "data.csv").await.unwrap();
        assert_eq!(bytes.as_ref(), payload);
    }

    #[tokio::test]
    async fn test_fetch_object_missing_is_not_found() {
        let store = InMemoryStore::new();

        let err = fetch_object(&store, "bucket", "nope.csv").await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::NotFound);
        assert_eq!(err.bucket(), "bucket");
        assert_eq!(err.key(), "nope.csv");
    }

    #[tokio::test]
    async fn test_fetch_object_through_trait_object() {
        let store: Box<dyn ObjectStore> =
            Box::new(InMemoryStore::new().with_object("b", "k", "Country\nUS\n"));

        let bytes = fetch_object(store.as_ref(), "b", "k").await.unwrap();
        assert_eq!(bytes, Bytes::from_static(b"Country\nUS\n"));
    }
}
