use bytes::Bytes;
use std::collections::HashMap;

use super::{FetchError, FetchErrorKind, ObjectStore};

/// An [`ObjectStore`] that serves objects held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    objects: HashMap<(String, String), Bytes>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the object at `bucket/key`.
    pub fn with_object(
        mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> Self {
        self.objects.insert((bucket.into(), key.into()), body.into());
        self
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, FetchError> {
        // Bytes clones share the buffer.
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| FetchError::new(FetchErrorKind::NotFound, bucket, key, "no such object"))
    }
}
