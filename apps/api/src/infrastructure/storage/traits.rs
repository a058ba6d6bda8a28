use async_trait::async_trait;
use bytes::Bytes;

/// Key/value blob store whose objects are publicly readable at
/// `{public_base_url}/{key}`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Writes `data` under `key`, tagging it with `content_type`.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> anyhow::Result<()>;

    /// Public URL the object at `key` is served from.
    fn public_url(&self, key: &str) -> String;
}

/// Joins a public base URL and an object key with exactly one `/`.
pub fn join_public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}
