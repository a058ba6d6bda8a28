use super::traits::{StorageService, join_public_url};
use crate::config::Config;
use anyhow::Context;
use async_trait::async_trait;
use aws_sdk_s3::{
    Client, config::BehaviorVersion, config::Credentials, config::Region, primitives::ByteStream,
};
use bytes::Bytes;

/// Cloudflare R2 (or any S3-compatible bucket) fronted by a public domain.
pub struct R2StorageService {
    client: Client,
    bucket: String,
    public_url: String,
}

impl R2StorageService {
    pub fn from_config(config: &Config) -> Self {
        let creds = Credentials::new(
            config.r2_access_key_id.clone(),
            config.r2_secret_access_key.clone(),
            None,
            None,
            "r2",
        );
        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(creds)
            .endpoint_url(config.r2_endpoint.clone())
            .region(Region::new(config.r2_region.clone()))
            .force_path_style(config.r2_force_path_style)
            .build();

        tracing::info!(
            bucket = %config.r2_bucket_name,
            public_url = %config.r2_public_url,
            "Initializing R2 storage"
        );

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.r2_bucket_name.clone(),
            public_url: config.r2_public_url.clone(),
        }
    }
}

#[async_trait]
impl StorageService for R2StorageService {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .cache_control("public, max-age=31536000, immutable")
            .send()
            .await
            .with_context(|| format!("put_object {} failed", key))?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_public_url(&self.public_url, key)
    }
}
