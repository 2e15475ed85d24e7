//! Signed URL issuance for client uploads and downloads.
//!
//! Handlers depend on the [`StorageService`] trait; [`S3Storage`] presigns
//! requests against S3 or any S3-compatible endpoint.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::config::StorageConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested lifetime was rejected by the presigner.
    #[error("Invalid signed URL lifetime: {0}")]
    InvalidTtl(String),

    /// The SDK failed to build the signed request.
    #[error("Failed to presign request: {0}")]
    Presign(String),
}

/// Issues time-limited URLs for object storage.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// URL a client can `PUT` the object to, with the given content type.
    async fn upload_url(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, StorageError>;

    /// URL a client can `GET` the object from.
    async fn download_url(&self, key: &str, ttl: Duration) -> Result<String, StorageError>;
}

/// [`StorageService`] backed by `aws-sdk-s3` presigning.
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Build a client from the ambient AWS credential chain and `config`.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }
}

fn presigning_config(ttl: Duration) -> Result<PresigningConfig, StorageError> {
    PresigningConfig::expires_in(ttl).map_err(|e| StorageError::InvalidTtl(e.to_string()))
}

#[async_trait]
impl StorageService for S3Storage {
    async fn upload_url(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning_config(ttl)?)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        Ok(request.uri().to_string())
    }

    async fn download_url(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config(ttl)?)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        Ok(request.uri().to_string())
    }
}
