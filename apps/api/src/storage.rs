//! Object storage: uploaded documents live in S3 (MinIO locally).

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use std::time::Duration;
use tracing::info;

use crate::errors::AppError;

/// Object-store capability: durable writes plus time-limited read URLs.
/// Signed URLs are computed on read and never persisted.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError>;

    async fn signed_url(&self, key: &str, ttl_secs: u64) -> Result<String, AppError>;
}

/// S3-backed store, MinIO-compatible via the configured endpoint.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded document to s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn signed_url(&self, key: &str, ttl_secs: u64) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(ttl_secs))
            .map_err(|e| AppError::Storage(format!("Invalid presigning TTL: {e}")))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::Storage(format!("S3 presign failed: {e}")))?;

        Ok(presigned.uri().to_string())
    }
}
