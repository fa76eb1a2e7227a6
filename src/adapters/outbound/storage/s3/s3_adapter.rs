use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use object_store::signer::Signer;
use reqwest::Client;
use std::sync::Arc;

use crate::{
    adapters::outbound::storage::{
        ApacheObjectStoreAdapter,
        apache_object_store_adapter::object_path,
        error::object_error,
        s3::{S3Config, SharedHttpConnector, create_s3_store, post_policy::PostPolicy},
    },
    domain::{
        errors::ClientResult,
        models::{ObjectSummary, PresignedPost, PresignedUrl},
        value_objects::{BucketName, Expiration, ObjectKey},
    },
    ports::storage::{ObjectBackend, PresignMethod, UrlSigner},
};

/// S3 adapter for object data and presigned requests.
///
/// `object_store` binds a store to one bucket, so a store is built for each
/// call. All of them send through one shared HTTP client.
#[derive(Clone, Debug)]
pub struct S3ObjectStoreAdapter {
    config: S3Config,
    connector: SharedHttpConnector,
}

impl S3ObjectStoreAdapter {
    /// Create a new S3 adapter with its own connection pool
    pub fn new(config: S3Config) -> ClientResult<Self> {
        let http_client = config.http_client()?;
        Ok(Self::with_http_client(config, http_client))
    }

    pub fn with_http_client(config: S3Config, http_client: Client) -> Self {
        Self {
            config,
            connector: SharedHttpConnector::new(http_client),
        }
    }

    fn bucket_adapter(&self, bucket: &BucketName) -> ClientResult<ApacheObjectStoreAdapter> {
        let store = create_s3_store(&self.config, bucket, &self.connector)?;
        Ok(ApacheObjectStoreAdapter::new(Arc::new(store), bucket.clone()))
    }
}

#[async_trait]
impl ObjectBackend for S3ObjectStoreAdapter {
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        data: Bytes,
    ) -> ClientResult<()> {
        self.bucket_adapter(bucket)?.put_object(key, data).await
    }

    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> ClientResult<Bytes> {
        self.bucket_adapter(bucket)?.get_object(key).await
    }

    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> ClientResult<()> {
        self.bucket_adapter(bucket)?.delete_object(key).await
    }

    async fn list_objects(
        &self,
        bucket: &BucketName,
        prefix: Option<&str>,
    ) -> ClientResult<Vec<ObjectSummary>> {
        self.bucket_adapter(bucket)?.list_objects(prefix).await
    }
}

#[async_trait]
impl UrlSigner for S3ObjectStoreAdapter {
    async fn presign(
        &self,
        method: PresignMethod,
        bucket: &BucketName,
        key: &ObjectKey,
        expiration: Expiration,
    ) -> ClientResult<PresignedUrl> {
        let path = object_path(key)?;
        let store = create_s3_store(&self.config, bucket, &self.connector)?;
        let url = store
            .signed_url(method.into(), &path, expiration.as_duration())
            .await
            .map_err(|e| object_error(e, bucket, key))?;

        Ok(PresignedUrl {
            url: url.to_string(),
            expiration,
        })
    }

    fn presign_post(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        expiration: Expiration,
    ) -> ClientResult<PresignedPost> {
        let now = Utc::now();
        let policy = PostPolicy::new(bucket.clone(), key.clone(), now, expiration);

        Ok(policy.sign(
            self.config.bucket_url(bucket),
            &self.config.credentials,
            &self.config.region,
            now,
        ))
    }
}
