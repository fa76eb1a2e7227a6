use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use object_store::{ObjectStore as ApacheObjectStore, memory::InMemory};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    adapters::outbound::storage::ApacheObjectStoreAdapter,
    domain::{
        errors::{ClientError, ClientResult},
        models::{BucketInfo, ObjectSummary},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::{BucketStore, ObjectBackend},
};

/// In-memory buckets and objects for testing and development.
///
/// Follows S3 semantics for the error cases: missing buckets, duplicate
/// creation and deleting a bucket that still holds objects all fail.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    buckets: Arc<RwLock<BTreeMap<BucketName, StoredBucket>>>,
}

#[derive(Clone)]
struct StoredBucket {
    created_at: DateTime<Utc>,
    store: Arc<InMemory>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    async fn bucket_adapter(&self, bucket: &BucketName) -> ClientResult<ApacheObjectStoreAdapter> {
        let buckets = self.buckets.read().await;
        let stored = buckets
            .get(bucket)
            .ok_or_else(|| ClientError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;

        Ok(ApacheObjectStoreAdapter::new(
            stored.store.clone(),
            bucket.clone(),
        ))
    }
}

#[async_trait]
impl BucketStore for InMemoryStorage {
    async fn list_buckets(&self) -> ClientResult<Vec<BucketInfo>> {
        let buckets = self.buckets.read().await;

        Ok(buckets
            .iter()
            .map(|(name, stored)| BucketInfo {
                name: name.to_string(),
                creation_date: Some(stored.created_at),
            })
            .collect())
    }

    async fn create_bucket(&self, name: &BucketName, _region: Option<&str>) -> ClientResult<()> {
        let mut buckets = self.buckets.write().await;

        if buckets.contains_key(name) {
            return Err(ClientError::BucketAlreadyExists {
                bucket: name.to_string(),
            });
        }

        buckets.insert(
            name.clone(),
            StoredBucket {
                created_at: Utc::now(),
                store: Arc::new(InMemory::new()),
            },
        );
        Ok(())
    }

    async fn delete_bucket(&self, name: &BucketName) -> ClientResult<()> {
        let mut buckets = self.buckets.write().await;

        let stored = buckets.get(name).ok_or_else(|| ClientError::BucketNotFound {
            bucket: name.to_string(),
        })?;

        if stored.store.list(None).try_next().await?.is_some() {
            return Err(ClientError::BucketNotEmpty {
                bucket: name.to_string(),
            });
        }

        buckets.remove(name);
        Ok(())
    }

    async fn bucket_exists(&self, name: &BucketName) -> ClientResult<bool> {
        Ok(self.buckets.read().await.contains_key(name))
    }
}

#[async_trait]
impl ObjectBackend for InMemoryStorage {
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        data: Bytes,
    ) -> ClientResult<()> {
        self.bucket_adapter(bucket).await?.put_object(key, data).await
    }

    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> ClientResult<Bytes> {
        self.bucket_adapter(bucket).await?.get_object(key).await
    }

    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> ClientResult<()> {
        self.bucket_adapter(bucket).await?.delete_object(key).await
    }

    async fn list_objects(
        &self,
        bucket: &BucketName,
        prefix: Option<&str>,
    ) -> ClientResult<Vec<ObjectSummary>> {
        self.bucket_adapter(bucket).await?.list_objects(prefix).await
    }
}
