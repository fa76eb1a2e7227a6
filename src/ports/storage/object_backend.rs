use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    errors::ClientResult,
    models::ObjectSummary,
    value_objects::{BucketName, ObjectKey},
};

/// Port for object data operations
#[async_trait]
pub trait ObjectBackend: Send + Sync + 'static {
    /// Store object data, replacing any existing object under the key
    async fn put_object(&self, bucket: &BucketName, key: &ObjectKey, data: Bytes)
        -> ClientResult<()>;

    /// Retrieve the full object body
    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> ClientResult<Bytes>;

    /// Delete object data
    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> ClientResult<()>;

    /// List objects with a given prefix
    async fn list_objects(
        &self,
        bucket: &BucketName,
        prefix: Option<&str>,
    ) -> ClientResult<Vec<ObjectSummary>>;
}
