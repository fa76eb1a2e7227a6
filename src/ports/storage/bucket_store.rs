use async_trait::async_trait;

use crate::domain::{
    errors::ClientResult,
    models::BucketInfo,
    value_objects::BucketName,
};

/// Port for bucket-level operations.
///
/// Implementations report S3 error codes through the matching
/// [`ClientError`](crate::domain::ClientError) variants, in particular
/// `BucketNotFound` for a missing bucket.
#[async_trait]
pub trait BucketStore: Send + Sync + 'static {
    /// List every bucket visible to the credentials
    async fn list_buckets(&self) -> ClientResult<Vec<BucketInfo>>;

    /// Create a bucket, optionally pinned to a region
    async fn create_bucket(&self, name: &BucketName, region: Option<&str>) -> ClientResult<()>;

    /// Delete an empty bucket
    async fn delete_bucket(&self, name: &BucketName) -> ClientResult<()>;

    /// Check if a bucket exists
    async fn bucket_exists(&self, name: &BucketName) -> ClientResult<bool>;
}
