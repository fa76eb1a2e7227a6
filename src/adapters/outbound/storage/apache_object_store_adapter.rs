use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{ObjectStore as ApacheObjectStore, PutPayload, path::Path as ObjectPath};
use std::sync::Arc;
use tracing::debug;

use crate::{
    adapters::outbound::storage::error::object_error,
    domain::{
        errors::{ClientResult, ValidationError},
        models::ObjectSummary,
        value_objects::{BucketName, ObjectKey},
    },
};

/// Store path for `key`, keeping the key byte for byte.
///
/// `ObjectPath::from` would percent-encode characters such as `~`, `%` or
/// non-ASCII letters, and the stored key would no longer match the one other
/// S3 clients use.
pub fn object_path(key: &ObjectKey) -> Result<ObjectPath, ValidationError> {
    ObjectPath::parse(key.as_str()).map_err(|e| ValidationError::UnsupportedObjectKey {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Deepest complete path below which every key starting with `prefix` lives.
///
/// `None` means the listing has to start at the bucket root.
fn listing_root(prefix: &str) -> Option<&str> {
    prefix
        .rfind('/')
        .map(|idx| &prefix[..idx])
        .filter(|root| !root.is_empty())
}

/// Object operations on a single bucket, backed by Apache object_store
#[derive(Clone)]
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    bucket: BucketName,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>, bucket: BucketName) -> Self {
        Self {
            inner: store,
            bucket,
        }
    }

    pub async fn put_object(&self, key: &ObjectKey, data: Bytes) -> ClientResult<()> {
        let path = object_path(key)?;

        self.inner
            .put(&path, PutPayload::from(data))
            .await
            .map_err(|e| object_error(e, &self.bucket, key))?;

        Ok(())
    }

    pub async fn get_object(&self, key: &ObjectKey) -> ClientResult<Bytes> {
        let path = object_path(key)?;

        let result = self
            .inner
            .get(&path)
            .await
            .map_err(|e| object_error(e, &self.bucket, key))?;

        result
            .bytes()
            .await
            .map_err(|e| object_error(e, &self.bucket, key))
    }

    pub async fn delete_object(&self, key: &ObjectKey) -> ClientResult<()> {
        let path = object_path(key)?;

        self.inner
            .delete(&path)
            .await
            .map_err(|e| object_error(e, &self.bucket, key))
    }

    /// List keys starting with `prefix`, compared as plain strings like S3 does
    pub async fn list_objects(&self, prefix: Option<&str>) -> ClientResult<Vec<ObjectSummary>> {
        let prefix = prefix.unwrap_or_default();

        let root = match listing_root(prefix).map(ObjectPath::parse).transpose() {
            Ok(root) => root,
            Err(e) => {
                // No valid key can live below an unparseable root
                debug!(bucket = %self.bucket, prefix, error = %e, "prefix matches no keys");
                return Ok(Vec::new());
            }
        };

        let objects: Vec<ObjectSummary> = self
            .inner
            .list(root.as_ref())
            .try_filter(|meta| futures::future::ready(meta.location.as_ref().starts_with(prefix)))
            .map_ok(|meta| ObjectSummary {
                key: meta.location.to_string(),
                size: meta.size,
                last_modified: meta.last_modified,
                etag: meta.e_tag,
            })
            .try_collect()
            .await?;

        Ok(objects)
    }
}
