use bytes::Bytes;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, error, info, warn};

use crate::{
    app::{ClientBuilder, ClientConfig, StorageBackend},
    domain::{
        errors::{ClientError, ClientResult},
        models::{
            BucketDeletion, BucketInfo, DeletedObject, ObjectBuffer, ObjectSummary,
            PresignedPost, PresignedUrl,
        },
        value_objects::{BucketName, Expiration, ObjectKey, ObjectUri},
    },
    ports::storage::{BucketStore, ObjectBackend, PresignMethod, UrlSigner},
    services::NamedBuffer,
};

/// Façade over an S3-compatible object store.
///
/// Every operation validates its inputs, forwards to the configured backend,
/// and logs failures before returning them. The client keeps no state between
/// calls besides the backends themselves.
#[derive(Clone)]
pub struct ObjectStoreClient {
    buckets: Arc<dyn BucketStore>,
    objects: Arc<dyn ObjectBackend>,
    signer: Option<Arc<dyn UrlSigner>>,
}

impl ObjectStoreClient {
    /// Connect to `endpoint_url` with an explicit key pair and the default region.
    ///
    /// ```no_run
    /// use seaweed_s3_client::ObjectStoreClient;
    ///
    /// let client = ObjectStoreClient::new("http://localhost:8333", "any", "any")?;
    /// # Ok::<(), seaweed_s3_client::ClientError>(())
    /// ```
    pub fn new(endpoint_url: &str, access_key: &str, secret_key: &str) -> ClientResult<Self> {
        let config = ClientConfig::builder()
            .endpoint(endpoint_url)
            .access_key(access_key)
            .secret_key(secret_key)
            .build();

        ClientBuilder::new()
            .with_storage_backend(StorageBackend::S3(config))
            .build()
    }

    /// Assemble a client from port implementations.
    ///
    /// Without a signer the presigning operations return
    /// [`ClientError::UnsupportedOperation`].
    pub fn from_parts(
        buckets: Arc<dyn BucketStore>,
        objects: Arc<dyn ObjectBackend>,
        signer: Option<Arc<dyn UrlSigner>>,
    ) -> Self {
        Self {
            buckets,
            objects,
            signer,
        }
    }

    pub async fn list_buckets(&self) -> ClientResult<Vec<BucketInfo>> {
        let buckets = self
            .buckets
            .list_buckets()
            .await
            .inspect_err(|e| error!(error = %e, "failed to list buckets"))?;

        debug!(count = buckets.len(), "listed buckets");
        Ok(buckets)
    }

    /// Create a bucket. A `region` other than `us-east-1` is sent as the
    /// location constraint.
    pub async fn create_bucket(&self, name: &str, region: Option<&str>) -> ClientResult<()> {
        let result = async {
            let bucket = BucketName::new(name)?;
            self.buckets.create_bucket(&bucket, region).await
        }
        .await;

        result.inspect_err(|e| error!(bucket = name, error = %e, "failed to create bucket"))?;
        info!(bucket = name, region, "created bucket");
        Ok(())
    }

    /// Delete an empty bucket.
    ///
    /// A bucket that does not exist is reported as
    /// `Ok(BucketDeletion::NotFound)` so deleting is idempotent; every other
    /// failure is returned as an error.
    pub async fn delete_bucket(&self, name: &str) -> ClientResult<BucketDeletion> {
        let result = async {
            let bucket = BucketName::new(name)?;
            self.buckets.delete_bucket(&bucket).await
        }
        .await;

        match result {
            Ok(()) => {
                info!(bucket = name, "deleted bucket");
                Ok(BucketDeletion::Deleted)
            }
            Err(e) if e.is_bucket_not_found() => {
                warn!(bucket = name, "bucket to delete does not exist");
                Ok(BucketDeletion::NotFound)
            }
            Err(e) => {
                error!(bucket = name, error = %e, "failed to delete bucket");
                Err(e)
            }
        }
    }

    pub async fn bucket_exists(&self, name: &str) -> ClientResult<bool> {
        let result = async {
            let bucket = BucketName::new(name)?;
            self.buckets.bucket_exists(&bucket).await
        }
        .await;

        result.inspect_err(|e| error!(bucket = name, error = %e, "failed to check bucket"))
    }

    /// Upload a local file. The key defaults to the file's base name.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        bucket: &str,
        object_name: Option<&str>,
    ) -> ClientResult<ObjectUri> {
        let path = path.as_ref();
        let result = async {
            let bucket = BucketName::new(bucket)?;
            let key = resolve_key(path, object_name)?;
            let data = tokio::fs::read(path).await?;
            self.put(bucket, key, Bytes::from(data)).await
        }
        .await;

        result.inspect_err(|e| {
            error!(path = %path.display(), bucket, error = %e, "failed to upload file")
        })
    }

    /// Upload everything readable from `buffer`. The key defaults to the base
    /// name of the buffer's associated name.
    pub async fn upload_buffer<R>(
        &self,
        buffer: NamedBuffer<R>,
        bucket: &str,
        object_name: Option<&str>,
    ) -> ClientResult<ObjectUri>
    where
        R: AsyncRead + Unpin + Send,
    {
        let source = buffer.name().to_path_buf();
        let result = async {
            let bucket = BucketName::new(bucket)?;
            let key = resolve_key(&source, object_name)?;

            let mut data = Vec::new();
            buffer.into_reader().read_to_end(&mut data).await?;
            self.put(bucket, key, Bytes::from(data)).await
        }
        .await;

        result.inspect_err(|e| {
            error!(source = %source.display(), bucket, error = %e, "failed to upload buffer")
        })
    }

    /// Upload an in-memory payload under an explicit key
    pub async fn upload_bytes(
        &self,
        data: impl Into<Bytes>,
        bucket: &str,
        object_name: &str,
    ) -> ClientResult<ObjectUri> {
        let data = data.into();
        let result = async {
            let bucket = BucketName::new(bucket)?;
            let key = ObjectKey::new(object_name)?;
            self.put(bucket, key, data).await
        }
        .await;

        result.inspect_err(|e| {
            error!(bucket, key = object_name, error = %e, "failed to upload bytes")
        })
    }

    async fn put(&self, bucket: BucketName, key: ObjectKey, data: Bytes) -> ClientResult<ObjectUri> {
        let size = data.len();
        self.objects.put_object(&bucket, &key, data).await?;

        let uri = ObjectUri::new(bucket, key);
        info!(%uri, size, "uploaded object");
        Ok(uri)
    }

    pub async fn delete_object(&self, bucket: &str, object_name: &str) -> ClientResult<DeletedObject> {
        let result = async {
            let bucket = BucketName::new(bucket)?;
            let key = ObjectKey::new(object_name)?;
            self.objects.delete_object(&bucket, &key).await?;
            Ok::<_, ClientError>(DeletedObject { bucket, key })
        }
        .await;

        let deleted = result.inspect_err(|e| {
            error!(bucket, key = object_name, error = %e, "failed to delete object")
        })?;
        info!(bucket, key = object_name, "deleted object");
        Ok(deleted)
    }

    /// Download an object into memory; the returned cursor starts at byte 0
    pub async fn download_object(&self, bucket: &str, object_name: &str) -> ClientResult<ObjectBuffer> {
        let result = async {
            let bucket = BucketName::new(bucket)?;
            let key = ObjectKey::new(object_name)?;
            self.objects.get_object(&bucket, &key).await
        }
        .await;

        let data = result.inspect_err(|e| {
            error!(bucket, key = object_name, error = %e, "failed to download object")
        })?;
        debug!(bucket, key = object_name, size = data.len(), "downloaded object");
        Ok(Cursor::new(data))
    }

    pub async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> ClientResult<Vec<ObjectSummary>> {
        let result = async {
            let bucket = BucketName::new(bucket)?;
            self.objects.list_objects(&bucket, prefix).await
        }
        .await;

        result.inspect_err(|e| error!(bucket, prefix, error = %e, "failed to list objects"))
    }

    /// Presign a GET of the object. `expiration_secs` defaults to one hour.
    pub async fn presigned_download_url(
        &self,
        bucket: &str,
        object_name: &str,
        expiration_secs: Option<u64>,
    ) -> ClientResult<PresignedUrl> {
        self.presign(PresignMethod::Get, bucket, object_name, expiration_secs)
            .await
    }

    /// Presign a single PUT of the object body. `expiration_secs` defaults to one hour.
    pub async fn presigned_put_url(
        &self,
        bucket: &str,
        object_name: &str,
        expiration_secs: Option<u64>,
    ) -> ClientResult<PresignedUrl> {
        self.presign(PresignMethod::Put, bucket, object_name, expiration_secs)
            .await
    }

    async fn presign(
        &self,
        method: PresignMethod,
        bucket: &str,
        object_name: &str,
        expiration_secs: Option<u64>,
    ) -> ClientResult<PresignedUrl> {
        let result = async {
            let signer = self.signer("presign")?;
            let (bucket, key, expiration) = presign_inputs(bucket, object_name, expiration_secs)?;
            signer.presign(method, &bucket, &key, expiration).await
        }
        .await;

        result.inspect_err(|e| {
            error!(%method, bucket, key = object_name, error = %e, "failed to presign URL")
        })
    }

    /// Presign a browser-form POST upload of exactly `object_name`.
    /// `expiration_secs` defaults to one hour.
    pub fn presigned_upload_url(
        &self,
        bucket: &str,
        object_name: &str,
        expiration_secs: Option<u64>,
    ) -> ClientResult<PresignedPost> {
        let result = self.signer("presign_post").and_then(|signer| {
            let (bucket, key, expiration) = presign_inputs(bucket, object_name, expiration_secs)?;
            signer.presign_post(&bucket, &key, expiration)
        });

        result.inspect_err(|e| {
            error!(bucket, key = object_name, error = %e, "failed to presign POST policy")
        })
    }

    fn signer(&self, operation: &str) -> ClientResult<&Arc<dyn UrlSigner>> {
        self.signer
            .as_ref()
            .ok_or_else(|| ClientError::UnsupportedOperation {
                operation: operation.to_string(),
                reason: "backend cannot issue presigned requests".to_string(),
            })
    }
}

fn resolve_key(source: &Path, object_name: Option<&str>) -> ClientResult<ObjectKey> {
    let key = match object_name {
        Some(name) => ObjectKey::new(name)?,
        None => ObjectKey::from_path_basename(source)?,
    };
    Ok(key)
}

fn presign_inputs(
    bucket: &str,
    object_name: &str,
    expiration_secs: Option<u64>,
) -> ClientResult<(BucketName, ObjectKey, Expiration)> {
    let expiration = match expiration_secs {
        Some(seconds) => Expiration::from_secs(seconds)?,
        None => Expiration::default(),
    };
    Ok((BucketName::new(bucket)?, ObjectKey::new(object_name)?, expiration))
}
