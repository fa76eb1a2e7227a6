use crate::domain::{
    errors::ClientError,
    value_objects::{BucketName, ObjectKey},
};

/// Convert an object_store error raised while working on `bucket/key`
pub fn object_error(err: object_store::Error, bucket: &BucketName, key: &ObjectKey) -> ClientError {
    match err {
        object_store::Error::NotFound { .. } => ClientError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        other => ClientError::ObjectStore(other),
    }
}
