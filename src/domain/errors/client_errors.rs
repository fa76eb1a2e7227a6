use thiserror::Error as ThisError;

use crate::domain::errors::ValidationError;

/// Errors returned by every client operation.
///
/// S3 error codes that callers commonly branch on get their own variant; any
/// other error response is kept verbatim in [`ClientError::Service`].
#[derive(ThisError, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    #[error("Bucket already exists: {bucket}")]
    BucketAlreadyExists { bucket: String },

    #[error("Bucket is not empty: {bucket}")]
    BucketNotEmpty { bucket: String },

    #[error("Object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("S3 service error: {status} {code} - {message}")]
    Service {
        status: http::StatusCode,
        code: String,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Unsupported operation '{operation}': {reason}")]
    UnsupportedOperation { operation: String, reason: String },
}

impl ClientError {
    /// Build the error for an S3 error response from its status and error code.
    pub fn from_s3_code(
        status: http::StatusCode,
        code: &str,
        message: String,
        bucket: Option<&str>,
    ) -> Self {
        let bucket = bucket.unwrap_or_default().to_string();
        match code {
            "NoSuchBucket" => ClientError::BucketNotFound { bucket },
            "BucketAlreadyExists" | "BucketAlreadyOwnedByYou" => {
                ClientError::BucketAlreadyExists { bucket }
            }
            "BucketNotEmpty" => ClientError::BucketNotEmpty { bucket },
            "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" => {
                ClientError::AccessDenied { message }
            }
            _ => ClientError::Service {
                status,
                code: code.to_string(),
                message,
            },
        }
    }

    /// True when the error means the bucket does not exist.
    pub fn is_bucket_not_found(&self) -> bool {
        matches!(self, ClientError::BucketNotFound { .. })
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
