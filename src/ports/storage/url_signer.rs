use async_trait::async_trait;

use crate::domain::{
    errors::ClientResult,
    models::{PresignedPost, PresignedUrl},
    value_objects::{BucketName, Expiration, ObjectKey},
};

/// HTTP method a presigned URL is valid for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresignMethod {
    Get,
    Put,
}

impl std::fmt::Display for PresignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresignMethod::Get => write!(f, "GET"),
            PresignMethod::Put => write!(f, "PUT"),
        }
    }
}

impl From<PresignMethod> for http::Method {
    fn from(method: PresignMethod) -> Self {
        match method {
            PresignMethod::Get => http::Method::GET,
            PresignMethod::Put => http::Method::PUT,
        }
    }
}

/// Port for issuing presigned requests.
///
/// Signing is offline: no request reaches the server until the URL is used.
#[async_trait]
pub trait UrlSigner: Send + Sync + 'static {
    /// Presign a single GET or PUT on an object
    async fn presign(
        &self,
        method: PresignMethod,
        bucket: &BucketName,
        key: &ObjectKey,
        expiration: Expiration,
    ) -> ClientResult<PresignedUrl>;

    /// Build the POST policy form for uploading exactly `key`
    fn presign_post(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        expiration: Expiration,
    ) -> ClientResult<PresignedPost>;
}
