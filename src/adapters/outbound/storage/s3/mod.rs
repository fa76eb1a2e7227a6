//! S3 storage adapters
//!
//! Object I/O and GET/PUT presigning use the `object_store` crate; bucket
//! calls and POST policies are signed by this module.

pub mod bucket;
pub mod post_policy;
pub mod s3_adapter;
pub mod signing;
pub mod xml;

pub use bucket::S3BucketClient;
pub use s3_adapter::S3ObjectStoreAdapter;

use object_store::{
    aws::{AmazonS3, AmazonS3Builder},
    client::{ClientOptions, HttpClient, HttpConnector},
};
use reqwest::{Client, Url};
use std::time::Duration;

use crate::domain::{
    errors::{ClientResult, ValidationError},
    models::Credentials,
    value_objects::BucketName,
};

/// Connection settings shared by the S3 adapters
#[derive(Debug, Clone)]
pub struct S3Config {
    pub endpoint: Url,
    pub credentials: Credentials,
    pub region: String,
    pub request_timeout: Duration,
}

impl S3Config {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        endpoint: &str,
        credentials: Credentials,
        region: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(endpoint).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        if url.path() != "/" || url.query().is_some() {
            return Err(invalid("endpoint must not carry a path or query"));
        }

        Ok(Self {
            endpoint: url,
            credentials,
            region: region.into(),
            request_timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Endpoint without the trailing slash `Url` always keeps
    pub fn endpoint_str(&self) -> &str {
        self.endpoint.as_str().trim_end_matches('/')
    }

    /// `{endpoint}/{bucket}`
    pub fn bucket_url(&self, bucket: &BucketName) -> String {
        format!("{}/{}", self.endpoint_str(), bucket)
    }

    /// HTTP client honouring the request timeout
    pub fn http_client(&self) -> ClientResult<Client> {
        Ok(Client::builder().timeout(self.request_timeout).build()?)
    }
}

/// Connector handing every store the same pooled HTTP client
#[derive(Debug, Clone)]
pub struct SharedHttpConnector(HttpClient);

impl SharedHttpConnector {
    pub fn new(client: Client) -> Self {
        Self(HttpClient::new(client))
    }
}

impl HttpConnector for SharedHttpConnector {
    fn connect(&self, _options: &ClientOptions) -> object_store::Result<HttpClient> {
        Ok(self.0.clone())
    }
}

/// Create an S3 store for one bucket from explicit configuration.
///
/// Only the supplied credentials are used; nothing is read from the
/// environment or instance metadata. Building a store does no I/O.
pub fn create_s3_store(
    config: &S3Config,
    bucket: &BucketName,
    connector: &SharedHttpConnector,
) -> ClientResult<AmazonS3> {
    let store = AmazonS3Builder::new()
        .with_endpoint(config.endpoint_str())
        .with_bucket_name(bucket.as_str())
        .with_region(&config.region)
        .with_access_key_id(config.credentials.access_key())
        .with_secret_access_key(config.credentials.secret_key())
        .with_allow_http(config.endpoint.scheme() == "http")
        .with_virtual_hosted_style_request(false)
        .with_http_connector(connector.clone())
        .build()?;

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("any", "any")
    }

    #[test]
    fn test_config_accepts_http_and_https() {
        let config = S3Config::new("http://localhost:8333", credentials(), "us-east-1").unwrap();
        assert_eq!(config.endpoint_str(), "http://localhost:8333");
        assert_eq!(config.request_timeout, S3Config::DEFAULT_TIMEOUT);

        let config = S3Config::new("https://s3.example.com/", credentials(), "eu-west-1").unwrap();
        assert_eq!(config.endpoint_str(), "https://s3.example.com");
    }

    #[test]
    fn test_config_rejects_bad_endpoints() {
        for endpoint in ["localhost:8333", "ftp://files.example.com", "http://host/prefix", ""] {
            assert!(
                matches!(
                    S3Config::new(endpoint, credentials(), "us-east-1"),
                    Err(ValidationError::InvalidEndpoint { .. })
                ),
                "endpoint {:?} should be rejected",
                endpoint
            );
        }
    }

    #[test]
    fn test_bucket_url() {
        let config = S3Config::new("http://localhost:8333", credentials(), "us-east-1").unwrap();
        let bucket = BucketName::new("testbucket").unwrap();
        assert_eq!(config.bucket_url(&bucket), "http://localhost:8333/testbucket");
    }

    #[test]
    fn test_create_s3_store() {
        let config = S3Config::new("http://localhost:8333", credentials(), "us-east-1").unwrap();
        let bucket = BucketName::new("testbucket").unwrap();
        let connector = SharedHttpConnector::new(config.http_client().unwrap());
        assert!(create_s3_store(&config, &bucket, &connector).is_ok());
    }
}
