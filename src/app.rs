use std::sync::Arc;
use std::time::Duration;

use crate::{
    adapters::outbound::storage::{InMemoryStorage, S3BucketClient, S3Config, S3ObjectStoreAdapter},
    domain::{
        errors::{ClientError, ClientResult},
        models::Credentials,
    },
    ports::storage::{BucketStore, ObjectBackend, UrlSigner},
    services::ObjectStoreClient,
};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for an S3-compatible endpoint
#[derive(Clone, bon::Builder)]
pub struct ClientConfig {
    #[builder(into)]
    pub endpoint: String,
    #[builder(into)]
    pub access_key: String,
    #[builder(into)]
    pub secret_key: String,
    #[builder(into, default = DEFAULT_REGION.to_string())]
    pub region: String,
    #[builder(default = S3Config::DEFAULT_TIMEOUT)]
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load settings from `S3_ENDPOINT`, `S3_ACCESS_KEY`, `S3_SECRET_KEY` and
    /// the optional `S3_REGION`
    pub fn from_env() -> ClientResult<Self> {
        let required = |name: &str| {
            std::env::var(name).map_err(|_| ClientError::Configuration {
                message: format!("{} environment variable required", name),
            })
        };

        Ok(Self::builder()
            .endpoint(required("S3_ENDPOINT")?)
            .access_key(required("S3_ACCESS_KEY")?)
            .secret_key(required("S3_SECRET_KEY")?)
            .region(std::env::var("S3_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()))
            .build())
    }

    pub fn to_s3_config(&self) -> ClientResult<S3Config> {
        let config = S3Config::new(
            &self.endpoint,
            Credentials::new(&self.access_key, &self.secret_key),
            &self.region,
        )?;
        Ok(config.with_request_timeout(self.request_timeout))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Storage backend configuration
#[derive(Debug, Clone, Default)]
pub enum StorageBackend {
    #[default]
    InMemory,
    S3(ClientConfig),
}

/// Builder wiring a backend's adapters into an [`ObjectStoreClient`]
#[derive(Debug, Default)]
pub struct ClientBuilder {
    backend: StorageBackend,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an S3 endpoint described by `config`
    pub fn with_config(self, config: ClientConfig) -> Self {
        self.with_storage_backend(StorageBackend::S3(config))
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn build(self) -> ClientResult<ObjectStoreClient> {
        match self.backend {
            StorageBackend::InMemory => Ok(create_in_memory_client()),
            StorageBackend::S3(config) => {
                let s3_config = config.to_s3_config()?;
                let http_client = s3_config.http_client()?;
                let buckets = Arc::new(S3BucketClient::with_http_client(
                    s3_config.clone(),
                    http_client.clone(),
                ));
                let objects = Arc::new(S3ObjectStoreAdapter::with_http_client(s3_config, http_client));

                tracing::debug!(endpoint = %config.endpoint, region = %config.region, "configured S3 client");
                Ok(ObjectStoreClient::from_parts(
                    buckets as Arc<dyn BucketStore>,
                    objects.clone() as Arc<dyn ObjectBackend>,
                    Some(objects as Arc<dyn UrlSigner>),
                ))
            }
        }
    }
}

/// Create an in-memory client for testing and development
pub fn create_in_memory_client() -> ObjectStoreClient {
    let storage = Arc::new(InMemoryStorage::new());
    ObjectStoreClient::from_parts(
        storage.clone() as Arc<dyn BucketStore>,
        storage as Arc<dyn ObjectBackend>,
        None,
    )
}

/// Create an S3-backed client
pub fn create_s3_client(config: ClientConfig) -> ClientResult<ObjectStoreClient> {
    ClientBuilder::new().with_config(config).build()
}

/// Create an S3-backed client from environment variables
pub fn create_client_from_env() -> ClientResult<ObjectStoreClient> {
    create_s3_client(ClientConfig::from_env()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::builder()
            .endpoint("http://localhost:8333")
            .access_key("any")
            .secret_key("any")
            .build()
    }

    #[test]
    fn test_config_defaults() {
        let config = config();
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.request_timeout, S3Config::DEFAULT_TIMEOUT);

        let s3 = config.to_s3_config().unwrap();
        assert_eq!(s3.endpoint_str(), "http://localhost:8333");
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = ClientConfig::builder()
            .endpoint("http://localhost:8333")
            .access_key("any")
            .secret_key("super-secret")
            .build();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_builder_rejects_invalid_endpoint() {
        let config = ClientConfig::builder()
            .endpoint("localhost:8333")
            .access_key("any")
            .secret_key("any")
            .build();

        let result = ClientBuilder::new().with_config(config).build();
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[tokio::test]
    async fn test_in_memory_builder() {
        let client = ClientBuilder::new()
            .with_storage_backend(StorageBackend::InMemory)
            .build()
            .unwrap();

        client.create_bucket("testbucket", None).await.unwrap();
        assert!(client.bucket_exists("testbucket").await.unwrap());
    }

    #[test]
    fn test_s3_builder() {
        assert!(create_s3_client(config()).is_ok());
    }
}
