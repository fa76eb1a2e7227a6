use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    adapters::outbound::storage::s3::{
        S3Config,
        signing::{self, CanonicalRequest},
        xml,
    },
    domain::{
        errors::{ClientError, ClientResult},
        models::BucketInfo,
        value_objects::BucketName,
    },
    ports::storage::BucketStore,
};

/// Signed HTTP client for the bucket-level S3 calls
#[derive(Clone, Debug)]
pub struct S3BucketClient {
    config: S3Config,
    http_client: Client,
}

impl S3BucketClient {
    pub fn new(config: S3Config) -> ClientResult<Self> {
        let http_client = config.http_client()?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Reuse an existing connection pool
    pub fn with_http_client(config: S3Config, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Path-style URL of a bucket, or of the service root
    fn url_for(&self, bucket: Option<&BucketName>) -> Url {
        let mut url = self.config.endpoint.clone();
        url.set_path(&canonical_uri(bucket));
        url
    }

    /// `host[:port]` as reqwest will send it
    fn host_header(&self) -> String {
        let host = self.config.endpoint.host_str().unwrap_or_default();
        match self.config.endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Sign and execute a request, turning S3 error responses into errors
    async fn execute(
        &self,
        method: http::Method,
        bucket: Option<&BucketName>,
        body: Bytes,
    ) -> ClientResult<reqwest::Response> {
        let now = Utc::now();
        let uri = canonical_uri(bucket);
        let payload_sha256 = signing::sha256_hex(&body);

        let mut headers = BTreeMap::new();
        headers.insert("host".to_string(), self.host_header());
        headers.insert("x-amz-content-sha256".to_string(), payload_sha256.clone());
        headers.insert("x-amz-date".to_string(), signing::amz_date(now));

        let authorization = signing::authorization(
            &self.config.credentials,
            &self.config.region,
            now,
            &CanonicalRequest {
                method: &method,
                uri: &uri,
                query: "",
                headers: &headers,
                payload_sha256: &payload_sha256,
            },
        );

        debug!(%method, %uri, "sending signed bucket request");

        // reqwest derives Host from the URL itself
        let mut request = self.http_client.request(method, self.url_for(bucket));
        for (name, value) in headers.iter().filter(|(name, _)| name.as_str() != "host") {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request
            .header(http::header::AUTHORIZATION, authorization)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let bucket_name = bucket.map(BucketName::as_str);
        Err(match xml::parse_error(&text) {
            Some(body) => ClientError::from_s3_code(status, &body.code, body.message, bucket_name),
            None if status == http::StatusCode::NOT_FOUND && bucket.is_some() => {
                ClientError::BucketNotFound {
                    bucket: bucket_name.unwrap_or_default().to_string(),
                }
            }
            None if status == http::StatusCode::FORBIDDEN => ClientError::AccessDenied {
                message: status.to_string(),
            },
            None => ClientError::Service {
                status,
                code: String::new(),
                message: text,
            },
        })
    }
}

fn canonical_uri(bucket: Option<&BucketName>) -> String {
    match bucket {
        // Bucket names are restricted to URI-safe characters
        Some(bucket) => format!("/{}", bucket),
        None => "/".to_string(),
    }
}

#[async_trait]
impl BucketStore for S3BucketClient {
    async fn list_buckets(&self) -> ClientResult<Vec<BucketInfo>> {
        let response = self.execute(http::Method::GET, None, Bytes::new()).await?;
        let body = response.text().await?;
        xml::parse_list_buckets(&body)
    }

    async fn create_bucket(&self, name: &BucketName, region: Option<&str>) -> ClientResult<()> {
        // us-east-1 is the implicit location and must not be sent as a constraint
        let body = match region {
            Some(region) if region != "us-east-1" => {
                Bytes::from(xml::create_bucket_configuration(region)?)
            }
            _ => Bytes::new(),
        };

        self.execute(http::Method::PUT, Some(name), body).await?;
        Ok(())
    }

    async fn delete_bucket(&self, name: &BucketName) -> ClientResult<()> {
        self.execute(http::Method::DELETE, Some(name), Bytes::new())
            .await?;
        Ok(())
    }

    async fn bucket_exists(&self, name: &BucketName) -> ClientResult<bool> {
        match self.execute(http::Method::HEAD, Some(name), Bytes::new()).await {
            Ok(_) => Ok(true),
            Err(ClientError::BucketNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
