//! Presigned POST policies for browser form uploads
//!
//! See <https://docs.aws.amazon.com/AmazonS3/latest/API/sigv4-HTTPPOSTConstructPolicy.html>.

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

use crate::{
    adapters::outbound::storage::s3::signing,
    domain::{
        models::{Credentials, PresignedPost},
        value_objects::{BucketName, Expiration, ObjectKey},
    },
};

/// Policy allowing a single POST upload of `key` into `bucket`
#[derive(Debug, Clone)]
pub struct PostPolicy {
    bucket: BucketName,
    key: ObjectKey,
    expires_at: DateTime<Utc>,
}

impl PostPolicy {
    pub fn new(bucket: BucketName, key: ObjectKey, signed_at: DateTime<Utc>, expiration: Expiration) -> Self {
        // Expiration is capped at seven days, the cast cannot overflow
        let expires_at = signed_at + Duration::seconds(expiration.as_secs() as i64);
        Self {
            bucket,
            key,
            expires_at,
        }
    }

    fn credential(credentials: &Credentials, signed_at: DateTime<Utc>, region: &str) -> String {
        format!(
            "{}/{}",
            credentials.access_key(),
            signing::scope(signed_at, region)
        )
    }

    fn document(&self, credential: &str, amz_date: &str) -> Value {
        json!({
            "expiration": self.expires_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            "conditions": [
                { "bucket": self.bucket.as_str() },
                { "key": self.key.as_str() },
                { "x-amz-algorithm": signing::ALGORITHM },
                { "x-amz-credential": credential },
                { "x-amz-date": amz_date },
            ],
        })
    }

    /// Sign the policy and produce the form a client has to submit to `url`
    pub fn sign(
        &self,
        url: String,
        credentials: &Credentials,
        region: &str,
        signed_at: DateTime<Utc>,
    ) -> PresignedPost {
        let credential = Self::credential(credentials, signed_at, region);
        let amz_date = signing::amz_date(signed_at);
        let policy = STANDARD.encode(self.document(&credential, &amz_date).to_string());

        let key = signing::signing_key(credentials.secret_key(), signed_at, region, signing::SERVICE);
        let signature = hex::encode(signing::hmac_sha256(&key, policy.as_bytes()));

        let mut fields = BTreeMap::new();
        fields.insert("key".to_string(), self.key.to_string());
        fields.insert("x-amz-algorithm".to_string(), signing::ALGORITHM.to_string());
        fields.insert("x-amz-credential".to_string(), credential);
        fields.insert("x-amz-date".to_string(), amz_date);
        fields.insert("policy".to_string(), policy);
        fields.insert("x-amz-signature".to_string(), signature);

        PresignedPost {
            url,
            fields,
            expires_at: self.expires_at,
        }
    }
}
