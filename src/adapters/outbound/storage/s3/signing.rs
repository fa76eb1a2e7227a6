//! AWS Signature Version 4 primitives for the requests this crate signs itself
//!
//! Object reads, writes and query-string presigning go through `object_store`;
//! the bucket calls and the POST policy are signed here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::domain::models::Credentials;

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub const SERVICE: &str = "s3";

/// Hex SHA256 of an empty payload
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Returns HMAC-SHA256 of `data` under `key`
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Returns hex encoded SHA256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

pub fn amz_date(time: DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn signer_date(time: DateTime<Utc>) -> String {
    time.format("%Y%m%d").to_string()
}

/// `{date}/{region}/s3/aws4_request`
pub fn scope(time: DateTime<Utc>, region: &str) -> String {
    format!("{}/{}/{}/aws4_request", signer_date(time), region, SERVICE)
}

/// Derives the signing key for a day, region and service
pub fn signing_key(secret_key: &str, time: DateTime<Utc>, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(
        format!("AWS4{}", secret_key).as_bytes(),
        signer_date(time).as_bytes(),
    );
    let date_region_key = hmac_sha256(&date_key, region.as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, service.as_bytes());
    hmac_sha256(&date_region_service_key, b"aws4_request")
}

/// A request about to be signed. Header names must already be lowercase.
#[derive(Debug)]
pub struct CanonicalRequest<'a> {
    pub method: &'a http::Method,
    pub uri: &'a str,
    pub query: &'a str,
    pub headers: &'a BTreeMap<String, String>,
    pub payload_sha256: &'a str,
}

impl CanonicalRequest<'_> {
    pub fn signed_headers(&self) -> String {
        self.headers.keys().cloned().collect::<Vec<_>>().join(";")
    }

    fn to_canonical_string(&self) -> String {
        let canonical_headers: String = self
            .headers
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
            .collect();

        format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            self.method,
            self.uri,
            self.query,
            canonical_headers,
            self.signed_headers(),
            self.payload_sha256
        )
    }
}

/// Returns the `Authorization` header value for `request`
pub fn authorization(
    credentials: &Credentials,
    region: &str,
    time: DateTime<Utc>,
    request: &CanonicalRequest<'_>,
) -> String {
    let scope = scope(time, region);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date(time),
        scope,
        sha256_hex(request.to_canonical_string().as_bytes())
    );
    let key = signing_key(credentials.secret_key(), time, region, SERVICE);
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes()));

    format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM,
        credentials.access_key(),
        scope,
        request.signed_headers(),
        signature
    )
}
