//! S3 XML request and response bodies used by the bucket client

use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::{Deserialize, Serialize};

use crate::domain::{errors::ClientError, models::BucketInfo};

const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

#[derive(Deserialize)]
struct ListAllMyBucketsResult {
    #[serde(rename = "Buckets", default)]
    buckets: BucketList,
}

#[derive(Deserialize, Default)]
struct BucketList {
    #[serde(rename = "Bucket", default)]
    bucket: Vec<BucketEntry>,
}

#[derive(Deserialize)]
struct BucketEntry {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CreationDate", default)]
    creation_date: Option<String>,
}

/// Body of an S3 error response
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct S3ErrorBody {
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename = "CreateBucketConfiguration")]
struct CreateBucketConfiguration<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "LocationConstraint")]
    location_constraint: &'a str,
}

pub fn parse_list_buckets(xml: &str) -> Result<Vec<BucketInfo>, ClientError> {
    let result: ListAllMyBucketsResult =
        from_str(xml).map_err(|e| ClientError::Xml(e.to_string()))?;

    Ok(result
        .buckets
        .bucket
        .into_iter()
        .map(|entry| BucketInfo {
            creation_date: entry.creation_date.as_deref().and_then(parse_timestamp),
            name: entry.name,
        })
        .collect())
}

/// Parse an error body. Returns `None` for empty or non-XML bodies (HEAD
/// responses, proxies answering with HTML).
pub fn parse_error(xml: &str) -> Option<S3ErrorBody> {
    if xml.trim().is_empty() {
        return None;
    }
    from_str::<S3ErrorBody>(xml)
        .ok()
        .filter(|body| !body.code.is_empty())
}

pub fn create_bucket_configuration(region: &str) -> Result<String, ClientError> {
    quick_xml::se::to_string(&CreateBucketConfiguration {
        xmlns: S3_NAMESPACE,
        location_constraint: region,
    })
    .map_err(|e| ClientError::Xml(e.to_string()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
