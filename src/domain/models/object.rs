use std::io::Cursor;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::{BucketName, ObjectKey};

/// In-memory copy of a downloaded object, positioned at the first byte
pub type ObjectBuffer = Cursor<Bytes>;

/// An entry returned by object listing
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub etag: Option<String>,
}

/// Confirmation that a delete request for an object was accepted.
///
/// S3 acknowledges deletes of keys that never existed, so this does not
/// prove the object was there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedObject {
    pub bucket: BucketName,
    pub key: ObjectKey,
}
