use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::Expiration;

/// A capability URL for a single GET or PUT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    pub url: String,
    pub expiration: Expiration,
}

/// Target and form fields for a browser-style POST upload.
///
/// Every entry of `fields` has to be sent as a form field alongside the
/// `file` part, which must come last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresignedPost {
    pub url: String,
    pub fields: BTreeMap<String, String>,
    pub expires_at: DateTime<Utc>,
}
