use chrono::{DateTime, Utc};

/// A bucket as reported by the list-buckets call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    /// Names come from the server verbatim and are not re-validated.
    pub name: String,
    pub creation_date: Option<DateTime<Utc>>,
}

/// Outcome of a bucket deletion that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketDeletion {
    /// The bucket existed and was removed.
    Deleted,
    /// There was no bucket with that name; nothing was removed.
    NotFound,
}

impl BucketDeletion {
    pub fn was_deleted(&self) -> bool {
        matches!(self, BucketDeletion::Deleted)
    }
}
