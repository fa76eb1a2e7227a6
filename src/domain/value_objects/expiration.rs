use std::time::Duration;

use crate::domain::errors::ValidationError;

/// Lifetime of a presigned URL or POST policy, in whole seconds.
///
/// SigV4 caps presigned requests at seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Expiration(u64);

impl Expiration {
    pub const MIN_SECONDS: u64 = 1;
    pub const MAX_SECONDS: u64 = 7 * 24 * 60 * 60;
    pub const DEFAULT_SECONDS: u64 = 3600;

    pub fn from_secs(seconds: u64) -> Result<Self, ValidationError> {
        if !(Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds) {
            return Err(ValidationError::ExpirationOutOfRange {
                seconds,
                min: Self::MIN_SECONDS,
                max: Self::MAX_SECONDS,
            });
        }
        Ok(Self(seconds))
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for Expiration {
    fn default() -> Self {
        Self(Self::DEFAULT_SECONDS)
    }
}

impl TryFrom<Duration> for Expiration {
    type Error = ValidationError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        Self::from_secs(value.as_secs())
    }
}
