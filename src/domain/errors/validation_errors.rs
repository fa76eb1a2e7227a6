/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyEndsWithSlash,
    ObjectKeyContainsDoubleSlash,
    ObjectKeyRelativeSegment(String),
    UnsupportedObjectKey {
        key: String,
        reason: String,
    },

    // BucketName validation errors
    BucketNameTooShort {
        actual: usize,
        min: usize,
    },
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidStart,
    BucketNameInvalidEnd,
    BucketNameInvalidCharacter(char),
    BucketNameAdjacentSeparators,
    BucketNameLooksLikeIpAddress,

    // Presigned URL validation errors
    ExpirationOutOfRange {
        seconds: u64,
        min: u64,
        max: u64,
    },

    // Upload source validation errors
    MissingSourceName(String),

    // Endpoint / configuration values
    InvalidEndpoint {
        endpoint: String,
        reason: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: {:?}", c)
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyEndsWithSlash => {
                write!(f, "Object key cannot end with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }
            ValidationError::ObjectKeyRelativeSegment(segment) => {
                write!(f, "Object key cannot contain a '{}' segment", segment)
            }
            ValidationError::UnsupportedObjectKey { key, reason } => {
                write!(f, "Object key '{}' cannot be stored: {}", key, reason)
            }

            // BucketName errors
            ValidationError::BucketNameTooShort { actual, min } => {
                write!(
                    f,
                    "Bucket name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidStart => {
                write!(f, "Bucket name must start with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidEnd => {
                write!(f, "Bucket name must end with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only lowercase letters, numbers, hyphens and dots allowed",
                    c
                )
            }
            ValidationError::BucketNameAdjacentSeparators => {
                write!(
                    f,
                    "Bucket name cannot contain '..', '.-' or '-.' sequences"
                )
            }
            ValidationError::BucketNameLooksLikeIpAddress => {
                write!(f, "Bucket name cannot be formatted as an IP address")
            }

            ValidationError::ExpirationOutOfRange { seconds, min, max } => {
                write!(
                    f,
                    "Expiration of {} seconds is out of range ({}..={})",
                    seconds, min, max
                )
            }

            ValidationError::MissingSourceName(source) => {
                write!(
                    f,
                    "Cannot derive an object name from upload source '{}'",
                    source
                )
            }

            ValidationError::InvalidEndpoint { endpoint, reason } => {
                write!(f, "Invalid endpoint '{}': {}", endpoint, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
