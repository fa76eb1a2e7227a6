mod bucket_name;
mod expiration;
mod object_key;
mod object_uri;

pub use bucket_name::BucketName;
pub use expiration::Expiration;
pub use object_key::ObjectKey;
pub use object_uri::ObjectUri;
