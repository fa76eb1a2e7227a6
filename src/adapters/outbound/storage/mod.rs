// Infrastructure error conversion
pub mod error;

// Storage implementations
pub mod apache_object_store_adapter;
pub mod in_memory_storage;

// Provider-specific implementations
pub mod s3;

// Re-export key types
pub use apache_object_store_adapter::ApacheObjectStoreAdapter;
pub use in_memory_storage::InMemoryStorage;
pub use s3::{S3BucketClient, S3Config, S3ObjectStoreAdapter};
