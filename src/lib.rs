pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - errors, models and value objects
pub use domain::{
    // Models
    BucketDeletion,
    BucketInfo,
    // Value objects
    BucketName,
    // Errors
    ClientError,
    ClientResult,
    Credentials,
    DeletedObject,
    Expiration,
    ObjectBuffer,
    ObjectKey,
    ObjectSummary,
    ObjectUri,
    PresignedPost,
    PresignedUrl,
    ValidationError,
};

// Port types - interfaces the client depends on
pub use ports::{BucketStore, ObjectBackend, PresignMethod, UrlSigner};

// The client façade
pub use services::{NamedBuffer, ObjectStoreClient};

// Client factory and configuration
pub use app::{
    ClientBuilder, ClientConfig, DEFAULT_REGION, StorageBackend, create_client_from_env,
    create_in_memory_client, create_s3_client,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{
    ApacheObjectStoreAdapter, InMemoryStorage, S3BucketClient, S3Config, S3ObjectStoreAdapter,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        BucketDeletion, ClientBuilder, ClientConfig, ClientError, ClientResult, NamedBuffer,
        ObjectStoreClient, PresignedPost, PresignedUrl, create_client_from_env,
        create_in_memory_client, create_s3_client,
    };
}
