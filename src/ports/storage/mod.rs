mod bucket_store;
mod object_backend;
mod url_signer;

pub use bucket_store::BucketStore;
pub use object_backend::ObjectBackend;
pub use url_signer::{PresignMethod, UrlSigner};
