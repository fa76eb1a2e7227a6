mod object_store_client;
mod upload_source;

pub use object_store_client::ObjectStoreClient;
pub use upload_source::NamedBuffer;
