pub mod bucket;
pub mod credentials;
pub mod object;
pub mod presigned;

pub use bucket::*;
pub use credentials::*;
pub use object::*;
pub use presigned::*;
