mod client_errors;
mod validation_errors;

pub use client_errors::*;
pub use validation_errors::*;
