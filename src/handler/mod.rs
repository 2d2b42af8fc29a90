//! Request handler module
//!
//! Routing dispatch for the product endpoints and the liveness check.

mod error;
mod path;
mod products;
pub mod router;

// Re-export main entry point
pub use error::RequestError;
pub use router::handle_request;
