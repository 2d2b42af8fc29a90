//! HTTP protocol layer module
//!
//! Response builders shared by the product routes and the health endpoint.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_204_response, build_404_response, build_error_response, build_health_response,
    build_json_response,
};
