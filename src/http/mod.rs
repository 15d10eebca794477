//! HTTP protocol layer module
//!
//! Header policy, MIME detection, date handling and response builders,
//! independent of how requests are routed.

pub mod isolation;
pub mod mime;
pub mod modified;
pub mod response;

// Re-export commonly used types
pub use isolation::apply_isolation_headers;
pub use response::{
    build_304_response, build_404_response, build_501_response, build_directory_redirect,
    build_file_response, HttpResponse,
};
