//! HTTP protocol layer module
//!
//! Response builders, cache validators and MIME detection shared by page
//! rendering and static file serving.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_content_response, build_health_response, build_options_response,
};
