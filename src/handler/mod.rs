//! Request handler module
//!
//! Responsible for request routing dispatch: health checks, static assets,
//! and page rendering through the route table and request pipeline.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
