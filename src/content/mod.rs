//! Content module
//!
//! Everything that talks to the external content service:
//! - GraphQL request/response wire types
//! - The `ContentSource` seam and its HTTP implementation
//! - The essay query and its props

mod client;
pub mod essay;
mod graphql;
#[cfg(test)]
pub mod stub;

use thiserror::Error;

pub use client::{ContentSource, HttpContentClient};
pub use essay::{fetch_essay, Essay};
pub use graphql::GraphQlError;

/// Failures below the GraphQL layer
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("content service returned HTTP {0}")]
    Status(u16),
    #[error("content service returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("content service returned a malformed response: {0}")]
    Malformed(String),
}
