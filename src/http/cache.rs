//! Validators and `Cache-Control` policies
//!
//! Every rendered page and static asset carries an `ETag`; pages pick the
//! policy that matches how fresh their content has to be.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Strong validator for a response body, already quoted
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether an `If-None-Match` value names `etag`.
///
/// Accepts comma-separated lists, weak (`W/`) forms and `*`. Weak
/// comparison is enough for GET and HEAD.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(header) = if_none_match else {
        return false;
    };
    header
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == etag)
}

/// Cache-Control policy attached to each response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u32),
    /// Revalidate on every use
    NoCache,
    /// Never store
    NoStore,
}

impl CachePolicy {
    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
            Self::NoStore => "no-store".to_string(),
        }
    }

    /// Whether a 304 may be answered for this policy
    pub const fn allows_revalidation(self) -> bool {
        !matches!(self, Self::NoStore)
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::Public(3600) // 1 hour
    }
}
