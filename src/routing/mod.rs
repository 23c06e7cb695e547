//! Routing module
//!
//! Maps public URL paths to internal pages:
//! - Exact-match route table with literal query parameters
//! - Fallback resolution where the path names the page directly

mod table;

pub use table::{Query, ResolvedRoute, RouteEntry, RouteTable, RouteTableError};
