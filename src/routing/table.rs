//! Route table module
//!
//! Static exact-match mapping from a public URL path to an internal page
//! identifier plus literal query parameters. Built once at startup and
//! never modified afterwards.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Query parameters attached to a page, ordered for stable output
pub type Query = BTreeMap<String, String>;

/// One configured route: `path` -> (`page`, `query`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    pub page: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: Query,
}

/// Page selected for a request path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub page: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query: Query,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
    #[error("route path must start with '/': {0:?}")]
    InvalidPath(String),
}

/// Immutable exact-match route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: HashMap<String, ResolvedRoute>,
}

impl RouteTable {
    /// Built-in entries followed by `extra`; any repeated path is rejected
    pub fn new(extra: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        Self::from_entries(builtin_entries().into_iter().chain(extra))
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = RouteEntry>,
    ) -> Result<Self, RouteTableError> {
        let mut table = HashMap::new();
        for entry in entries {
            if !entry.path.starts_with('/') {
                return Err(RouteTableError::InvalidPath(entry.path));
            }
            if table.contains_key(&entry.path) {
                return Err(RouteTableError::DuplicatePath(entry.path));
            }
            table.insert(
                entry.path,
                ResolvedRoute {
                    page: entry.page,
                    query: entry.query,
                },
            );
        }
        Ok(Self { entries: table })
    }

    /// Exact path lookup
    pub fn lookup(&self, path: &str) -> Option<&ResolvedRoute> {
        self.entries.get(path)
    }

    /// Resolve a request to a page.
    ///
    /// A table hit wins outright and the request's own query string is
    /// ignored. On a miss the path itself names the page and the query
    /// string supplies the parameters.
    pub fn resolve(&self, path: &str, raw_query: Option<&str>) -> ResolvedRoute {
        self.lookup(path).cloned().unwrap_or_else(|| ResolvedRoute {
            page: path.to_string(),
            query: raw_query.map(parse_query).unwrap_or_default(),
        })
    }

    /// Table paths in sorted order
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Routes shipped with the site
pub fn builtin_entries() -> Vec<RouteEntry> {
    vec![
        page_route("/", "/"),
        page_route("/essays", "/essays"),
        essay_route("an-accessible-approach-to-frontend-testing"),
        essay_route("documentation"),
    ]
}

fn page_route(path: &str, page: &str) -> RouteEntry {
    RouteEntry {
        path: path.to_string(),
        page: page.to_string(),
        query: Query::new(),
    }
}

fn essay_route(slug: &str) -> RouteEntry {
    RouteEntry {
        path: format!("/essays/{slug}"),
        page: "/essay".to_string(),
        query: Query::from([("slug".to_string(), slug.to_string())]),
    }
}

/// Parse an `application/x-www-form-urlencoded` query string.
///
/// Later duplicates overwrite earlier ones; pairs that do not decode as
/// UTF-8 are skipped.
pub fn parse_query(raw: &str) -> Query {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}
