//! Static file serving module
//!
//! Serves `/static/*` from the configured directory with MIME detection and
//! `ETag` validation.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::path::Path;
use tokio::fs;

/// URL prefix under which static assets are exposed
pub const STATIC_PREFIX: &str = "/static/";

/// Static assets change only on deploy
const STATIC_CACHE: cache::CachePolicy = cache::CachePolicy::Public(86_400);

/// Serve a file below `STATIC_PREFIX`
pub async fn serve_static(ctx: &RequestContext<'_>, static_dir: &str) -> Response<Full<Bytes>> {
    let Some(relative) = ctx.path.strip_prefix(STATIC_PREFIX) else {
        return http::build_404_response();
    };

    match load_from_directory(static_dir, relative).await {
        Some((content, content_type)) => build_static_file_response(
            content,
            content_type,
            ctx.if_none_match.as_deref(),
            ctx.is_head,
        ),
        None => http::build_404_response(),
    }
}

/// Load `relative` from `static_dir`, refusing anything that resolves outside it
pub async fn load_from_directory(
    static_dir: &str,
    relative: &str,
) -> Option<(Vec<u8>, &'static str)> {
    let relative = relative.trim_start_matches('/');
    if relative.is_empty() || relative.ends_with('/') {
        return None;
    }

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // Missing files are plain 404s
    let file_path = Path::new(static_dir).join(relative).canonicalize().ok()?;
    if !file_path.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            file_path.display()
        ));
        return None;
    }
    if !file_path.is_file() {
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", file_path.display()));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

fn build_static_file_response(
    data: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag, STATIC_CACHE);
    }

    http::build_content_response(
        StatusCode::OK,
        Bytes::from(data),
        content_type,
        &etag,
        STATIC_CACHE,
        is_head,
    )
}
