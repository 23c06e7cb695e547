//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! route resolution and page dispatch.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, cache};
use crate::logger::{self, AccessLogEntry};
use crate::pages::{self, layout, PageKind};
use crate::pipeline::PageContext;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{HeaderMap, Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    logger::log_request(method, uri, req.version());

    let mut page = None;
    let mut response = if let Some(resp) = check_http_method(method, state.config.http.enable_cors)
    {
        resp
    } else if let Some(resp) = check_body_size(req.headers(), state.config.http.max_body_size) {
        resp
    } else {
        logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

        let ctx = RequestContext {
            path: uri.path(),
            query: uri.query(),
            is_head: *method == Method::HEAD,
            if_none_match: header_value(req.headers(), "if-none-match"),
        };

        let (resp, routed_page) = route_request(&ctx, &state).await;
        page = routed_page;
        resp
    };

    apply_common_headers(&mut response, &state);

    if state.access_log() {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.page = page;
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.referer = header_value(req.headers(), "referer");
        entry.user_agent = header_value(req.headers(), "user-agent");
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Route request: health, static assets, then pages.
///
/// Returns the response and the page identifier it was routed to.
async fn route_request(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> (Response<Full<Bytes>>, Option<String>) {
    // Health check endpoints (highest priority, always fast)
    let health = &state.config.routes.health;
    if health.enabled && (ctx.path == health.liveness_path || ctx.path == health.readiness_path) {
        return (http::build_health_response("ok"), None);
    }

    if ctx.path.starts_with(static_files::STATIC_PREFIX) {
        return (
            static_files::serve_static(ctx, &state.config.site.static_dir).await,
            None,
        );
    }

    let route = state.routes.resolve(ctx.path, ctx.query);
    let page = route.page.clone();
    let mut page_ctx = PageContext::new(ctx.path, route);
    state.pipeline.prepare(&mut page_ctx);

    let document = match PageKind::for_page(&page_ctx.page) {
        Some(kind) => pages::render_page(kind, &page_ctx, state.content.as_ref()).await,
        None => {
            logger::log_debug(&format!("No page registered for '{page}' ({})", ctx.path));
            pages::error::not_found()
        }
    };

    let html = layout::render(&document, &page_ctx);
    let etag = cache::generate_etag(html.as_bytes());

    if document.cache.allows_revalidation()
        && document.status.is_success()
        && cache::check_etag_match(ctx.if_none_match.as_deref(), &etag)
    {
        return (http::build_304_response(&etag, document.cache), Some(page));
    }

    let response = http::build_content_response(
        document.status,
        Bytes::from(html),
        HTML_CONTENT_TYPE,
        &etag,
        document.cache,
        ctx.is_head,
    );
    (response, Some(page))
}

/// `Server` and CORS headers shared by every response
fn apply_common_headers(response: &mut Response<Full<Bytes>>, state: &AppState) {
    let headers = response.headers_mut();
    if let Ok(value) = state.config.http.server_name.parse() {
        headers.insert(hyper::header::SERVER, value);
    }
    if state.config.http.enable_cors {
        headers.insert(
            hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN,
            hyper::header::HeaderValue::from_static("*"),
        );
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
