//! Generic error views
//!
//! Neither view shows anything from the failed page; upstream error details
//! go to the error log only.

use hyper::StatusCode;
use maud::html;

use super::Document;
use crate::content::GraphQlError;
use crate::http::cache::CachePolicy;
use crate::logger;

const ERROR_STYLES: &str = "
#error {
  min-height: calc(100vh - 72px);
  display: flex;
  align-items: center;
  justify-content: center;
  text-align: center;
}

#error h1 {
  font-size: 1.5em;
  font-weight: 500;
}
";

fn error_document(status: StatusCode, message: &str) -> Document {
    let code = status.as_u16();
    Document::new(
        format!("{code}: {message}"),
        html! {
            section #error {
                div {
                    @if status.is_client_error() {
                        h2 { (code) }
                    }
                    h1 { (message) }
                }
            }
        },
    )
    .with_status(status)
    .with_styles(ERROR_STYLES)
    .with_cache(CachePolicy::NoStore)
}

/// Replaces a page whose data fetch reported errors
pub fn upstream_error(errors: &[GraphQlError]) -> Document {
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    logger::log_warning(&format!(
        "Rendering error view for {} upstream error(s): {}",
        errors.len(),
        messages.join("; ")
    ));
    error_document(StatusCode::BAD_GATEWAY, "An unexpected error has occurred.")
}

/// No page for the request, or the requested content does not exist
pub fn not_found() -> Document {
    error_document(StatusCode::NOT_FOUND, "This page could not be found.")
}
