//! Content-Type lookup by file extension

/// Extensions served from the static directory and their media types
const TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("css", "text/css; charset=utf-8"),
    ("txt", "text/plain; charset=utf-8"),
    ("md", "text/markdown; charset=utf-8"),
    ("xml", "application/xml"),
    ("atom", "application/atom+xml"),
    ("js", "text/javascript; charset=utf-8"),
    ("json", "application/json"),
    ("webmanifest", "application/manifest+json"),
    ("asc", "application/pgp-keys"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("pdf", "application/pdf"),
];

const FALLBACK: &str = "application/octet-stream";

/// Media type for `extension`, matched case-insensitively
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    extension
        .and_then(|ext| {
            TYPES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, media_type)| *media_type)
        })
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_assets() {
        assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(get_content_type(Some("js")), "text/javascript; charset=utf-8");
        assert_eq!(get_content_type(Some("asc")), "application/pgp-keys");
        assert_eq!(get_content_type(Some("SVG")), "image/svg+xml");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), FALLBACK);
        assert_eq!(get_content_type(None), FALLBACK);
    }
}
