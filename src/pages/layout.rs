//! Site layout
//!
//! Document shell shared by every page: head metadata, base styles, the
//! linked header, and the snippets contributed by request steps.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::Document;
use crate::pipeline::PageContext;

pub const SITE_AUTHOR: &str = "Sergio Xalambrí";

/// Palette colors
pub mod palette {
    pub const DARK: &str = "#1a1a1a";
    pub const LIGHT: &str = "#fafafa";
}

const BASE_STYLES: &str = "
*, *::before, *::after {
  box-sizing: border-box;
}

html, body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif;
  line-height: 1.6;
}

header.site-header {
  height: 72px;
  display: flex;
  align-items: center;
  padding: 0 1em;
}

header.site-header a {
  color: inherit;
  text-decoration: none;
  font-weight: 600;
}

.icon-label {
  position: absolute;
  width: 1px;
  height: 1px;
  overflow: hidden;
  clip: rect(0 0 0 0);
}
";

/// Wrap a document in the full HTML page
pub fn render(doc: &Document, ctx: &PageContext) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (doc.title) }
                @if let Some(description) = &doc.description {
                    meta name="description" content=(description);
                }
                meta name="theme-color" content=(palette::DARK);
                link rel="alternate" type="application/atom+xml" title="Feed" href="/atom";
                style { (PreEscaped(BASE_STYLES)) }
                @if let Some(styles) = doc.styles {
                    style { (PreEscaped(styles)) }
                }
                @for snippet in ctx.head() {
                    (snippet)
                }
            }
            body style=(format!("background: {}; color: {};", palette::LIGHT, palette::DARK)) {
                (linked_header())
                main {
                    (doc.body)
                }
                @for script in ctx.scripts() {
                    (script)
                }
            }
        }
    }
    .into_string()
}

/// Header linking back to the home page
pub fn linked_header() -> Markup {
    html! {
        header.site-header {
            a href="/" rel="home" { (SITE_AUTHOR) }
        }
    }
}

/// Named icon with an accessible text label
pub fn icon(name: &str) -> Markup {
    let slug = name.to_ascii_lowercase();
    html! {
        span.icon data-icon=(slug) aria-hidden="true" {}
        span.icon-label { (name) }
    }
}
