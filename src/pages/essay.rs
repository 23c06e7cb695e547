//! Essay page
//!
//! Fetches the essay named by the `slug` parameter on every request and
//! renders it, or hands its errors to the error boundary.

use chrono::{DateTime, NaiveDate};
use maud::{html, PreEscaped};
use pulldown_cmark::{html as cmark_html, Options, Parser};

use super::Document;
use crate::content::{fetch_essay, ContentSource, Essay};
use crate::http::cache::CachePolicy;
use crate::pipeline::{error_boundary, PageContext, Props};

const ESSAY_STYLES: &str = "
article.h-entry {
  margin: 0 auto;
  max-width: 800px;
  padding: 0 1em 2em;
}

article.h-entry > header h1 {
  margin-bottom: 0.25em;
}

article.h-entry time {
  opacity: 0.7;
}

article.h-entry pre {
  overflow-x: auto;
  padding: 1em;
  background: #2d2d2d;
  color: #f8f8f2;
}
";

/// The page's data-fetch hook
pub async fn initial_props(ctx: &PageContext, content: &dyn ContentSource) -> Props<Essay> {
    fetch_essay(content, ctx.param("slug")).await
}

pub async fn render_page(ctx: &PageContext, content: &dyn ContentSource) -> Document {
    error_boundary(initial_props(ctx, content).await, |essay| render(&essay))
}

/// Essay view
pub fn render(essay: &Essay) -> Document {
    let body = html! {
        article.h-entry {
            header {
                h1.p-name { (essay.title) }
                @if !essay.date.is_empty() {
                    time.dt-published datetime=(essay.date) { (format_date(&essay.date)) }
                }
                @if !essay.description.is_empty() {
                    p.p-summary { (essay.description) }
                }
            }
            div.e-content {
                (PreEscaped(render_markdown(&essay.content)))
            }
        }
    };

    let mut doc = Document::new(essay.title.clone(), body)
        .with_styles(ESSAY_STYLES)
        .with_cache(CachePolicy::NoCache);
    if !essay.description.is_empty() {
        doc = doc.with_description(essay.description.clone());
    }
    doc
}

/// Render Markdown essay content to HTML
pub fn render_markdown(md_content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(md_content, options);
    let mut html_output = String::new();
    cmark_html::push_html(&mut html_output, parser);
    html_output
}

/// Human-readable publication date; unrecognized formats pass through
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%B %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::stub::{sample_essay_response, StubSource};
    use crate::routing::{Query, ResolvedRoute};
    use hyper::StatusCode;
    use serde_json::json;

    fn context(slug: &str) -> PageContext {
        PageContext::new(
            &format!("/essays/{slug}"),
            ResolvedRoute {
                page: "/essay".to_string(),
                query: Query::from([("slug".to_string(), slug.to_string())]),
            },
        )
    }

    #[tokio::test]
    async fn test_success_renders_essay_view() {
        let source = StubSource::json(sample_essay_response("documentation"));
        let doc = render_page(&context("documentation"), &source).await;
        let html = doc.body.into_string();

        assert_eq!(doc.status, StatusCode::OK);
        assert_eq!(doc.title, "Documentation");
        assert_eq!(doc.description.as_deref(), Some("Why documentation matters"));
        assert_eq!(doc.cache, CachePolicy::NoCache);
        assert!(html.contains(r#"<h1 class="p-name">Documentation</h1>"#));
        assert!(html.contains("<em>docs</em>"));
        assert!(html.contains("June 3, 2018"));
    }

    #[tokio::test]
    async fn test_errors_render_error_view_only() {
        let source = StubSource::json(json!({
            "data": {"getEssay": {
                "title": "Partial", "slug": "documentation", "content": "leaked body",
                "date": "", "description": ""
            }},
            "errors": [{"message": "permission denied"}]
        }));
        let doc = render_page(&context("documentation"), &source).await;
        let html = doc.body.into_string();

        assert_eq!(doc.status, StatusCode::BAD_GATEWAY);
        assert!(html.contains("An unexpected error has occurred."));
        assert!(!html.contains("h-entry"));
        assert!(!html.contains("leaked body"));
        assert!(!html.contains("Partial"));
    }

    #[tokio::test]
    async fn test_unknown_essay_renders_not_found() {
        let source = StubSource::json(json!({"data": {"getEssay": null}}));
        let doc = render_page(&context("nope"), &source).await;
        assert_eq!(doc.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_initial_props_reads_slug_from_context() {
        let source = StubSource::json(sample_essay_response("documentation"));
        initial_props(&context("documentation"), &source).await;
        assert_eq!(source.requests()[0]["variables"]["slug"], "documentation");
    }

    #[test]
    fn test_render_skips_empty_metadata() {
        let essay = Essay {
            title: "Untitled".to_string(),
            slug: "untitled".to_string(),
            content: "text".to_string(),
            date: String::new(),
            description: String::new(),
        };
        let doc = render(&essay);
        let html = doc.body.into_string();
        assert!(doc.description.is_none());
        assert!(!html.contains("<time"));
        assert!(!html.contains("p-summary"));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2018-06-03T12:00:00Z"), "June 3, 2018");
        assert_eq!(format_date("2019-11-20"), "November 20, 2019");
        assert_eq!(format_date("last tuesday"), "last tuesday");
    }

    #[test]
    fn test_render_markdown() {
        let html = render_markdown("# Title\n\n~~old~~ | a |\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<del>old</del>"));
    }
}
