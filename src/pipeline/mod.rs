//! Page request pipeline
//!
//! Cross-cutting behavior around a page is an explicit, ordered list of
//! steps instead of nested wrappers:
//!
//! 1. every `RequestStep` runs once against the request's `PageContext`,
//!    in the order it was added, before the page loads its props;
//! 2. the page loads its `Props`;
//! 3. `error_boundary` picks the error view, the not-found view, or the
//!    page's own render.

mod analytics;
mod service_worker;

use maud::Markup;
use serde::Serialize;

pub use analytics::Analytics;
pub use service_worker::ServiceWorker;

use crate::config::SiteConfig;
use crate::content::GraphQlError;
use crate::pages::{self, Document};
use crate::routing::{Query, ResolvedRoute};

/// Result of a page's data-fetch hook.
///
/// Serializes without a tag: `Ready` flattens to the page's own fields,
/// `Failed` to exactly `{errors}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Props<T> {
    Ready(T),
    Failed { errors: Vec<GraphQlError> },
    NotFound,
}

/// Per-request state shared by the steps and the page
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Request path as received
    pub path: String,
    /// Page identifier selected by routing
    pub page: String,
    pub query: Query,
    head: Vec<Markup>,
    scripts: Vec<Markup>,
}

impl PageContext {
    pub fn new(path: &str, route: ResolvedRoute) -> Self {
        Self {
            path: path.to_string(),
            page: route.page,
            query: route.query,
            head: Vec::new(),
            scripts: Vec::new(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Add an element to the document `<head>`
    pub fn push_head(&mut self, markup: Markup) {
        self.head.push(markup);
    }

    /// Add a script at the end of `<body>`
    pub fn push_script(&mut self, markup: Markup) {
        self.scripts.push(markup);
    }

    pub fn head(&self) -> &[Markup] {
        &self.head
    }

    pub fn scripts(&self) -> &[Markup] {
        &self.scripts
    }
}

/// A side-effecting initialization step applied once per page request
pub trait RequestStep: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, ctx: &mut PageContext);
}

/// Ordered list of request steps
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn RequestStep>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_step(mut self, step: impl RequestStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Analytics first, then service-worker registration
    pub fn from_config(site: &SiteConfig) -> Self {
        Self::new()
            .with_step(Analytics::from_config(&site.analytics))
            .with_step(ServiceWorker::from_config(&site.service_worker))
    }

    pub fn prepare(&self, ctx: &mut PageContext) {
        for step in &self.steps {
            step.apply(ctx);
        }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }
}

/// Branch on props: errors replace the page entirely
pub fn error_boundary<T>(props: Props<T>, render: impl FnOnce(T) -> Document) -> Document {
    match props {
        Props::Ready(props) => render(props),
        Props::Failed { errors } => pages::error::upstream_error(&errors),
        Props::NotFound => pages::error::not_found(),
    }
}

/// Encode `value` as a JavaScript string literal safe inside `<script>`
fn js_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalyticsConfig, ServiceWorkerConfig};
    use hyper::StatusCode;
    use maud::html;

    struct Marker(&'static str);

    impl RequestStep for Marker {
        fn name(&self) -> &'static str {
            self.0
        }

        fn apply(&self, ctx: &mut PageContext) {
            ctx.push_script(html! { script { (self.0) } });
        }
    }

    fn context() -> PageContext {
        PageContext::new(
            "/essays/documentation",
            ResolvedRoute {
                page: "/essay".to_string(),
                query: Query::from([("slug".to_string(), "documentation".to_string())]),
            },
        )
    }

    #[test]
    fn test_steps_run_in_order() {
        let pipeline = Pipeline::new()
            .with_step(Marker("first"))
            .with_step(Marker("second"));
        let mut ctx = context();
        pipeline.prepare(&mut ctx);

        assert_eq!(pipeline.step_names(), ["first", "second"]);
        let rendered: Vec<String> = ctx.scripts().iter().map(|m| m.0.clone()).collect();
        assert_eq!(rendered, ["<script>first</script>", "<script>second</script>"]);
    }

    #[test]
    fn test_configured_order() {
        let site = SiteConfig {
            static_dir: "static".to_string(),
            analytics: AnalyticsConfig::default(),
            service_worker: ServiceWorkerConfig::default(),
        };
        assert_eq!(
            Pipeline::from_config(&site).step_names(),
            ["analytics", "service-worker"]
        );
    }

    #[test]
    fn test_context_param() {
        let ctx = context();
        assert_eq!(ctx.param("slug"), Some("documentation"));
        assert_eq!(ctx.param("page"), None);
        assert_eq!(ctx.page, "/essay");
    }

    #[test]
    fn test_error_boundary_branches() {
        let page = error_boundary(Props::Ready("body"), |body| {
            Document::new("ok", html! { p { (body) } })
        });
        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.title, "ok");

        let failed: Props<&str> = Props::Failed {
            errors: vec![GraphQlError::from_message("boom")],
        };
        let page = error_boundary(failed, |_| panic!("page must not render"));
        assert_eq!(page.status, StatusCode::BAD_GATEWAY);

        let page = error_boundary(Props::<&str>::NotFound, |_| panic!("page must not render"));
        assert_eq!(page.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_js_string_escapes_script_close() {
        assert_eq!(js_string("a\"b"), r#""a\"b""#);
        assert_eq!(js_string("</script>"), r#""<\/script>""#);
    }
}
