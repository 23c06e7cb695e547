//! Pages module
//!
//! Each page turns a `PageContext` into a `Document`; `layout` wraps the
//! document in the site shell. Pages are registered by identifier, the same
//! identifiers the route table points at.

pub mod about;
pub mod error;
pub mod essay;
pub mod layout;

use hyper::StatusCode;
use maud::Markup;

use crate::content::ContentSource;
use crate::http::cache::CachePolicy;
use crate::pipeline::PageContext;

/// Rendered page content before the layout is applied
#[derive(Debug, Clone)]
pub struct Document {
    pub status: StatusCode,
    pub title: String,
    pub description: Option<String>,
    /// Page-scoped stylesheet
    pub styles: Option<&'static str>,
    pub body: Markup,
    pub cache: CachePolicy,
}

impl Document {
    pub fn new(title: impl Into<String>, body: Markup) -> Self {
        Self {
            status: StatusCode::OK,
            title: title.into(),
            description: None,
            styles: None,
            body,
            cache: CachePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: &'static str) -> Self {
        self.styles = Some(styles);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }
}

/// Pages served by this site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    About,
    Essay,
}

impl PageKind {
    /// Look up a page by the identifier used in the route table
    pub fn for_page(page: &str) -> Option<Self> {
        match page {
            "/about" => Some(Self::About),
            "/essay" => Some(Self::Essay),
            _ => None,
        }
    }
}

/// Load props and render the page's document
pub async fn render_page(
    kind: PageKind,
    ctx: &PageContext,
    content: &dyn ContentSource,
) -> Document {
    match kind {
        PageKind::About => about::render(),
        PageKind::Essay => essay::render_page(ctx, content).await,
    }
}
