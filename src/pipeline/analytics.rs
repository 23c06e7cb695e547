// Analytics reporting step
// Bootstraps the analytics client and reports a page view for the request

use maud::{html, PreEscaped};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{js_string, PageContext, RequestStep};
use crate::config::AnalyticsConfig;

const LOADER_URL: &str = "https://www.googletagmanager.com/gtag/js";

/// Everything but RFC 3986 unreserved characters
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// No-op unless a tracking id is configured
pub struct Analytics {
    tracking_id: Option<String>,
}

impl Analytics {
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            tracking_id: config
                .tracking_id
                .as_ref()
                .filter(|id| !id.trim().is_empty())
                .cloned(),
        }
    }
}

impl RequestStep for Analytics {
    fn name(&self) -> &'static str {
        "analytics"
    }

    fn apply(&self, ctx: &mut PageContext) {
        let Some(id) = &self.tracking_id else {
            return;
        };

        let loader = format!("{LOADER_URL}?id={}", utf8_percent_encode(id, QUERY_VALUE));
        ctx.push_head(html! {
            script async src=(loader) {}
        });

        let init = format!(
            "window.dataLayer=window.dataLayer||[];\
             function gtag(){{dataLayer.push(arguments);}}\
             gtag('js',new Date());\
             gtag('config',{},{{page_path:{}}});",
            js_string(id),
            js_string(&ctx.path),
        );
        ctx.push_head(html! {
            script { (PreEscaped(init)) }
        });
    }
}
