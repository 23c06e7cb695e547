//! About page
//!
//! Fixed bio, social links and support links. Rendering has no inputs.

use maud::{html, Markup};

use super::layout::{self, palette, SITE_AUTHOR};
use super::Document;

/// An outbound profile link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub href: &'static str,
    pub title: &'static str,
    /// Icon name; `None` renders the title as text
    pub icon: Option<&'static str>,
    /// Microformats2 property class
    pub class: &'static str,
}

const fn profile(href: &'static str, title: &'static str, icon: &'static str) -> SocialLink {
    SocialLink {
        href,
        title,
        icon: Some(icon),
        class: "u-url",
    }
}

pub const SOCIAL_LINKS: [SocialLink; 14] = [
    profile("https://sdx.im/twitter", "Twitter", "Twitter"),
    profile("https://sdx.im/medium", "Medium", "Medium"),
    profile("https://sdx.im/gh", "GitHub", "GitHub"),
    profile("https://sdx.im/npm", "npm", "npm"),
    profile("https://sdx.im/cv", "LinkedIn", "LinkedIn"),
    profile("https://sdx.im/instagram", "Instagram", "Instagram"),
    profile("https://sdx.im/steam", "Steam", "Steam"),
    profile("https://sdx.im/yt", "YouTube", "YouTube"),
    profile("https://sdx.im/meetup", "Meetup", "Meetup"),
    profile("https://sdx.im/codepen", "Codepen", "codepen"),
    profile("https://sdx.im/devto", "DevTo", "dev"),
    profile("/atom", "Feed RSS", "RSS"),
    SocialLink {
        href: "mailto:hello@sergiodxa.com",
        title: "Email",
        icon: Some("Email"),
        class: "u-email",
    },
    SocialLink {
        href: "/static/gpg.asc",
        title: "GPG",
        icon: None,
        class: "u-gpg",
    },
];

const PATREON_URL: &str = "https://sdx.im/patreon";
const PAYPAL_URL: &str = "https://paypal.me/sergiodxa/5";

/// Build the scoped stylesheet; the link color comes from the palette
fn styles() -> &'static str {
    use std::sync::OnceLock;
    static STYLES: OnceLock<String> = OnceLock::new();
    STYLES.get_or_init(|| {
        format!(
            "
#about section {{
  margin: 0 auto;
  max-width: 800px;
}}

#about p {{
  margin: 0.5em;
}}

#bio {{
  margin: 0 auto;
  font-size: 2em;
  text-align: center;
}}

#bio p {{
  margin: 0;
}}

#social > ul {{
  display: flex;
  list-style-type: none;
  padding-left: 0;
  font-size: 1.5em;
  justify-content: center;
  flex-wrap: wrap;
}}

#social > ul > li > a {{
  color: {dark};
  text-decoration: none;
  margin: 0.5em;
  display: block;
}}

#about {{
  min-height: calc(100vh - 72px);
  display: flex;
  flex-direction: column;
  justify-content: center;
}}

#paypal {{
  margin: 0 1em;
  text-align: center;
}}

#paypal a {{
  color: {dark};
  text-decoration: underline;
}}

@media (min-width: 720px) {{
  #bio {{
    font-size: 3em;
  }}
}}
",
            dark = palette::DARK
        )
    })
}

fn social_link(link: &SocialLink) -> Markup {
    html! {
        li {
            a href=(link.href) rel="me" title=(link.title) class=(link.class) {
                @match link.icon {
                    Some(name) => { (layout::icon(name)) }
                    None => { (link.title) }
                }
            }
        }
    }
}

fn body() -> Markup {
    html! {
        section #about {
            section #bio .h-card {
                article {
                    p.p-note {
                        "I'm " strong.p-name { (SITE_AUTHOR) } " and I'm "
                        em.p-job-title { "Software Engineer" }
                    }
                }
            }

            section #social {
                ul {
                    @for link in &SOCIAL_LINKS {
                        (social_link(link))
                    }
                }
            }

            section #paypal {
                p {
                    "Do you like my content? "
                    a href=(PATREON_URL) { "Become a Patreon and get some benefits!" }
                    " "
                }
                p {
                    "Or just help me "
                    a href=(PAYPAL_URL) { "buy a coffee" }
                }
            }
        }
    }
}

pub fn render() -> Document {
    Document::new(format!("About {SITE_AUTHOR}"), body()).with_styles(styles())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cache::CachePolicy;
    use crate::pipeline::PageContext;
    use crate::routing::{Query, ResolvedRoute};
    use hyper::StatusCode;

    #[test]
    fn test_render_is_idempotent() {
        let first = render();
        let second = render();
        assert_eq!(first.body.0, second.body.0);
        assert_eq!(first.title, second.title);

        let ctx = PageContext::new(
            "/about",
            ResolvedRoute {
                page: "/about".to_string(),
                query: Query::new(),
            },
        );
        assert_eq!(layout::render(&first, &ctx), layout::render(&second, &ctx));
    }

    #[test]
    fn test_document_metadata() {
        let doc = render();
        assert_eq!(doc.title, "About Sergio Xalambrí");
        assert_eq!(doc.status, StatusCode::OK);
        assert_eq!(doc.cache, CachePolicy::Public(3600));
        assert!(doc.styles.unwrap().contains(palette::DARK));
    }

    #[test]
    fn test_all_social_links_rendered() {
        let html = render().body.into_string();
        for link in &SOCIAL_LINKS {
            assert!(html.contains(&format!("href=\"{}\"", link.href)), "{}", link.href);
            assert!(html.contains(&format!("title=\"{}\"", link.title)));
        }
        assert_eq!(html.matches("rel=\"me\"").count(), SOCIAL_LINKS.len());
        assert!(html.contains(r#"class="u-email""#));
        assert!(html.contains(">GPG</a>"));
    }

    #[test]
    fn test_bio_and_support_links() {
        let html = render().body.into_string();
        assert!(html.contains(r#"<strong class="p-name">Sergio Xalambrí</strong>"#));
        assert!(html.contains(r#"<em class="p-job-title">Software Engineer</em>"#));
        assert!(html.contains(PATREON_URL));
        assert!(html.contains(PAYPAL_URL));
    }
}
