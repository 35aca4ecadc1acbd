//! Document head rendering
//!
//! Builds the `<head>` element of a documentation page from the site-wide
//! [`HeadConfig`] and the page's own [`DocumentHead`], which usually comes
//! from front-matter.

use crate::config::HeadConfig;
use crate::content::{Attributes, FrontMatter, StyleEntry};
use crate::helpers::{
    full_url_for, html_escape, link_rel, meta_name, meta_property, style_tag, void_tag,
};

/// Head state of a single page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentHead {
    pub title: Option<String>,
    pub description: Option<String>,
    pub meta: Vec<Attributes>,
    pub links: Vec<Attributes>,
    pub styles: Vec<StyleEntry>,
}

impl DocumentHead {
    pub fn from_front_matter(front_matter: &FrontMatter) -> Self {
        Self {
            title: front_matter.title.clone(),
            description: front_matter.description.clone(),
            meta: front_matter.meta.clone(),
            links: front_matter.links.clone(),
            styles: front_matter.styles.clone(),
        }
    }

    /// `"{title} - {site_name}"`, or just the site name for untitled pages
    pub fn full_title(&self, site_name: &str) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => format!("{} - {}", title, site_name),
            _ => site_name.to_string(),
        }
    }
}

fn pairs(attrs: &Attributes) -> impl Iterator<Item = (&str, &str)> {
    attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}

/// Render the `<head>` element for the page served at `pathname`
pub fn render_head(config: &HeadConfig, head: &DocumentHead, pathname: &str) -> String {
    let title = head.full_title(&config.site_name);
    let canonical = full_url_for(&config.url, pathname);

    let mut tags = vec![
        void_tag("meta", [("charset", "utf-8")]),
        format!("<title>{}</title>", html_escape(&title)),
        link_rel("canonical", &canonical),
        meta_name("viewport", "width=device-width"),
        meta_name("apple-mobile-web-app-title", &config.site_name),
        meta_name("application-name", &config.site_name),
        meta_name("theme-color", &config.theme_color),
        void_tag(
            "link",
            [
                ("rel", "apple-touch-icon"),
                ("sizes", "180x180"),
                ("href", config.apple_touch_icon.as_str()),
            ],
        ),
        void_tag(
            "link",
            [
                ("rel", "icon"),
                ("href", config.favicon.as_str()),
                ("type", "image/svg+xml"),
            ],
        ),
    ];

    if config.production {
        tags.push(meta_property("og:site_name", &config.site_name));
        tags.push(meta_property("og:title", &title));
        tags.push(meta_property("og:url", &canonical));
        if let Some(description) = &head.description {
            tags.push(meta_property("og:description", description));
        }
        tags.push(meta_name("twitter:card", "summary_large_image"));
    }

    if let Some(description) = &head.description {
        tags.push(meta_name("description", description));
    }
    tags.extend(head.meta.iter().map(|m| void_tag("meta", pairs(m))));
    tags.extend(head.links.iter().map(|l| void_tag("link", pairs(l))));
    tags.extend(
        head.styles
            .iter()
            .map(|s| style_tag(&s.style, pairs(&s.props))),
    );

    let mut out = String::from("<head>\n");
    for tag in tags {
        out.push_str("  ");
        out.push_str(&tag);
        out.push('\n');
    }
    out.push_str("</head>");
    out
}
