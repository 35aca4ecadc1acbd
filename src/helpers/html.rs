//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the attribute list of a tag, with a leading space per attribute
///
/// Attributes with an empty name are skipped.
pub fn attributes<'a, I>(attrs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (name, value) in attrs {
        if name.is_empty() {
            continue;
        }
        out.push_str(&format!(r#" {}="{}""#, html_escape(name), html_escape(value)));
    }
    out
}

/// Generate a void tag such as `<meta>` or `<link>`
///
/// # Examples
/// ```ignore
/// void_tag("meta", [("name", "theme-color"), ("content", "#0093ee")])
/// // -> <meta name="theme-color" content="#0093ee">
/// ```
pub fn void_tag<'a, I>(name: &str, attrs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    format!("<{}{}>", name, attributes(attrs))
}

/// Generate a `<meta name=... content=...>` tag
pub fn meta_name(name: &str, content: &str) -> String {
    void_tag("meta", [("name", name), ("content", content)])
}

/// Generate a `<meta property=... content=...>` tag
pub fn meta_property(property: &str, content: &str) -> String {
    void_tag("meta", [("property", property), ("content", content)])
}

/// Generate a `<link rel=... href=...>` tag
pub fn link_rel(rel: &str, href: &str) -> String {
    void_tag("link", [("rel", rel), ("href", href)])
}

/// Generate a `<style>` element
///
/// The stylesheet body is written as is; only `</style` is neutralised so
/// the element cannot be closed early.
pub fn style_tag<'a, I>(css: &str, attrs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    format!(
        "<style{}>{}</style>",
        attributes(attrs),
        css.replace("</style", "<\\/style")
    )
}
