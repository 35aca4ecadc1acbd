//! Route pathname helpers

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use std::path::{Component, Path};

use super::fs::normalize_path;
use crate::config::RouteOptions;

/// Characters escaped inside a single pathname segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

lazy_static! {
    static ref URL_SCHEME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").unwrap();
    static ref GROUPED_LAYOUT: Regex = Regex::new(r"^\(.+\)$").unwrap();
}

/// Check if a link targets something inside the site
///
/// External URLs (anything with a scheme such as `https:` or `mailto:`),
/// protocol-relative `//host` links, bare `#fragment` links and empty
/// strings are not same-origin.
pub fn is_same_origin_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || url.starts_with('#') {
        return false;
    }
    if url.starts_with("//") || url.starts_with("\\\\") {
        return false;
    }
    if url.starts_with('/') || url.starts_with('.') {
        return true;
    }
    !URL_SCHEME.is_match(url)
}

/// Directories named `(name)` group routes without adding a URL segment
fn is_grouped_layout_name(segment: &str) -> bool {
    GROUPED_LAYOUT.is_match(segment)
}

/// Join a relative pathname onto the base pathname
///
/// Repeated slashes collapse. Unless the result is the base pathname itself,
/// a trailing slash is added or removed according to `trailing_slash`.
///
/// # Examples
/// ```ignore
/// normalize_pathname("guide//intro", "/docs/", true)  // -> "/docs/guide/intro/"
/// normalize_pathname("guide/", "/", false)            // -> "/guide"
/// ```
pub fn normalize_pathname(pathname: &str, base_pathname: &str, trailing_slash: bool) -> String {
    let relative = pathname
        .trim()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    let mut pathname = format!("{}{}", base_pathname, relative);
    if pathname != base_pathname {
        if trailing_slash {
            if !pathname.ends_with('/') {
                pathname.push('/');
            }
        } else {
            while pathname.len() > 1 && pathname.ends_with('/') {
                pathname.pop();
            }
        }
    }
    pathname
}

/// Map a directory inside the routes directory to its public pathname
///
/// Returns `None` when the directory lies outside the routes directory or
/// is not valid UTF-8.
pub fn dir_path_to_pathname(options: &RouteOptions, dir_path: &Path) -> Option<String> {
    let dir_path = normalize_path(dir_path);
    let relative = dir_path.strip_prefix(&options.routes_dir).ok()?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                let segment = segment.to_str()?;
                if is_grouped_layout_name(segment) {
                    continue;
                }
                segments.push(utf8_percent_encode(segment, PATH_SEGMENT).to_string());
            }
            _ => return None,
        }
    }

    Some(normalize_pathname(
        &segments.join("/"),
        &options.base_pathname,
        options.trailing_slash,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options(base_pathname: &str, trailing_slash: bool) -> RouteOptions {
        RouteOptions {
            routes_dir: PathBuf::from("/site/src/routes"),
            base_pathname: base_pathname.to_string(),
            trailing_slash,
        }
    }

    #[test]
    fn test_same_origin_urls() {
        assert!(is_same_origin_url("./guide/index.md"));
        assert!(is_same_origin_url("../index.md"));
        assert!(is_same_origin_url("/docs/index.md"));
        assert!(is_same_origin_url("guide/index.md"));
        assert!(is_same_origin_url("guide/a:b.md"));
    }

    #[test]
    fn test_external_urls() {
        assert!(!is_same_origin_url("https://example.com/index.md"));
        assert!(!is_same_origin_url("HTTP://example.com"));
        assert!(!is_same_origin_url("mailto:someone@example.com"));
        assert!(!is_same_origin_url("tel:+15555555555"));
        assert!(!is_same_origin_url("javascript:void(0)"));
        assert!(!is_same_origin_url("//cdn.example.com/index.md"));
        assert!(!is_same_origin_url("#section"));
        assert!(!is_same_origin_url(""));
        assert!(!is_same_origin_url("   "));
    }

    #[test]
    fn test_normalize_pathname() {
        assert_eq!(normalize_pathname("", "/", true), "/");
        assert_eq!(normalize_pathname("", "/docs/", false), "/docs/");
        assert_eq!(normalize_pathname("guide//intro", "/docs/", true), "/docs/guide/intro/");
        assert_eq!(normalize_pathname("guide/", "/", false), "/guide");
    }

    #[test]
    fn test_dir_path_to_pathname() {
        let opts = options("/", true);
        assert_eq!(
            dir_path_to_pathname(&opts, Path::new("/site/src/routes")),
            Some("/".to_string())
        );
        assert_eq!(
            dir_path_to_pathname(&opts, Path::new("/site/src/routes/docs/getting-started")),
            Some("/docs/getting-started/".to_string())
        );
    }

    #[test]
    fn test_dir_path_without_trailing_slash() {
        let opts = options("/base/", false);
        assert_eq!(
            dir_path_to_pathname(&opts, Path::new("/site/src/routes/a/b")),
            Some("/base/a/b".to_string())
        );
        assert_eq!(
            dir_path_to_pathname(&opts, Path::new("/site/src/routes")),
            Some("/base/".to_string())
        );
    }

    #[test]
    fn test_grouped_layouts_are_removed() {
        let opts = options("/", true);
        assert_eq!(
            dir_path_to_pathname(&opts, Path::new("/site/src/routes/(docs)/guide/(inner)")),
            Some("/guide/".to_string())
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        let opts = options("/", true);
        assert_eq!(
            dir_path_to_pathname(&opts, Path::new("/site/src/routes/release notes/café")),
            Some("/release%20notes/caf%C3%A9/".to_string())
        );
    }

    #[test]
    fn test_dir_outside_routes() {
        let opts = options("/", true);
        assert_eq!(dir_path_to_pathname(&opts, Path::new("/site/src")), None);
        assert_eq!(
            dir_path_to_pathname(&opts, Path::new("/site/src/routes/../other")),
            None
        );
    }
}
