//! URL helper functions

/// Generate a full URL from a site origin and a route pathname
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com/", "/docs/") // -> "https://example.com/docs/"
/// ```
pub fn full_url_for(origin: &str, pathname: &str) -> String {
    let base = origin.trim_end_matches('/');
    if pathname.starts_with('/') {
        format!("{}{}", base, pathname)
    } else {
        format!("{}/{}", base, pathname)
    }
}
