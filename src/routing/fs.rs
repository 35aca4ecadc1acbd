//! Pure path helpers
//!
//! Nothing in here touches the file system. Paths are resolved lexically so
//! the same link text always maps to the same file path.

use std::path::{Component, Path, PathBuf};

/// Markdown extensions recognised as routable content
pub const MARKDOWN_EXTS: &[&str] = &[".md", ".mdx"];

/// Get the lowercased extension of a file name, including the leading dot
///
/// Returns an empty string when there is no extension. Any query string or
/// fragment is ignored, and `.d.ts` is reported as a single extension.
///
/// # Examples
/// ```ignore
/// get_extension("Guide.MD")     // -> ".md"
/// get_extension("types.d.ts")   // -> ".d.ts"
/// get_extension("README")       // -> ""
/// ```
pub fn get_extension(file_name: &str) -> String {
    let name = file_name.trim().to_lowercase();
    let name = name.split(['?', '#']).next().unwrap_or_default();
    let name = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut parts: Vec<&str> = name.split('.').collect();
    if parts.len() < 2 {
        return String::new();
    }

    let ext = parts.pop().unwrap_or_default();
    if ext == "ts" && parts.last() == Some(&"d") && parts.len() > 1 {
        return ".d.ts".to_string();
    }
    format!(".{}", ext)
}

/// Check if an extension (as returned by [`get_extension`]) is markdown
pub fn is_markdown_ext(ext: &str) -> bool {
    MARKDOWN_EXTS.contains(&ext)
}

/// Check if a path points at a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| is_markdown_ext(&get_extension(n)))
        .unwrap_or(false)
}

/// Strip an extension previously returned by [`get_extension`]
pub fn remove_extension<'a>(file_name: &'a str, ext: &str) -> &'a str {
    if ext.is_empty() || file_name.len() < ext.len() {
        return file_name;
    }
    let split = file_name.len() - ext.len();
    if file_name.is_char_boundary(split) && file_name[split..].eq_ignore_ascii_case(ext) {
        &file_name[..split]
    } else {
        file_name
    }
}

/// Lexically normalize a path, resolving `.` and `..` components
///
/// `..` never climbs above the root of an absolute path. Leading `..`
/// components of a relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }

    components.iter().map(|c| c.as_os_str()).collect()
}

/// Resolve a slash separated link path against a base directory
///
/// Empty segments (from repeated or leading slashes) are discarded, so an
/// absolute link path such as `/guide/index.md` is joined under `base_dir`.
pub fn resolve_link_path(base_dir: &Path, link_path: &str) -> PathBuf {
    let mut resolved = base_dir.to_path_buf();
    for segment in link_path.split(['/', '\\']).filter(|s| !s.is_empty()) {
        resolved.push(segment);
    }
    normalize_path(&resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension("index.md"), ".md");
        assert_eq!(get_extension("Index.MDX"), ".mdx");
        assert_eq!(get_extension("types.d.ts"), ".d.ts");
        assert_eq!(get_extension("README"), "");
        assert_eq!(get_extension("../guide/index.md"), ".md");
        assert_eq!(get_extension("../guide/README"), "");
        assert_eq!(get_extension("page.md?tab=1"), ".md");
    }

    #[test]
    fn test_is_markdown_ext() {
        assert!(is_markdown_ext(".md"));
        assert!(is_markdown_ext(".mdx"));
        assert!(!is_markdown_ext(".markdown"));
        assert!(!is_markdown_ext(".tsx"));
        assert!(!is_markdown_ext(""));
    }

    #[test]
    fn test_remove_extension() {
        assert_eq!(remove_extension("index.md", ".md"), "index");
        assert_eq!(remove_extension("Layout.TSX", ".tsx"), "Layout");
        assert_eq!(remove_extension("menu", ""), "menu");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/docs/a/./b/../c.md")),
            PathBuf::from("/docs/a/c.md")
        );
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize_path(Path::new("../a/../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_resolve_link_path() {
        let base = Path::new("/docs/a");
        assert_eq!(
            resolve_link_path(base, "./foo.md"),
            PathBuf::from("/docs/a/foo.md")
        );
        assert_eq!(
            resolve_link_path(base, "../b//c/index.md"),
            PathBuf::from("/docs/b/c/index.md")
        );
        assert_eq!(
            resolve_link_path(Path::new("/docs"), "/a/foo.md"),
            PathBuf::from("/docs/a/foo.md")
        );
    }
}
