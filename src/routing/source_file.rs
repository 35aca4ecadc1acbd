//! Source file classification
//!
//! Only some file names inside the routes directory produce something the
//! router knows about. An `index.md` becomes a page, a `layout.tsx` wraps
//! pages, and so on. Every other file (partials, includes, plain `notes.md`)
//! is ignored by the router.

use lazy_static::lazy_static;
use regex::Regex;

use super::fs::{get_extension, is_markdown_ext, remove_extension};

const PAGE_MODULE_EXTS: &[&str] = &[".tsx", ".jsx"];
const MODULE_EXTS: &[&str] = &[".ts", ".js"];

lazy_static! {
    static ref INDEX_NAME: Regex = Regex::new(r"^index(!|@.+)?$").unwrap();
    static ref LAYOUT_NAME: Regex = Regex::new(r"^layout(!|-.+)?$").unwrap();
}

/// What a routed source file contributes to the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFileKind {
    /// A page or error page
    Route,
    Layout,
    Entry,
    /// A `menu.md` navigation file
    Menu,
    ServiceWorker,
}

/// A file name the router recognises
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub kind: SourceFileKind,
    /// File name without its extension
    pub extless_name: String,
    /// Lowercased extension including the dot
    pub ext: String,
}

impl SourceFile {
    /// Whether this file produces a page with its own pathname
    pub fn is_page(&self) -> bool {
        self.kind == SourceFileKind::Route
    }
}

/// Look up the source file a base file name represents
///
/// # Examples
/// ```ignore
/// get_source_file("index.md")   // -> Some(Route)
/// get_source_file("menu.md")    // -> Some(Menu)
/// get_source_file("partial.md") // -> None
/// ```
pub fn get_source_file(file_name: &str) -> Option<SourceFile> {
    let ext = get_extension(file_name);
    let extless_name = remove_extension(file_name, &ext);

    let is_page_module = PAGE_MODULE_EXTS.contains(&ext.as_str());
    let is_module = MODULE_EXTS.contains(&ext.as_str());
    let is_markdown = is_markdown_ext(&ext);

    let kind = if (is_index_name(extless_name) || is_error_name(extless_name))
        && (is_page_module || is_module || is_markdown)
    {
        SourceFileKind::Route
    } else if LAYOUT_NAME.is_match(extless_name) && (is_page_module || is_module) {
        SourceFileKind::Layout
    } else if extless_name == "entry" && is_module {
        SourceFileKind::Entry
    } else if file_name == "menu.md" {
        SourceFileKind::Menu
    } else if extless_name == "service-worker" && is_module {
        SourceFileKind::ServiceWorker
    } else {
        return None;
    };

    Some(SourceFile {
        kind,
        extless_name: extless_name.to_string(),
        ext,
    })
}

fn is_index_name(extless_name: &str) -> bool {
    INDEX_NAME.is_match(extless_name)
}

fn is_error_name(extless_name: &str) -> bool {
    extless_name == "404" || extless_name == "500"
}
