//! Page route model

use std::path::PathBuf;

use super::FrontMatter;

/// A markdown page discovered in the routes directory
#[derive(Debug, Clone)]
pub struct PageRoute {
    /// Public pathname the page is served at
    pub pathname: String,

    /// Source file path (relative to the routes directory)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Parsed front-matter
    pub front_matter: FrontMatter,

    /// Markdown body without front-matter
    pub raw: String,
}

impl PageRoute {
    /// Page title from front-matter, if any
    pub fn title(&self) -> Option<&str> {
        self.front_matter.title.as_deref()
    }
}
