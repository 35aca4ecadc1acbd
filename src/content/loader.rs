//! Route loader - discovers markdown pages in the routes directory

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, PageRoute};
use crate::routing::fs::is_markdown_file;
use crate::routing::{dir_path_to_pathname, get_source_file};
use crate::Docroute;

/// Loads page routes from the routes directory
pub struct RouteLoader<'a> {
    project: &'a Docroute,
}

impl<'a> RouteLoader<'a> {
    pub fn new(project: &'a Docroute) -> Self {
        Self { project }
    }

    /// Every markdown file under the routes directory, sorted by path
    pub fn markdown_files(&self) -> Vec<PathBuf> {
        let routes_dir = &self.project.options.routes_dir;
        if !routes_dir.exists() {
            tracing::warn!("Routes directory {:?} does not exist", routes_dir);
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(routes_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
            .map(|e| e.into_path())
            .collect();
        files.sort();
        files
    }

    /// Load all markdown pages, sorted by pathname
    ///
    /// Files that fail to load are logged and skipped. When two files map to
    /// the same pathname the first one (by path) is kept.
    pub fn load_routes(&self) -> Result<Vec<PageRoute>> {
        let mut routes: BTreeMap<String, PageRoute> = BTreeMap::new();

        for path in self.markdown_files() {
            let is_page = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(get_source_file)
                .map(|f| f.is_page())
                .unwrap_or(false);
            if !is_page {
                continue;
            }

            let route = match self.load_route(&path) {
                Ok(route) => route,
                Err(e) => {
                    tracing::warn!("Failed to load page {:?}: {:#}", path, e);
                    continue;
                }
            };

            if let Some(existing) = routes.get(&route.pathname) {
                tracing::warn!(
                    "{:?} and {:?} both map to {}, keeping the first",
                    existing.full_source,
                    route.full_source,
                    route.pathname
                );
                continue;
            }
            routes.insert(route.pathname.clone(), route);
        }

        Ok(routes.into_values().collect())
    }

    /// Load a single page from a file
    fn load_route(&self, path: &Path) -> Result<PageRoute> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (front_matter, body) = FrontMatter::parse(&content)?;

        let options = &self.project.options;
        let dir = path.parent().unwrap_or(options.routes_dir.as_path());
        let pathname = dir_path_to_pathname(options, dir)
            .with_context(|| format!("{:?} is outside the routes directory", path))?;

        let source = path
            .strip_prefix(&options.routes_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        Ok(PageRoute {
            pathname,
            source,
            full_source: path.to_path_buf(),
            raw: body.to_string(),
            front_matter,
        })
    }
}
