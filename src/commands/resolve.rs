//! Resolve a single link

use std::path::Path;

use crate::routing::fs::normalize_path;
use crate::Docroute;

/// Resolve `link` as if it were written inside `containing_file`
///
/// Relative file paths are taken from the project directory.
pub fn run(project: &Docroute, containing_file: &Path, link: &str) -> String {
    let containing_file = normalize_path(&project.base_dir.join(containing_file));
    project
        .resolver()
        .resolve(&containing_file, link, project.config.check_links)
}
