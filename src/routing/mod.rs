//! Routing module - file-system route conventions
//!
//! Maps files inside the routes directory to the public pathnames the
//! built site serves them at.

pub mod fs;
mod pathname;
mod source_file;

pub use pathname::{dir_path_to_pathname, is_same_origin_url, normalize_pathname};
pub use source_file::{get_source_file, SourceFile, SourceFileKind};
