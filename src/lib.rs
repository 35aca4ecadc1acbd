//! docroute: build-time routing for markdown documentation sites
//!
//! Pages live as `index.md` files in a file-system routes directory. Links
//! written between markdown files (`../guide/index.md#setup`) are rewritten
//! to the public pathname of the page generated for the target
//! (`/guide/#setup`).

pub mod commands;
pub mod config;
pub mod content;
pub mod head;
pub mod helpers;
pub mod routing;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use config::{RouteOptions, RoutesConfig};
use content::LinkResolver;
use routing::fs::normalize_path;

/// A documentation project
#[derive(Debug, Clone)]
pub struct Docroute {
    /// Project configuration
    pub config: RoutesConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Normalized routing options
    pub options: RouteOptions,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Docroute {
    /// Open the project in a directory, reading `docroute.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = RoutesConfig::load_or_default(&base_dir)?;
        Self::with_config(base_dir, config)
    }

    /// Open the project with an already loaded configuration
    ///
    /// A relative `base_dir` is taken from the current directory.
    pub fn with_config(base_dir: PathBuf, config: RoutesConfig) -> Result<Self> {
        let base_dir = if base_dir.is_absolute() {
            normalize_path(&base_dir)
        } else {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            normalize_path(&cwd.join(base_dir))
        };
        let options = config
            .normalize(&base_dir)
            .context("Invalid routing configuration")?;
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            options,
            public_dir,
        })
    }

    /// Link resolver for this project's routes
    pub fn resolver(&self) -> LinkResolver<'_> {
        LinkResolver::new(&self.options)
    }

    /// Build the static site
    pub fn build(&self) -> Result<commands::build::BuildSummary> {
        commands::build::run(self)
    }

    /// Check every link in the routes directory
    pub fn check(&self) -> Result<commands::check::CheckReport> {
        commands::check::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;

    use tempfile::TempDir;

    use crate::Docroute;

    /// Create a project whose routes directory holds `files`
    pub fn site(files: &[(&str, &str)]) -> (TempDir, Docroute) {
        let dir = tempfile::tempdir().unwrap();
        let routes = dir.path().join("src/routes");
        fs::create_dir_all(&routes).unwrap();
        for (path, content) in files {
            let path = routes.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let project = Docroute::new(dir.path()).unwrap();
        (dir, project)
    }
}
