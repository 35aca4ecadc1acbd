//! Project configuration (docroute.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::routing::fs::normalize_path;

/// Configuration file name, looked up in the project directory
pub const CONFIG_FILE: &str = "docroute.yml";

/// Errors raised while loading or normalizing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("base_pathname must start with '/', got {0:?}")]
    RelativeBasePathname(String),

    #[error("base_pathname must not contain a query or fragment, got {0:?}")]
    InvalidBasePathname(String),
}

/// Main project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Routes directory, relative to the project directory
    pub routes_dir: String,
    /// Output directory for `build`
    pub public_dir: String,
    pub base_pathname: String,
    pub trailing_slash: bool,
    /// Warn about links whose target file does not exist
    pub check_links: bool,
    #[serde(default)]
    pub head: HeadConfig,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            routes_dir: "src/routes".to_string(),
            public_dir: "dist".to_string(),
            base_pathname: "/".to_string(),
            trailing_slash: true,
            check_links: true,
            head: HeadConfig::default(),
        }
    }
}

impl RoutesConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `docroute.yml` from a project directory, falling back to defaults
    pub fn load_or_default<P: AsRef<Path>>(base_dir: P) -> Result<Self, ConfigError> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Resolve directories against the project directory and validate
    /// the base pathname
    pub fn normalize(&self, base_dir: &Path) -> Result<RouteOptions, ConfigError> {
        let base_pathname = self.base_pathname.trim();
        if !base_pathname.starts_with('/') {
            return Err(ConfigError::RelativeBasePathname(base_pathname.to_string()));
        }
        if base_pathname.contains(['?', '#']) {
            return Err(ConfigError::InvalidBasePathname(base_pathname.to_string()));
        }

        let base_pathname = base_pathname
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(String::from("/"), |mut acc, segment| {
                acc.push_str(segment);
                acc.push('/');
                acc
            });

        Ok(RouteOptions {
            routes_dir: normalize_path(&base_dir.join(&self.routes_dir)),
            base_pathname,
            trailing_slash: self.trailing_slash,
        })
    }
}

/// Normalized routing options shared by the resolver and the pathname mapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    /// Absolute, normalized routes directory
    pub routes_dir: PathBuf,
    /// Always starts and ends with `/`
    pub base_pathname: String,
    pub trailing_slash: bool,
}

/// Document head configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
    pub site_name: String,
    /// Origin used to build canonical URLs
    pub url: String,
    pub language: String,
    pub theme_color: String,
    pub favicon: String,
    pub apple_touch_icon: String,
    /// Emit Open Graph and Twitter meta tags
    pub production: bool,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            site_name: "Docs".to_string(),
            url: "http://localhost".to_string(),
            language: "en".to_string(),
            theme_color: "#0093ee".to_string(),
            favicon: "/favicons/favicon.svg".to_string(),
            apple_touch_icon: "/favicons/apple-touch-icon.png".to_string(),
            production: false,
        }
    }
}
