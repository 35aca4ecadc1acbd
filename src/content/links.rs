//! Link resolution between markdown files
//!
//! A link such as `../guide/index.md#install` written inside a markdown page
//! is rewritten to the pathname of the page generated for that file, e.g.
//! `/docs/guide/#install`. Links that are external, do not point at markdown,
//! or point at markdown the router does not turn into a page are returned
//! untouched. Resolution never fails; a missing target is only reported.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::RouteOptions;
use crate::routing::fs::{get_extension, is_markdown_ext, resolve_link_path};
use crate::routing::{dir_path_to_pathname, get_source_file, is_same_origin_url};

/// File existence check used when validating link targets
pub trait FileProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Receives links whose target file could not be found
pub trait LinkReporter: Send + Sync {
    fn missing_target(&self, missing: MissingLink);
}

/// A link whose resolved target does not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLink {
    /// Link as written in the markdown source
    pub link: String,
    pub containing_file: PathBuf,
    /// File the link was resolved to
    pub resolved: PathBuf,
}

/// Reports missing targets as `tracing` warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl LinkReporter for TracingReporter {
    fn missing_target(&self, missing: MissingLink) {
        tracing::warn!(
            "The link {:?}, found within {:?} does not have a matching source file",
            missing.link,
            missing.containing_file
        );
    }
}

/// Collects missing targets for later inspection
#[derive(Debug, Default)]
pub struct CollectingReporter {
    missing: Mutex<Vec<MissingLink>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every link collected so far
    pub fn take(&self) -> Vec<MissingLink> {
        match self.missing.lock() {
            Ok(mut missing) => std::mem::take(&mut *missing),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl LinkReporter for CollectingReporter {
    fn missing_target(&self, missing: MissingLink) {
        match self.missing.lock() {
            Ok(mut list) => list.push(missing),
            Err(poisoned) => poisoned.into_inner().push(missing),
        }
    }
}

/// A link split into its path, query and fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLink<'a> {
    /// Link with query and fragment removed
    pub path: &'a str,
    /// Text after the first `?`, up to a following `#`
    pub query: Option<&'a str>,
    /// Text after the first `#`
    pub fragment: Option<&'a str>,
}

impl<'a> SplitLink<'a> {
    pub fn parse(link: &'a str) -> Self {
        let path_end = link.find(['?', '#']).unwrap_or(link.len());
        let query = link.find('?').map(|i| {
            let rest = &link[i + 1..];
            &rest[..rest.find('#').unwrap_or(rest.len())]
        });
        let fragment = link.find('#').map(|i| &link[i + 1..]);

        Self {
            path: &link[..path_end],
            query,
            fragment,
        }
    }

    /// Suffix to re-attach to a rewritten pathname
    ///
    /// Only one suffix survives. A query, when present, wins over the
    /// fragment, so `page.md?tab=1#section` keeps `?tab=1` only.
    pub fn suffix(&self) -> Option<String> {
        match (self.query, self.fragment) {
            (Some(query), _) => Some(format!("?{}", query)),
            (None, Some(fragment)) => Some(format!("#{}", fragment)),
            (None, None) => None,
        }
    }
}

/// Rewrites markdown links to route pathnames
pub struct LinkResolver<'a> {
    options: &'a RouteOptions,
    probe: &'a dyn FileProbe,
    reporter: &'a dyn LinkReporter,
}

impl<'a> LinkResolver<'a> {
    /// Create a resolver that checks the local file system and reports
    /// missing targets through `tracing`
    pub fn new(options: &'a RouteOptions) -> Self {
        Self {
            options,
            probe: &FsProbe,
            reporter: &TracingReporter,
        }
    }

    /// Use a different existence check
    pub fn with_probe(mut self, probe: &'a dyn FileProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Send missing targets somewhere else
    pub fn with_reporter(mut self, reporter: &'a dyn LinkReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Resolve a link found in `containing_file`
    ///
    /// Returns the route pathname of the linked page, or `url` unchanged
    /// when the link is external, not markdown, or not a routed page. With
    /// `check_file_exists`, a missing target is reported but resolution
    /// still goes ahead.
    pub fn resolve(&self, containing_file: &Path, url: &str, check_file_exists: bool) -> String {
        if !is_same_origin_url(url) {
            return url.to_string();
        }

        let link = SplitLink::parse(url.trim());
        if !is_markdown_ext(&get_extension(link.path)) {
            return url.to_string();
        }

        let Ok(path) = percent_decode_str(link.path).decode_utf8() else {
            tracing::debug!("{:?} does not decode to UTF-8, keeping link", link.path);
            return url.to_string();
        };

        let file_path = if path.starts_with(['/', '\\']) {
            resolve_link_path(&self.options.routes_dir, &path)
        } else {
            let dir = containing_file.parent().unwrap_or_else(|| Path::new(""));
            resolve_link_path(dir, &path)
        };

        if check_file_exists && !self.probe.exists(&file_path) {
            self.reporter.missing_target(MissingLink {
                link: url.to_string(),
                containing_file: containing_file.to_path_buf(),
                resolved: file_path.clone(),
            });
        }

        let Some(file_name) = file_path.file_name().and_then(|n| n.to_str()) else {
            return url.to_string();
        };
        if get_source_file(file_name).is_none() {
            tracing::debug!("{:?} is not a routed source file, keeping link", file_name);
            return url.to_string();
        }

        let dir = file_path.parent().unwrap_or_else(|| Path::new(""));
        match dir_path_to_pathname(self.options, dir) {
            Some(mut pathname) => {
                if let Some(suffix) = link.suffix() {
                    pathname.push_str(&suffix);
                }
                pathname
            }
            None => {
                tracing::debug!("{:?} lies outside the routes directory", file_path);
                url.to_string()
            }
        }
    }
}
