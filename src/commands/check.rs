//! Check links between markdown files

use anyhow::Result;
use std::fs;

use crate::content::links::CollectingReporter;
use crate::content::loader::RouteLoader;
use crate::content::{collect_links, FrontMatter, MissingLink};
use crate::Docroute;

/// Result of checking the routes directory
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Markdown files scanned
    pub files: usize,
    /// Links found in those files
    pub links: usize,
    /// Links rewritten to a route pathname
    pub rewritten: usize,
    pub missing: Vec<MissingLink>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Resolve every link of every markdown file, checking targets exist
///
/// Unlike `build`, partials and other unrouted markdown files are scanned
/// too.
pub fn run(project: &Docroute) -> Result<CheckReport> {
    let reporter = CollectingReporter::new();
    let resolver = project.resolver().with_reporter(&reporter);
    let mut report = CheckReport::default();

    for path in RouteLoader::new(project).markdown_files() {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                continue;
            }
        };
        let body = match FrontMatter::parse(&content) {
            Ok((_, body)) => body,
            Err(e) => {
                tracing::warn!("{:?}: {}, checking the whole file", path, e);
                content.as_str()
            }
        };

        report.files += 1;
        for link in collect_links(body) {
            report.links += 1;
            let resolved = resolver.resolve(&path, &link, true);
            if resolved != link {
                report.rewritten += 1;
                tracing::debug!("{:?}: {} -> {}", path, link, resolved);
            }
        }
    }

    report.missing = reporter.take();
    tracing::info!(
        "Checked {} links in {} files, {} missing",
        report.links,
        report.files,
        report.missing.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use crate::test_support::site;

    #[test]
    fn test_check_clean_site() {
        let (_dir, project) = site(&[
            ("index.md", "[Guide](./guide/index.md) [Qwik](https://qwik.dev)"),
            ("guide/index.md", "[Home](/index.md) [img](./a.png)"),
        ]);
        let report = project.check().unwrap();
        assert!(report.is_ok());
        assert_eq!(report.files, 2);
        assert_eq!(report.links, 4);
        assert_eq!(report.rewritten, 2);
    }

    #[test]
    fn test_check_reports_each_missing_occurrence() {
        let (_dir, project) = site(&[
            ("index.md", "[a](./gone/index.md) and again [a](./gone/index.md)"),
            ("guide/_partial.md", "---\ntitle: [broken\n---\n[b](../missing.md)"),
        ]);
        let report = project.check().unwrap();
        assert_eq!(report.files, 2);
        assert_eq!(report.missing.len(), 3);

        let links: Vec<&str> = report.missing.iter().map(|m| m.link.as_str()).collect();
        assert!(links.contains(&"../missing.md"));
        assert_eq!(links.iter().filter(|l| **l == "./gone/index.md").count(), 2);
    }

    #[test]
    fn test_check_percent_encoded_directory() {
        let (_dir, project) = site(&[
            ("index.md", "[notes](./release%20notes/index.md)"),
            ("release notes/index.md", "# Notes"),
        ]);
        let report = project.check().unwrap();
        assert!(report.is_ok(), "{:?}", report.missing);
        assert_eq!(report.rewritten, 1);
    }
}
