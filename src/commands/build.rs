//! Build the static site

use anyhow::{Context, Result};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::config::CONFIG_FILE;
use crate::content::links::{CollectingReporter, LinkReporter, TracingReporter};
use crate::content::loader::RouteLoader;
use crate::content::{MarkdownRenderer, PageRoute};
use crate::head::{render_head, DocumentHead};
use crate::helpers::html_escape;
use crate::Docroute;

/// Outcome of a build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Pages written
    pub pages: usize,
    /// Links whose target file was missing
    pub missing_links: usize,
}

/// Render every page and write it to the public directory
pub fn run(project: &Docroute) -> Result<BuildSummary> {
    let start = Instant::now();

    let routes = RouteLoader::new(project).load_routes()?;
    tracing::info!("Loaded {} pages", routes.len());

    fs::create_dir_all(&project.public_dir)
        .with_context(|| format!("Failed to create {:?}", project.public_dir))?;

    let reporter = CollectingReporter::new();
    let renderer = MarkdownRenderer::new(project.resolver().with_reporter(&reporter))
        .check_links(project.config.check_links);

    for route in &routes {
        let html = render_page(project, &renderer, route);
        let output = output_path(
            &project.public_dir,
            &route.pathname,
            project.options.trailing_slash,
        );
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output, html).with_context(|| format!("Failed to write {:?}", output))?;
        tracing::debug!("Generated {} -> {:?}", route.pathname, output);
    }

    let missing = reporter.take();
    let missing_links = missing.len();
    for link in missing {
        TracingReporter.missing_target(link);
    }

    let duration = start.elapsed();
    tracing::info!("Generated {} pages in {:.2}s", routes.len(), duration.as_secs_f64());

    Ok(BuildSummary {
        pages: routes.len(),
        missing_links,
    })
}

/// Render a complete HTML document for a page
fn render_page(project: &Docroute, renderer: &MarkdownRenderer<'_>, route: &PageRoute) -> String {
    let head = DocumentHead::from_front_matter(&route.front_matter);
    let content = renderer.render(&route.raw, &route.full_source);

    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n{}\n<body>\n<main>\n{}</main>\n</body>\n</html>\n",
        html_escape(&project.config.head.language),
        render_head(&project.config.head, &head, &route.pathname),
        content
    )
}

/// Output file for a pathname
///
/// Pathnames ending in `/` are written as `index.html` inside their
/// directory, others as `<last segment>.html`.
fn output_path(public_dir: &Path, pathname: &str, trailing_slash: bool) -> PathBuf {
    let decoded = percent_decode_str(pathname).decode_utf8_lossy();
    let mut segments: Vec<&str> = decoded.split('/').filter(|s| !s.is_empty()).collect();

    let file_name = if trailing_slash || pathname.ends_with('/') {
        "index.html".to_string()
    } else {
        match segments.pop() {
            Some(last) => format!("{}.html", last),
            None => "index.html".to_string(),
        }
    };

    let mut path = public_dir.to_path_buf();
    for segment in segments {
        path.push(segment);
    }
    path.join(file_name)
}

/// Watch the routes directory and config file, rebuilding on change
pub fn watch(project: &Docroute) -> Result<()> {
    let (tx, rx) = channel();

    // Rebuild once per burst of changes
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    debouncer
        .watcher()
        .watch(&project.options.routes_dir, RecursiveMode::Recursive)?;

    let config_path = project.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!(
        "Watching {:?} for changes. Press Ctrl+C to stop.",
        project.options.routes_dir
    );

    let mut project = project.clone();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed = changed_paths(&events, &project.public_dir);
                if changed.is_empty() {
                    continue;
                }
                for path in &changed {
                    tracing::debug!("File changed: {:?}", path);
                }

                tracing::info!("File changed, rebuilding...");
                reload(&mut project, debouncer.watcher());
                if let Err(e) = run(&project) {
                    tracing::error!("Build failed: {:#}", e);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Paths of debounced events, ignoring the build output
fn changed_paths<'a>(events: &'a [DebouncedEvent], public_dir: &Path) -> Vec<&'a Path> {
    events
        .iter()
        .map(|e| e.path.as_path())
        .filter(|p| !p.starts_with(public_dir))
        .collect()
}

/// Re-read the configuration, moving the recursive watch when the routes
/// directory changed
fn reload(project: &mut Docroute, watcher: &mut dyn Watcher) {
    let reloaded = match Docroute::new(&project.base_dir) {
        Ok(reloaded) => reloaded,
        Err(e) => {
            tracing::error!("Failed to reload configuration: {:#}", e);
            return;
        }
    };

    let old_dir = &project.options.routes_dir;
    let new_dir = &reloaded.options.routes_dir;
    if old_dir != new_dir {
        if let Err(e) = watcher.unwatch(old_dir) {
            tracing::warn!("Failed to unwatch {:?}: {}", old_dir, e);
        }
        match watcher.watch(new_dir, RecursiveMode::Recursive) {
            Ok(()) => tracing::info!("Watching {:?} for changes", new_dir),
            Err(e) => tracing::error!("Failed to watch {:?}: {}", new_dir, e),
        }
    }

    *project = reloaded;
}
