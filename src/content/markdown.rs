//! Markdown rendering with link rewriting

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag};
use std::path::Path;

use super::links::LinkResolver;

/// Parser options shared by rendering and link collection
///
/// YAML metadata blocks stay disabled, front-matter is handled separately
/// in `FrontMatter::parse()`.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM
}

/// Renders markdown pages to HTML, passing every link through a
/// [`LinkResolver`]
pub struct MarkdownRenderer<'a> {
    resolver: LinkResolver<'a>,
    check_links: bool,
}

impl<'a> MarkdownRenderer<'a> {
    /// Create a new markdown renderer
    pub fn new(resolver: LinkResolver<'a>) -> Self {
        Self {
            resolver,
            check_links: false,
        }
    }

    /// Report links whose target file is missing while rendering
    pub fn check_links(mut self, check_links: bool) -> Self {
        self.check_links = check_links;
        self
    }

    /// Render markdown found in `containing_file` to HTML
    ///
    /// Image sources and email autolinks are left alone.
    pub fn render(&self, markdown: &str, containing_file: &Path) -> String {
        let parser = Parser::new_ext(markdown, parser_options()).map(|event| match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) if link_type != LinkType::Email => {
                let resolved = self
                    .resolver
                    .resolve(containing_file, &dest_url, self.check_links);
                Event::Start(Tag::Link {
                    link_type,
                    dest_url: CowStr::from(resolved),
                    title,
                    id,
                })
            }
            other => other,
        });

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }
}

/// Collect the destination of every link in a markdown document
pub fn collect_links(markdown: &str) -> Vec<String> {
    Parser::new_ext(markdown, parser_options())
        .filter_map(|event| match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                ..
            }) if link_type != LinkType::Email => Some(dest_url.into_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteOptions;
    use crate::content::links::{CollectingReporter, FileProbe};
    use std::path::PathBuf;

    struct NothingExists;

    impl FileProbe for NothingExists {
        fn exists(&self, _path: &Path) -> bool {
            false
        }
    }

    fn options() -> RouteOptions {
        RouteOptions {
            routes_dir: PathBuf::from("/site/routes"),
            base_pathname: "/".to_string(),
            trailing_slash: true,
        }
    }

    const PAGE: &str = "/site/routes/docs/index.md";

    #[test]
    fn test_render_basic_markdown() {
        let options = options();
        let renderer = MarkdownRenderer::new(LinkResolver::new(&options));
        let html = renderer.render("# Hello World\n\nThis is a test.", Path::new(PAGE));
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_rewrites_links() {
        let options = options();
        let renderer = MarkdownRenderer::new(LinkResolver::new(&options));
        let markdown = "See [the guide](./guide/index.md#setup) and [Qwik](https://qwik.dev).";
        let html = renderer.render(markdown, Path::new(PAGE));
        assert!(html.contains(r#"<a href="/docs/guide/#setup">the guide</a>"#));
        assert!(html.contains(r#"<a href="https://qwik.dev">Qwik</a>"#));
    }

    #[test]
    fn test_render_reference_links() {
        let options = options();
        let renderer = MarkdownRenderer::new(LinkResolver::new(&options));
        let markdown = "Read [the API][api].\n\n[api]: ../api/index.md";
        let html = renderer.render(markdown, Path::new(PAGE));
        assert!(html.contains(r#"<a href="/api/">the API</a>"#));
    }

    #[test]
    fn test_render_leaves_images_alone() {
        let options = options();
        let renderer = MarkdownRenderer::new(LinkResolver::new(&options));
        let html = renderer.render("![diagram](./diagram/index.md)", Path::new(PAGE));
        assert!(html.contains(r#"src="./diagram/index.md""#));
    }

    #[test]
    fn test_render_reports_missing_when_checking() {
        let options = options();
        let reporter = CollectingReporter::new();
        let resolver = LinkResolver::new(&options)
            .with_probe(&NothingExists)
            .with_reporter(&reporter);
        let renderer = MarkdownRenderer::new(resolver).check_links(true);

        renderer.render("[a](./a/index.md) [b](https://x.dev)", Path::new(PAGE));
        let missing = reporter.take();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].link, "./a/index.md");
    }

    #[test]
    fn test_collect_links() {
        let markdown = "[a](./a/index.md) ![img](./pic.png) <hi@example.com> [b](/b/index.md?x=1)";
        assert_eq!(collect_links(markdown), vec!["./a/index.md", "/b/index.md?x=1"]);
    }
}
