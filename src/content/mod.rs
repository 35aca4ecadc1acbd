//! Content module - markdown pages, front-matter and link rewriting

mod frontmatter;
pub mod links;
pub mod loader;
mod markdown;
mod page;

pub use frontmatter::{Attributes, FrontMatter, FrontMatterError, StyleEntry};
pub use links::{LinkResolver, MissingLink};
pub use markdown::{collect_links, MarkdownRenderer};
pub use page::PageRoute;
