//! Helper functions for HTML output

mod html;
mod url;

pub use html::*;
pub use url::*;
