//! Front-matter parsing

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Attributes of a single `<meta>` or `<link>` tag
pub type Attributes = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unterminated JSON front-matter")]
    UnterminatedJson,
}

/// An inline stylesheet declared in front-matter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleEntry {
    pub style: String,
    /// Extra attributes for the `<style>` tag
    #[serde(flatten)]
    pub props: Attributes,
}

/// Front-matter of a markdown page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub meta: Vec<Attributes>,
    pub links: Vec<Attributes>,
    pub styles: Vec<StyleEntry>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without a front-matter block yields the default front-matter
    /// and the whole input.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let trimmed = content.trim_start();

        if let Some(rest) = trimmed.strip_prefix("---") {
            return Ok(Self::parse_yaml(rest)?.unwrap_or((Self::default(), content)));
        }

        if let Some(rest) = trimmed.strip_prefix(";;;") {
            let end = rest.find(";;;").ok_or(FrontMatterError::UnterminatedJson)?;
            let fm = serde_json::from_str(&rest[..end])?;
            return Ok((fm, rest[end + 3..].trim_start_matches(['\n', '\r'])));
        }

        Ok((Self::default(), content))
    }

    /// `Ok(None)` when the `---` fence is not closed, which means the dashes
    /// were a thematic break rather than front-matter
    fn parse_yaml(rest: &str) -> Result<Option<(Self, &str)>, FrontMatterError> {
        let rest = rest.trim_start_matches(['\n', '\r']);
        let (yaml, remaining) = if let Some(body) = rest.strip_prefix("---") {
            ("", body)
        } else if let Some(end) = rest.find("\n---") {
            (&rest[..end], &rest[end + 4..])
        } else {
            return Ok(None);
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml.trim().is_empty() {
            return Ok(Some((Self::default(), remaining)));
        }

        let fm = serde_yaml::from_str(yaml)?;
        Ok(Some((fm, remaining)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Getting Started
description: Install and run your first app
meta:
  - name: keywords
    content: install, setup
links:
  - rel: preconnect
    href: https://fonts.example.com
contributors:
  - adamdbradley
---

# Getting Started
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Getting Started"));
        assert_eq!(fm.description.as_deref(), Some("Install and run your first app"));
        assert_eq!(fm.meta.len(), 1);
        assert_eq!(fm.meta[0]["name"], "keywords");
        assert_eq!(fm.links[0]["rel"], "preconnect");
        assert!(fm.extra.contains_key("contributors"));
        assert!(remaining.starts_with("# Getting Started"));
    }

    #[test]
    fn test_parse_styles() {
        let content = "---\nstyles:\n  - style: \"h1 { color: red }\"\n    media: print\n---\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.styles[0].style, "h1 { color: red }");
        assert_eq!(fm.styles[0].props["media"], "print");
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Test Page\"}\n;;;\nThis is content.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Page"));
        assert!(remaining.starts_with("This is content."));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Title\n\nSome text.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_unclosed_fence_is_content() {
        let content = "---\n\nJust a horizontal rule.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_unterminated_json() {
        assert!(matches!(
            FrontMatter::parse(";;;{\"title\": \"x\"}"),
            Err(FrontMatterError::UnterminatedJson)
        ));
    }
}
