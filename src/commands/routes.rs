//! List page routes

use anyhow::Result;
use serde::Serialize;

use crate::content::loader::RouteLoader;
use crate::Docroute;

/// One line of the route listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub pathname: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Collect every page route, sorted by pathname
pub fn list(project: &Docroute) -> Result<Vec<RouteEntry>> {
    let routes = RouteLoader::new(project).load_routes()?;
    Ok(routes
        .into_iter()
        .map(|route| RouteEntry {
            title: route.title().map(str::to_string),
            pathname: route.pathname,
            source: route.source,
        })
        .collect())
}

/// Print page routes, as text or JSON
pub fn run(project: &Docroute, json: bool) -> Result<()> {
    let entries = list(project)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Routes ({}):", entries.len());
    for entry in entries {
        match entry.title {
            Some(title) => println!("  {} [{}] {}", entry.pathname, entry.source, title),
            None => println!("  {} [{}]", entry.pathname, entry.source),
        }
    }
    Ok(())
}
