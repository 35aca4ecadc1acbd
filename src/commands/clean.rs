//! Clean the public directory

use anyhow::{Context, Result};
use std::fs;

use crate::Docroute;

/// Delete the public directory
pub fn run(project: &Docroute) -> Result<()> {
    if project.public_dir.exists() {
        fs::remove_dir_all(&project.public_dir)
            .with_context(|| format!("Failed to delete {:?}", project.public_dir))?;
        tracing::info!("Deleted: {:?}", project.public_dir);
    }
    Ok(())
}
