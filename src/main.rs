//! CLI entry point for docroute

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docroute::Docroute;

#[derive(Parser)]
#[command(name = "docroute")]
#[command(version)]
#[command(about = "Build-time routing for markdown documentation sites", long_about = None)]
struct Cli {
    /// Set the project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every page to the public directory
    #[command(alias = "b")]
    Build {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Check links between markdown files
    Check,

    /// List page routes
    Routes {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a single link as written inside a markdown file
    Resolve {
        /// Markdown file containing the link
        file: PathBuf,

        /// Link to resolve
        link: String,
    },

    /// Delete the public directory
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "docroute=debug,info"
    } else {
        "docroute=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let project = Docroute::new(&base_dir)?;

    match cli.command {
        Commands::Build { watch } => {
            tracing::info!("Building site into {:?}", project.public_dir);
            let summary = project.build()?;
            println!("Built {} pages", summary.pages);
            if summary.missing_links > 0 {
                println!("{} links point at missing files", summary.missing_links);
            }

            if watch {
                docroute::commands::build::watch(&project)?;
            }
        }

        Commands::Check => {
            let report = project.check()?;
            for missing in &report.missing {
                println!(
                    "{}: {} (no file at {})",
                    missing.containing_file.display(),
                    missing.link,
                    missing.resolved.display()
                );
            }
            println!("Checked {} links in {} files", report.links, report.files);
            if !report.is_ok() {
                anyhow::bail!("{} broken links", report.missing.len());
            }
        }

        Commands::Routes { json } => {
            docroute::commands::routes::run(&project, json)?;
        }

        Commands::Resolve { file, link } => {
            println!("{}", docroute::commands::resolve::run(&project, &file, &link));
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            project.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
