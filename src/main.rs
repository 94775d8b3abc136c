//! CLI entry point for townpost

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "townpost")]
#[command(version)]
#[command(about = "Content pipeline for a local-events newsletter site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Alternate content root for updates and events (falls back to the
    /// CONTENT_DIR environment variable, then to the configured root)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List content items
    List {
        /// Type of content to list (updates, pages)
        #[arg(default_value = "updates")]
        r#type: String,
    },

    /// Show a single update by slug
    Show {
        /// Slug of the update, with or without the /updates/ prefix
        slug: String,
    },

    /// Search updates by query
    Search {
        query: String,
    },

    /// Validate the content tree
    Check,

    /// Print route paths for static generation
    Paths {
        /// Type of content (updates, pages)
        #[arg(default_value = "updates")]
        r#type: String,
    },

    /// Scaffold a new update
    New {
        /// Title of the new update
        title: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "townpost=debug,info"
    } else {
        "townpost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut site = townpost::Site::new(&base_dir)?;

    // The updates root override is threaded in explicitly; the library
    // never reads the environment itself
    let updates_override = cli
        .content_dir
        .or_else(|| std::env::var_os("CONTENT_DIR").map(PathBuf::from));
    if let Some(dir) = updates_override {
        tracing::debug!("updates root override: {:?}", dir);
        site.override_updates_root(dir);
    }

    match cli.command {
        Commands::List { r#type } => {
            townpost::commands::list::run(&site, &r#type)?;
        }

        Commands::Show { slug } => {
            townpost::commands::show::run(&site, &slug)?;
        }

        Commands::Search { query } => {
            townpost::commands::search::run(&site, &query)?;
        }

        Commands::Check => {
            let findings = townpost::commands::check::run(&site)?;
            if findings > 0 {
                std::process::exit(1);
            }
        }

        Commands::Paths { r#type } => {
            townpost::commands::paths::run(&site, &r#type)?;
        }

        Commands::New { title } => {
            townpost::commands::new::run(&site, &title)?;
        }
    }

    Ok(())
}
