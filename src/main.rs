//! # stackload CLI
//!
//! Seeds a local SQLite database with question/answer data from the Stack
//! Exchange API.
//!
//! ## Usage
//!
//! ```bash
//! stackload --config ./config/stackload.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `stackload init` | Create the SQLite database and schema |
//! | `stackload import` | Fetch, deduplicate, and bulk-load Q&A data |
//! | `stackload stats` | Print row counts and database size |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! stackload init --config ./config/stackload.toml
//!
//! # Full import (100 pages of 100 questions)
//! stackload import --config ./config/stackload.toml
//!
//! # Small import of a different tag
//! stackload import --pages 3 --tagged rust
//!
//! # See what a run would fetch without writing anything
//! stackload import --pages 1 --dry-run
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stackload::{config, db, import, stats, store};

/// stackload — import Stack Exchange Q&A data into SQLite.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file with `[db]` and `[api]` sections.
#[derive(Parser)]
#[command(
    name = "stackload",
    about = "Import Stack Exchange Q&A data into a local SQLite database",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/stackload.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite file and the question, answer, and question_tag
    /// tables. Idempotent — running it multiple times is safe. An import
    /// recreates the tables anyway; init exists so the query side has a
    /// valid (empty) schema before the first import.
    Init,

    /// Run the import pipeline.
    ///
    /// Fetches paginated question pages for the configured tag, follows up
    /// with batched accepted-answer requests, deduplicates by primary key,
    /// derives question_tag rows, and bulk-loads all three tables (dropping
    /// previous contents). A fetch or decode failure stops pagination but
    /// still persists what was accumulated — watch for the "partial import"
    /// line in the output.
    Import {
        /// Override the number of pages to fetch.
        #[arg(long)]
        pages: Option<u32>,

        /// Override the page size (1-100).
        #[arg(long)]
        page_size: Option<u32>,

        /// Override the tag to import.
        #[arg(long)]
        tagged: Option<String>,

        /// Fetch and report counts without writing to the database.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print row counts and database size.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg.db.path).await?;
            store::create_tables(&pool).await?;
            pool.close().await;
            println!("Database initialized successfully.");
        }
        Commands::Import {
            pages,
            page_size,
            tagged,
            dry_run,
        } => {
            if let Some(pages) = pages {
                cfg.api.pages = pages;
            }
            if let Some(page_size) = page_size {
                cfg.api.page_size = page_size;
            }
            if let Some(tagged) = tagged {
                cfg.api.tagged = tagged;
            }
            import::run_import_command(&cfg, dry_run).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
