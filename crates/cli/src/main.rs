//! Snack Finder CLI - Database migrations, seeding, and search.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! sf-cli migrate
//!
//! # Load sales from a JSON fixture
//! sf-cli seed fixtures/sales.json
//!
//! # Latest sale per item, optionally limited to some stores
//! sf-cli search cheetos --store snaxa --store mug
//! ```
//!
//! # Environment Variables
//!
//! - `SNACKFINDER_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Snack Finder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert orders and line items from a JSON fixture
    Seed {
        /// Path to the fixture file
        file: PathBuf,
    },
    /// Show the latest sale of each matching item
    Search {
        /// Case-insensitive substring of the item name
        query: String,

        /// Limit to these storefronts (repeatable; default: all)
        #[arg(short, long = "store")]
        stores: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::run(&file).await?,
        Commands::Search { query, stores } => commands::search::run(&query, &stores).await?,
    }
    Ok(())
}
