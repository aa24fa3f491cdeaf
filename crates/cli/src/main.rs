//! Copperpot CLI - merchant listing tools.
//!
//! # Usage
//!
//! ```bash
//! # Check a draft file against the submit gate, offline
//! copperpot product validate --draft mug.json
//!
//! # Upload images and publish (or update) the listing
//! copperpot product publish --draft mug.json
//!
//! # Fetch a saved listing and show how it reconstructs
//! copperpot product fetch --id 91
//! ```
//!
//! # Commands
//!
//! - `product validate` - Build the editing state from a draft and report
//!   submit blockers
//! - `product publish` - Run the full pipeline against the configured asset
//!   host and Product API
//! - `product fetch` - Fetch and reconstruct a saved listing

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "copperpot")]
#[command(author, version, about = "Copperpot merchant CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage product listings
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Validate a draft file against the submit gate, without network access
    Validate {
        /// Path to the draft JSON file
        #[arg(short, long)]
        draft: PathBuf,
    },
    /// Publish a draft: upload its images and create or update the listing
    Publish {
        /// Path to the draft JSON file
        #[arg(short, long)]
        draft: PathBuf,
    },
    /// Fetch a saved listing and log its reconstructed editing state
    Fetch {
        /// Backend product ID
        #[arg(short, long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

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
        Commands::Product { action } => match action {
            ProductAction::Validate { draft } => commands::validate::run(&draft)?,
            ProductAction::Publish { draft } => commands::publish::run(&draft).await?,
            ProductAction::Fetch { id } => commands::fetch::run(id).await?,
        },
    }
    Ok(())
}
