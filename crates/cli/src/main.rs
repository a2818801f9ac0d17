//! Customer Registry CLI - Database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Run registry database migrations
//! registry-cli migrate
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations from `crates/api/migrations/`

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "registry-cli")]
#[command(author, version, about = "Customer registry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
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
        Commands::Migrate => commands::migrate::registry().await?,
    }
    Ok(())
}
