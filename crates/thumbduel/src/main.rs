//! thumbduel CLI - Thumbnail A/B comparison via structured LLM analysis.
//!
//! Loads two candidate thumbnails with their titles, sends them to the
//! Gemini vision API for a scored comparison, and renders the verdict.
//!
//! # Usage
//!
//! ```bash
//! # Compare two candidates
//! thumbduel compare a.png b.png --title-a "Candidate A" --title-b "Candidate B"
//!
//! # Store an operator API key
//! thumbduel key set
//!
//! # View configuration
//! thumbduel config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// thumbduel - Thumbnail A/B comparison via structured LLM analysis.
#[derive(Parser, Debug)]
#[command(name = "thumbduel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two thumbnails and print the scored verdict
    Compare(cli::compare::CompareArgs),

    /// Manage the operator API key override
    Key(cli::key::KeyArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match thumbduel_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `thumbduel config path`."
            );
            thumbduel_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("thumbduel v{}", thumbduel_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Compare(args) => cli::compare::execute(args, config).await,
        Commands::Key(args) => cli::key::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
