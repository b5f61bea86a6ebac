use anyhow::Result;
use clap::{Parser, Subcommand};
use snapkeep::{config::Config, remote::Tarsnap};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snapkeep")]
#[command(about = "Tarsnap backup orchestrator for dated directory snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file override
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Make new backups
    Store {
        /// Archive names (without date suffix); all of them, smallest
        /// first, when none are given
        archives: Vec<String>,

        /// Overwrite an existing archive instead of adding a .N suffix
        #[arg(short, long)]
        force: bool,
    },

    /// View current backups grouped by archive
    View,

    /// Rename a remote archive
    Rename {
        /// Old archive name
        old: String,

        /// New archive name
        new: String,
    },

    /// List archives matching an optional substring
    List {
        /// Substring to match
        substring: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    // Loaded once; every component takes it by reference.
    let config = Config::load(cli.config.as_deref())?;
    let remote = Tarsnap::new(&config.tool);

    match cli.command {
        Commands::Store { archives, force } => {
            snapkeep::cli::store::execute(&config, &remote, &archives, force)?;
        }
        Commands::View => {
            snapkeep::cli::view::execute(&remote)?;
        }
        Commands::Rename { old, new } => {
            snapkeep::cli::rename::execute(&remote, &old, &new)?;
        }
        Commands::List { substring } => {
            snapkeep::cli::list::execute(&remote, substring.as_deref())?;
        }
    }

    Ok(())
}
