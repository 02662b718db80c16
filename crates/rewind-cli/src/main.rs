mod commands;
mod session;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rewind", about = "Raster image editor with replayable history")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Editor config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image file metadata
    Info(commands::info::InfoArgs),
    /// Start an editing session driven by line commands
    Edit(commands::edit::EditArgs),
    /// Print the default editor config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Info(args) => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::info::run(args, &config)
        }
        Commands::Edit(args) => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::edit::run(args, config)
        }
        Commands::Config(args) => commands::config::run(args),
    }
}
