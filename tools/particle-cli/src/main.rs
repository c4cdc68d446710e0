//! Particle CLI - inspect and convert particle files
//!
//! # Commands
//!
//! - `particle info` - Show the column layout and point count
//! - `particle head` - Print the first rows
//! - `particle convert` - Re-encode between `.dat` and `.gz`
//!
//! # Usage
//!
//! ```bash
//! particle info particles.dat.gz
//! particle info particles.dat --json
//! particle head particles.dat -n 20
//! particle convert particles.dat particles.dat.gz --level 9
//! ```

mod convert;
mod head;
mod info;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Particle CLI - inspect and convert particle files
#[derive(Parser)]
#[command(name = "particle")]
#[command(about = "Inspect and convert binary particle files")]
#[command(version)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show column names, types and point count
    Info(info::InfoArgs),

    /// Print the first rows as a text table
    Head(head::HeadArgs),

    /// Re-encode a file (format chosen by output extension)
    Convert(convert::ConvertArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info(args) => info::execute(args),
        Commands::Head(args) => head::execute(args),
        Commands::Convert(args) => convert::execute(args),
    }
}
