//! Convert command - re-encode a particle file
//!
//! The output variant follows the output extension, so this converts
//! between `.dat` and `.gz` (or rewrites a file in place).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use particle_format::{WriteOptions, read_particle_file, write_particle_file_with};

/// Arguments for the convert command
#[derive(Args)]
pub struct ConvertArgs {
    /// Input particle file (.dat or .gz)
    pub input: PathBuf,

    /// Output particle file (.dat or .gz)
    pub output: PathBuf,

    /// Gzip level for .gz output (0-9)
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: u32,
}

/// Execute the convert command
pub fn execute(args: ConvertArgs) -> Result<()> {
    tracing::info!("Converting {:?} -> {:?}", args.input, args.output);

    let table = read_particle_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let options = WriteOptions {
        compression_level: args.level,
        ..WriteOptions::default()
    };
    write_particle_file_with(&table, &args.output, &options)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    tracing::info!("Done!");
    Ok(())
}
