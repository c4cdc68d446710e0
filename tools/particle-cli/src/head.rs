//! Head command - print the first rows of a particle file

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use particle_format::{ParticleTable, read_particle_file};

/// Arguments for the head command
#[derive(Args)]
pub struct HeadArgs {
    /// Particle file (.dat or .gz)
    pub input: PathBuf,

    /// Number of rows to print
    #[arg(short = 'n', long, default_value_t = 10)]
    pub rows: usize,
}

/// Execute the head command
pub fn execute(args: HeadArgs) -> Result<()> {
    let table = read_particle_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    print!("{}", render_rows(&table, args.rows));
    Ok(())
}

/// Render up to `limit` rows as a right-aligned text table
pub fn render_rows(table: &ParticleTable, limit: usize) -> String {
    let shown = limit.min(table.num_points());

    let header: Vec<String> = table.column_names().map(str::to_string).collect();
    let cells: Vec<Vec<String>> = (0..shown)
        .filter_map(|row| table.row(row))
        .map(|values| values.iter().map(ToString::to_string).collect())
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in std::iter::once(&header).chain(cells.iter()) {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:>w$}", cell))
            .collect();
        let _ = writeln!(out, "{}", padded.join("  "));
    }

    if shown < table.num_points() {
        let _ = writeln!(out, "... {} more rows", table.num_points() - shown);
    }
    out
}
