//! Info command - show the layout of a particle file

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use particle_format::{FileFormat, ParticleTable, ScalarType, read_particle_file};
use serde::Serialize;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Particle file (.dat or .gz)
    pub input: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Layout summary of one file
#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub format: FileFormat,
    pub num_points: usize,
    pub stride: usize,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub byte_width: usize,
    pub scalar_type: ScalarType,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let table = read_particle_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let summary = summarize(&args.input, &table)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_text(&summary));
    }
    Ok(())
}

/// Build the summary for a loaded table
pub fn summarize(path: &Path, table: &ParticleTable) -> Result<FileSummary> {
    let format = FileFormat::from_path(path)?;
    let schema = table.schema()?;

    let columns = schema
        .columns()
        .iter()
        .map(|c| ColumnSummary {
            name: c.name().to_string(),
            byte_width: c.byte_width(),
            scalar_type: c.scalar_type(),
        })
        .collect();

    Ok(FileSummary {
        path: path.to_path_buf(),
        format,
        num_points: table.num_points(),
        stride: schema.stride(),
        columns,
    })
}

/// Human-readable summary
pub fn render_text(summary: &FileSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", summary.path.display());
    let _ = writeln!(out, "  Format: {}", summary.format.extension());
    let _ = writeln!(out, "  Points: {}", summary.num_points);
    let _ = writeln!(out, "  Stride: {} bytes", summary.stride);
    let _ = writeln!(out, "  Columns: {}", summary.columns.len());

    let name_width = summary
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);
    for (i, col) in summary.columns.iter().enumerate() {
        let _ = writeln!(
            out,
            "    [{:>2}] {:<name_width$}  {} bytes  {}",
            i,
            col.name,
            col.byte_width,
            col.scalar_type.name(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_format::ColumnData;

    fn table() -> ParticleTable {
        ParticleTable::from_columns([
            ("frame-timestamp", ColumnData::Int64(vec![100, 200])),
            ("x", ColumnData::Float64(vec![0.5, 1.5])),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary() {
        let summary = summarize(Path::new("run1.dat.gz"), &table()).unwrap();
        assert_eq!(summary.format, FileFormat::Gzip);
        assert_eq!(summary.num_points, 2);
        assert_eq!(summary.stride, 16);
        assert_eq!(summary.columns[0].scalar_type, ScalarType::Int64Timestamp);
    }

    #[test]
    fn test_render_text() {
        let summary = summarize(Path::new("run1.dat"), &table()).unwrap();
        let text = render_text(&summary);
        assert!(text.contains("Points: 2"));
        assert!(text.contains("Stride: 16 bytes"));
        assert!(text.contains("frame-timestamp  8 bytes  int64"));
        assert!(text.contains("x                8 bytes  float64"));
    }

    #[test]
    fn test_json_output() {
        let summary = summarize(Path::new("run1.dat"), &table()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["format"], "Raw");
        assert_eq!(json["num_points"], 2);
        assert_eq!(json["columns"][1]["name"], "x");
        assert_eq!(json["columns"][1]["scalar_type"], "Float64");
    }
}
