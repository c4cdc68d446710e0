//! Particle-Format: reader and writer for binary particle tables
//!
//! Particle files exchange localization tables (e.g. microscopy particle
//! detections) between tools. A file is a self-describing header followed by
//! fixed-stride records.
//!
//! # Format Overview
//!
//! ```text
//! header:  num_cols i32
//!          per column: name_len i32, name [u8], byte_width i32
//! body:    num_points × stride bytes, row-major
//! ```
//!
//! All integers are little-endian. The byte width decides each column's
//! type: 1 = bool, 4 = i32, 8 = f64. A width-8 column named
//! `frame-timestamp` holds i64 timestamps instead.
//!
//! Files ending in `.dat` hold these bytes as-is; files ending in `.gz` hold
//! them as one gzip stream.
//!
//! Whole files are held in memory. Raw files are read at any size by
//! default; gzip streams are capped at 4 GiB once decompressed. Both limits
//! are set through [`ReadOptions`].
//!
//! # Usage
//!
//! ```no_run
//! use particle_format::{ColumnData, ParticleTable, read_particle_file, write_particle_file};
//!
//! let table = ParticleTable::from_columns([
//!     ("id", ColumnData::Int32(vec![1, 2, 3])),
//!     ("x", ColumnData::Float64(vec![0.5, 1.5, 2.5])),
//! ])?;
//!
//! write_particle_file(&table, "particles.dat.gz")?;
//! let loaded = read_particle_file("particles.dat.gz")?;
//! assert_eq!(loaded, table);
//! # Ok::<(), particle_format::ParticleError>(())
//! ```

pub mod body;
pub mod compression;
mod error;
pub mod io;
pub mod schema;
pub mod table;

pub use body::{decode_body, encode_body};
pub use compression::FileFormat;
pub use error::{ParticleError, Result};
pub use io::{
    ReadOptions, WriteOptions, decode_bytes, encode_bytes, read_particle_file,
    read_particle_file_with, write_particle_file, write_particle_file_as,
    write_particle_file_with,
};
pub use schema::{Column, ScalarType, Schema, resolve_type};
pub use table::{ColumnData, ParticleTable, TableColumn, Value};

// =============================================================================
// Constants
// =============================================================================

/// Column name whose 8-byte values are i64 timestamps rather than f64
pub const TIMESTAMP_COLUMN: &str = "frame-timestamp";

/// Extension of uncompressed particle files
pub const RAW_EXT: &str = "dat";

/// Extension of gzip-compressed particle files
pub const GZIP_EXT: &str = "gz";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(TIMESTAMP_COLUMN, "frame-timestamp");
        assert_eq!(FileFormat::Raw.extension(), RAW_EXT);
        assert_eq!(FileFormat::Gzip.extension(), GZIP_EXT);
    }
}
