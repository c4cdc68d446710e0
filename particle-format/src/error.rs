//! Particle file error types

use std::path::PathBuf;

use crate::schema::ScalarType;

/// Errors produced while reading or writing particle files
#[derive(Debug, thiserror::Error)]
pub enum ParticleError {
    #[error("Could not find file: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file extension: {} (use .dat or .gz)", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("File has no content")]
    EmptyFileContent,

    #[error("File too large: {len} bytes (max {max} bytes)")]
    FileTooLarge { len: u64, max: u64 },

    /// A header field would run past the end of the buffer
    #[error("Truncated header at offset {offset}: need {needed} bytes, {remaining} remaining")]
    TruncatedHeader {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// Fewer bytes remain than one full record requires
    #[error("Truncated record {record}: stride is {stride} bytes, {remaining} remaining")]
    TruncatedRecord {
        record: usize,
        stride: usize,
        remaining: usize,
    },

    #[error("Negative {field} in header at offset {offset}: {value}")]
    NegativeLength {
        field: &'static str,
        offset: usize,
        value: i32,
    },

    #[error("Column name at offset {offset} is not valid UTF-8")]
    InvalidColumnName { offset: usize },

    #[error("Duplicate column name: {0:?}")]
    DuplicateColumnName(String),

    #[error("Column {name:?} has {len} values, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("Schema has no columns but body holds {0} bytes")]
    ZeroStrideBody(usize),

    /// Byte width outside {1, 4, 8} while decoding a header
    #[error("Unknown byte width {width} for column {name:?}")]
    UnknownColumnType { name: String, width: i32 },

    /// Column data that the on-disk format cannot represent
    #[error("Column {name:?} cannot be stored as {found:?}")]
    UnsupportedColumnType { name: String, found: ScalarType },

    #[error("Corrupt compressed data: {0}")]
    CorruptCompressedData(String),

    #[error("Value {value} in column {name:?} does not fit in {width} bytes")]
    ValueOutOfRange {
        name: String,
        value: i64,
        width: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for particle file operations
pub type Result<T> = std::result::Result<T, ParticleError>;
