//! Reading and writing particle files
//!
//! Read: file bytes → decompress → header → body → [`ParticleTable`]
//!
//! Write: [`ParticleTable`] → header + body → compress → temp file → rename

use std::io::Write;
use std::path::Path;

use crate::body::{decode_body, write_body};
use crate::compression::FileFormat;
use crate::error::{ParticleError, Result};
use crate::schema::Schema;
use crate::table::ParticleTable;

/// Default cap on decompressed gzip output (4 GiB)
pub const DEFAULT_MAX_DECOMPRESSED_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// Default gzip level
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Options for reading particle files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Maximum size of the file on disk; `None` reads files of any size
    pub max_file_bytes: Option<u64>,
    /// Maximum size of a gzip stream once decompressed
    pub max_decompressed_bytes: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: None,
            max_decompressed_bytes: DEFAULT_MAX_DECOMPRESSED_BYTES,
        }
    }
}

/// Options for writing particle files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Output variant; `None` selects it from the path extension
    pub format: Option<FileFormat>,
    /// Gzip level (0-9), used for the gzip variant only
    pub compression_level: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            format: None,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

/// Decode an uncompressed particle buffer.
pub fn decode_bytes(bytes: &[u8]) -> Result<ParticleTable> {
    if bytes.is_empty() {
        return Err(ParticleError::EmptyFileContent);
    }
    let (schema, header_len) = Schema::decode(bytes, 0)?;
    tracing::debug!(
        "Header: {} columns, {} bytes, stride {}",
        schema.len(),
        header_len,
        schema.stride()
    );
    decode_body(&bytes[header_len..], &schema)
}

/// Encode a table into an uncompressed particle buffer.
pub fn encode_bytes(table: &ParticleTable) -> Result<Vec<u8>> {
    let schema = table.schema()?;
    let total = schema.encoded_len() + table.num_points() * schema.stride();

    let mut out = Vec::with_capacity(total);
    schema.encode_into(&mut out)?;
    write_body(table, &schema, &mut out)?;
    debug_assert_eq!(out.len(), total);
    Ok(out)
}

/// Read a `.dat` or `.gz` particle file.
pub fn read_particle_file(path: impl AsRef<Path>) -> Result<ParticleTable> {
    read_particle_file_with(path, &ReadOptions::default())
}

/// Read a particle file with explicit options.
pub fn read_particle_file_with(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> Result<ParticleTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ParticleError::FileNotFound(path.to_path_buf()));
    }
    let format = FileFormat::from_path(path)?;

    let raw = match options.max_file_bytes {
        Some(max_bytes) => read_file_with_limit(path, max_bytes)?,
        None => std::fs::read(path)?,
    };
    let bytes = format.decompress(raw, options.max_decompressed_bytes)?;
    let table = decode_bytes(&bytes)?;

    tracing::info!(
        "Read {} points ({} columns) from {}",
        table.num_points(),
        table.num_columns(),
        path.display()
    );
    Ok(table)
}

/// Write a table, choosing the variant from the path extension.
pub fn write_particle_file(table: &ParticleTable, path: impl AsRef<Path>) -> Result<()> {
    write_particle_file_with(table, path, &WriteOptions::default())
}

/// Write a table in an explicit variant, whatever the path extension.
pub fn write_particle_file_as(
    table: &ParticleTable,
    path: impl AsRef<Path>,
    format: FileFormat,
) -> Result<()> {
    let options = WriteOptions {
        format: Some(format),
        ..WriteOptions::default()
    };
    write_particle_file_with(table, path, &options)
}

/// Write a table with explicit options.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// failure never leaves a partial file at `path`.
pub fn write_particle_file_with(
    table: &ParticleTable,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let format = match options.format {
        Some(format) => format,
        None => FileFormat::from_path(path)?,
    };

    let encoded = encode_bytes(table)?;
    let bytes = format.compress(encoded, options.compression_level)?;
    write_atomic(path, &bytes)?;

    tracing::info!(
        "Wrote {} points ({} columns, {} bytes) to {}",
        table.num_points(),
        table.num_columns(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Read a file into memory with a size cap.
fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let len = std::fs::metadata(path)?.len();
    if len > max_bytes {
        return Err(ParticleError::FileTooLarge {
            len,
            max: max_bytes,
        });
    }
    Ok(std::fs::read(path)?)
}

/// Write via a temp file in the destination directory, then rename.
///
/// An existing destination keeps its permissions; a new file gets the
/// same permissions a plain `fs::write` would give it.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Masked by the process umask on creation
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;

    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ParticleError::Io(e.error))?;
    Ok(())
}
