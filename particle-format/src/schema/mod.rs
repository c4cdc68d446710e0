//! Particle file header (schema)
//!
//! # Layout
//! ```text
//! 0x00: num_cols i32
//! per column:
//!       name_len   i32
//!       name       [u8; name_len] (UTF-8)
//!       byte_width i32 (1, 4 or 8)
//! ```
//!
//! All integers are little-endian.

mod types;

#[cfg(test)]
mod tests;

pub use types::{Column, ScalarType, resolve_type};

use hashbrown::HashSet;
use serde::Serialize;

use crate::error::{ParticleError, Result};

/// Size of every integer field in the header
const HEADER_INT_SIZE: usize = 4;

/// Smallest possible encoded column entry (empty name)
const MIN_COLUMN_ENTRY_SIZE: usize = 2 * HEADER_INT_SIZE;

/// Ordered column descriptors defining the record layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema, rejecting duplicate column names
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        {
            let mut seen = HashSet::with_capacity(columns.len());
            for column in &columns {
                if !seen.insert(column.name()) {
                    return Err(ParticleError::DuplicateColumnName(
                        column.name().to_string(),
                    ));
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Record stride: sum of all column byte widths
    pub fn stride(&self) -> usize {
        self.columns.iter().map(Column::byte_width).sum()
    }

    /// Exact number of bytes `encode` produces
    pub fn encoded_len(&self) -> usize {
        HEADER_INT_SIZE
            + self
                .columns
                .iter()
                .map(|c| MIN_COLUMN_ENTRY_SIZE + c.name().len())
                .sum::<usize>()
    }

    /// Encode the header into a new buffer
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Append the encoded header to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        let num_cols = header_int("column count", self.columns.len())?;
        out.extend_from_slice(&num_cols.to_le_bytes());

        for column in &self.columns {
            let name = column.name().as_bytes();
            let name_len = header_int(column.name(), name.len())?;
            out.extend_from_slice(&name_len.to_le_bytes());
            out.extend_from_slice(name);
            // Widths are 1, 4 or 8
            out.extend_from_slice(&(column.byte_width() as i32).to_le_bytes());
        }

        Ok(())
    }

    /// Decode a header starting at `offset`.
    ///
    /// Returns the schema and the number of bytes consumed. Any failure
    /// aborts the whole decode; no partial schema is returned.
    pub fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = HeaderReader::new(bytes, offset);

        let num_cols = reader.read_len("column count")?;
        tracing::debug!("Header declares {} columns", num_cols);

        // A hostile count must not drive the allocation
        let max_cols = reader.remaining() / MIN_COLUMN_ENTRY_SIZE;
        let mut columns = Vec::with_capacity(num_cols.min(max_cols));

        for _ in 0..num_cols {
            let name_len = reader.read_len("name length")?;
            let name_offset = reader.pos;
            let name = std::str::from_utf8(reader.read_bytes(name_len)?)
                .map_err(|_| ParticleError::InvalidColumnName {
                    offset: name_offset,
                })?
                .to_string();
            let byte_width = reader.read_i32()?;
            columns.push(Column::from_header(name, byte_width)?);
        }

        let schema = Self::new(columns)?;
        Ok((schema, reader.pos - offset))
    }
}

/// Convert a length to the header's i32 representation
fn header_int(name: &str, value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| ParticleError::ValueOutOfRange {
        name: name.to_string(),
        value: value as i64,
        width: HEADER_INT_SIZE,
    })
}

/// Bounds-checked little-endian reader over the header bytes
struct HeaderReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(ParticleError::TruncatedHeader {
                offset: self.pos,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(HEADER_INT_SIZE)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a count or length field, which must not be negative
    fn read_len(&mut self, field: &'static str) -> Result<usize> {
        let offset = self.pos;
        let value = self.read_i32()?;
        usize::try_from(value).map_err(|_| ParticleError::NegativeLength {
            field,
            offset,
            value,
        })
    }
}
