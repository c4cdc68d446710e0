//! Record body encoding and decoding
//!
//! The body is a sequence of fixed-stride records. Each record stores one
//! value per column, in schema order, little-endian:
//!
//! ```text
//! record 0: [col 0][col 1]...[col n-1]
//! record 1: [col 0][col 1]...[col n-1]
//! ...
//! ```
//!
//! Length is always `num_points × stride`.

use crate::error::{ParticleError, Result};
use crate::schema::{ScalarType, Schema};
use crate::table::{ColumnData, ParticleTable, TableColumn};

/// Decode a record body using `schema`.
///
/// The body must hold a whole number of records.
pub fn decode_body(bytes: &[u8], schema: &Schema) -> Result<ParticleTable> {
    let stride = schema.stride();
    if stride == 0 {
        if !bytes.is_empty() {
            return Err(ParticleError::ZeroStrideBody(bytes.len()));
        }
        return Ok(ParticleTable::new());
    }

    let num_points = bytes.len() / stride;
    let remainder = bytes.len() % stride;
    if remainder != 0 {
        return Err(ParticleError::TruncatedRecord {
            record: num_points,
            stride,
            remaining: remainder,
        });
    }
    tracing::debug!("Decoding {} records of {} bytes", num_points, stride);

    let mut columns = Vec::with_capacity(schema.len());
    let mut offset = 0;
    for column in schema.columns() {
        let data = decode_column(bytes, stride, offset, column.scalar_type(), num_points);
        columns.push(TableColumn {
            name: column.name().to_string(),
            data,
        });
        offset += column.byte_width();
    }

    Ok(ParticleTable::from_decoded(columns, num_points))
}

/// Read one column out of every record
fn decode_column(
    bytes: &[u8],
    stride: usize,
    offset: usize,
    scalar_type: ScalarType,
    num_points: usize,
) -> ColumnData {
    let records = bytes.chunks_exact(stride);
    let mut data = ColumnData::with_capacity(scalar_type, num_points);
    match &mut data {
        ColumnData::Bool(values) => {
            values.extend(records.map(|r| r[offset] != 0));
        }
        ColumnData::Int32(values) => {
            values.extend(records.map(|r| i32::from_le_bytes(field(r, offset))));
        }
        ColumnData::Int64(values) => {
            values.extend(records.map(|r| i64::from_le_bytes(field(r, offset))));
        }
        ColumnData::Float64(values) => {
            values.extend(records.map(|r| f64::from_le_bytes(field(r, offset))));
        }
    }
    data
}

/// Copy `N` bytes at `offset` out of a record
fn field<const N: usize>(record: &[u8], offset: usize) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&record[offset..offset + N]);
    buf
}

/// Encode the table body.
///
/// Output length is exactly `num_points × stride`.
pub fn encode_body(table: &ParticleTable) -> Result<Vec<u8>> {
    let schema = table.schema()?;
    let mut out = Vec::new();
    write_body(table, &schema, &mut out)?;
    Ok(out)
}

/// Append the body for `table` to `out`.
///
/// `schema` must be the one derived from `table` via [`ParticleTable::schema`].
pub(crate) fn write_body(table: &ParticleTable, schema: &Schema, out: &mut Vec<u8>) -> Result<()> {
    let stride = schema.stride();
    let start = out.len();
    out.resize(start + table.num_points() * stride, 0);
    if stride == 0 {
        return Ok(());
    }
    let body = &mut out[start..];

    let mut offset = 0;
    for (column, desc) in table.columns().iter().zip(schema.columns()) {
        let records = body.chunks_exact_mut(stride);
        let width = desc.byte_width();
        let slot = offset..offset + width;

        match (&column.data, desc.scalar_type()) {
            (ColumnData::Bool(values), ScalarType::Bool) => {
                for (record, &v) in records.zip(values) {
                    record[offset] = v as u8;
                }
            }
            (ColumnData::Int32(values), ScalarType::Int32) => {
                for (record, v) in records.zip(values) {
                    record[slot.clone()].copy_from_slice(&v.to_le_bytes());
                }
            }
            (ColumnData::Int64(values), ScalarType::Int32) => {
                for (record, &v) in records.zip(values) {
                    let narrow =
                        i32::try_from(v).map_err(|_| ParticleError::ValueOutOfRange {
                            name: column.name.clone(),
                            value: v,
                            width,
                        })?;
                    record[slot.clone()].copy_from_slice(&narrow.to_le_bytes());
                }
            }
            (ColumnData::Int64(values), ScalarType::Int64Timestamp) => {
                for (record, v) in records.zip(values) {
                    record[slot.clone()].copy_from_slice(&v.to_le_bytes());
                }
            }
            (ColumnData::Float64(values), ScalarType::Float64) => {
                for (record, v) in records.zip(values) {
                    record[slot.clone()].copy_from_slice(&v.to_le_bytes());
                }
            }
            (_, found) => {
                return Err(ParticleError::UnsupportedColumnType {
                    name: column.name.clone(),
                    found,
                });
            }
        }

        offset += width;
    }

    Ok(())
}
