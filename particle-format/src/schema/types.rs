//! Scalar types and column descriptors

use serde::{Deserialize, Serialize};

use crate::TIMESTAMP_COLUMN;
use crate::error::{ParticleError, Result};

/// On-disk scalar type of a column
///
/// Determined by byte width, except for width 8 where the column name
/// decides between a timestamp and a double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// 1 byte, 0 or 1
    Bool,
    /// 4 bytes, signed little-endian
    Int32,
    /// 8 bytes, signed little-endian (only for `frame-timestamp`)
    Int64Timestamp,
    /// 8 bytes, IEEE-754 little-endian
    Float64,
}

impl ScalarType {
    /// Number of bytes one value occupies in a record
    pub const fn byte_width(self) -> usize {
        match self {
            ScalarType::Bool => 1,
            ScalarType::Int32 => 4,
            ScalarType::Int64Timestamp | ScalarType::Float64 => 8,
        }
    }

    /// Short lowercase name (for display)
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int32 => "int32",
            ScalarType::Int64Timestamp => "int64",
            ScalarType::Float64 => "float64",
        }
    }
}

/// Resolve the scalar type for a header entry.
///
/// The timestamp check is an exact, case-sensitive match on the decoded name.
pub fn resolve_type(byte_width: i32, name: &str) -> Result<ScalarType> {
    match byte_width {
        1 => Ok(ScalarType::Bool),
        4 => Ok(ScalarType::Int32),
        8 if name == TIMESTAMP_COLUMN => Ok(ScalarType::Int64Timestamp),
        8 => Ok(ScalarType::Float64),
        _ => Err(ParticleError::UnknownColumnType {
            name: name.to_string(),
            width: byte_width,
        }),
    }
}

/// Column descriptor: name plus on-disk type.
///
/// The byte width is always derived from the type, so a descriptor can never
/// carry a width that disagrees with its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    name: String,
    scalar_type: ScalarType,
}

impl Column {
    /// Create a column of the given type.
    ///
    /// # Panics
    /// Panics if `scalar_type` is `Int64Timestamp` and `name` is not
    /// `frame-timestamp`, or `Float64` and it is; such a header would not
    /// decode back to the same type.
    pub fn new(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        let name = name.into();
        let is_timestamp = name == TIMESTAMP_COLUMN;
        match scalar_type {
            ScalarType::Int64Timestamp => assert!(
                is_timestamp,
                "Int64Timestamp column must be named {TIMESTAMP_COLUMN:?}, got {name:?}"
            ),
            ScalarType::Float64 => assert!(
                !is_timestamp,
                "Float64 column cannot be named {TIMESTAMP_COLUMN:?}"
            ),
            ScalarType::Bool | ScalarType::Int32 => {}
        }
        Self { name, scalar_type }
    }

    /// Create a column from a decoded header entry
    pub fn from_header(name: String, byte_width: i32) -> Result<Self> {
        let scalar_type = resolve_type(byte_width, &name)?;
        Ok(Self { name, scalar_type })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn byte_width(&self) -> usize {
        self.scalar_type.byte_width()
    }
}
