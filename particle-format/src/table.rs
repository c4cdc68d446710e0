//! In-memory particle table (column-major)
//!
//! Each column holds one [`ColumnData`] variant, decided when the column is
//! added. All columns share the same length (`num_points`).

use std::fmt;

use hashbrown::HashMap;

use crate::TIMESTAMP_COLUMN;
use crate::error::{ParticleError, Result};
use crate::schema::{Column, ScalarType, Schema};

/// Values of one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float64(Vec<f64>),
}

impl ColumnData {
    /// Empty column data able to hold values of `scalar_type`
    pub fn with_capacity(scalar_type: ScalarType, capacity: usize) -> Self {
        match scalar_type {
            ScalarType::Bool => ColumnData::Bool(Vec::with_capacity(capacity)),
            ScalarType::Int32 => ColumnData::Int32(Vec::with_capacity(capacity)),
            ScalarType::Int64Timestamp => ColumnData::Int64(Vec::with_capacity(capacity)),
            ScalarType::Float64 => ColumnData::Float64(Vec::with_capacity(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Bool(v) => v.len(),
            ColumnData::Int32(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `row`, if in range
    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            ColumnData::Bool(v) => v.get(row).copied().map(Value::Bool),
            ColumnData::Int32(v) => v.get(row).map(|&x| Value::Int(x as i64)),
            ColumnData::Int64(v) => v.get(row).copied().map(Value::Int),
            ColumnData::Float64(v) => v.get(row).copied().map(Value::Float),
        }
    }

    pub fn as_bool(&self) -> Option<&[bool]> {
        match self {
            ColumnData::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&[i32]> {
        match self {
            ColumnData::Int32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match self {
            ColumnData::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Float64(v) => Some(v),
            _ => None,
        }
    }

    /// On-disk type this data is stored as under column `name`.
    ///
    /// Int64 data is only stored as 8 bytes under the timestamp name;
    /// elsewhere it is narrowed to 4-byte ints. Float64 data cannot be
    /// stored under the timestamp name, since it would decode as an integer.
    pub fn storage_type(&self, name: &str) -> Result<ScalarType> {
        let is_timestamp = name == TIMESTAMP_COLUMN;
        match self {
            ColumnData::Bool(_) => Ok(ScalarType::Bool),
            ColumnData::Int32(_) => Ok(ScalarType::Int32),
            ColumnData::Int64(_) if is_timestamp => Ok(ScalarType::Int64Timestamp),
            ColumnData::Int64(_) => Ok(ScalarType::Int32),
            ColumnData::Float64(_) if is_timestamp => Err(ParticleError::UnsupportedColumnType {
                name: name.to_string(),
                found: ScalarType::Float64,
            }),
            ColumnData::Float64(_) => Ok(ScalarType::Float64),
        }
    }
}

/// A single cell value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Named column of a [`ParticleTable`]
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub name: String,
    pub data: ColumnData,
}

/// Column-major particle table
#[derive(Debug, Clone, Default)]
pub struct ParticleTable {
    columns: Vec<TableColumn>,
    num_points: usize,
    /// Name -> position in `columns`
    index: HashMap<String, usize>,
}

impl PartialEq for ParticleTable {
    fn eq(&self, other: &Self) -> bool {
        self.num_points == other.num_points && self.columns == other.columns
    }
}

impl ParticleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from named columns.
    ///
    /// Fails if names repeat or column lengths differ.
    pub fn from_columns<N: Into<String>>(
        columns: impl IntoIterator<Item = (N, ColumnData)>,
    ) -> Result<Self> {
        let mut table = Self::new();
        for (name, data) in columns {
            table.push_column(name, data)?;
        }
        Ok(table)
    }

    /// Append a column.
    ///
    /// The first column fixes `num_points`; later columns must match it.
    pub fn push_column(&mut self, name: impl Into<String>, data: ColumnData) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ParticleError::DuplicateColumnName(name));
        }
        if self.columns.is_empty() {
            self.num_points = data.len();
        } else if data.len() != self.num_points {
            return Err(ParticleError::ColumnLengthMismatch {
                name,
                len: data.len(),
                expected: self.num_points,
            });
        }

        self.index.insert(name.clone(), self.columns.len());
        self.columns.push(TableColumn { name, data });
        Ok(())
    }

    /// Build a table from columns already known to be unique and equal length
    pub(crate) fn from_decoded(columns: Vec<TableColumn>, num_points: usize) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            columns,
            num_points,
            index,
        }
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.index.get(name).map(|&i| &self.columns[i].data)
    }

    /// Look up a column by position
    pub fn column_at(&self, index: usize) -> Option<&TableColumn> {
        self.columns.get(index)
    }

    /// Values of one row, in column order
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.num_points {
            return None;
        }
        self.columns.iter().map(|c| c.data.get(row)).collect()
    }

    /// On-disk schema for this table
    pub fn schema(&self) -> Result<Schema> {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let scalar_type = c.data.storage_type(&c.name)?;
                if matches!(c.data, ColumnData::Int64(_)) && scalar_type == ScalarType::Int32 {
                    tracing::warn!("Column {:?} holds 64-bit integers, storing as 4 bytes", c.name);
                }
                Ok(Column::new(c.name.clone(), scalar_type))
            })
            .collect::<Result<Vec<_>>>()?;
        Schema::new(columns)
    }
}
