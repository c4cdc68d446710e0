//! Tests for header encoding and decoding

use super::*;

/// Build a raw header by hand: (name, width) pairs
fn raw_header(columns: &[(&str, i32)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&(columns.len() as i32).to_le_bytes());
    for (name, width) in columns {
        bytes.extend_from_slice(&(name.len() as i32).to_le_bytes());
        bytes.extend_from_slice(name.as_bytes());
        bytes.extend_from_slice(&width.to_le_bytes());
    }
    bytes
}

fn id_x_schema() -> Schema {
    Schema::new(vec![
        Column::new("id", ScalarType::Int32),
        Column::new("x", ScalarType::Float64),
    ])
    .unwrap()
}

#[test]
fn test_encode_layout() {
    let bytes = id_x_schema().encode().unwrap();

    #[rustfmt::skip]
    let expected = [
        0x02, 0x00, 0x00, 0x00, // num_cols = 2
        0x02, 0x00, 0x00, 0x00, // name_len = 2
        b'i', b'd',
        0x04, 0x00, 0x00, 0x00, // byte_width = 4
        0x01, 0x00, 0x00, 0x00, // name_len = 1
        b'x',
        0x08, 0x00, 0x00, 0x00, // byte_width = 8
    ];
    assert_eq!(bytes, expected);
    assert_eq!(bytes.len(), id_x_schema().encoded_len());
}

#[test]
fn test_decode_matches_hand_built_header() {
    let bytes = raw_header(&[("id", 4), ("x", 8), ("in-focus", 1)]);
    let (schema, consumed) = Schema::decode(&bytes, 0).unwrap();

    assert_eq!(consumed, bytes.len());
    assert_eq!(schema.len(), 3);
    assert_eq!(schema.stride(), 13);
    assert_eq!(schema.columns()[0].scalar_type(), ScalarType::Int32);
    assert_eq!(schema.columns()[1].scalar_type(), ScalarType::Float64);
    assert_eq!(schema.columns()[2].scalar_type(), ScalarType::Bool);
    assert_eq!(schema.column("in-focus").unwrap().byte_width(), 1);
}

#[test]
fn test_decode_at_offset_reports_consumed_bytes() {
    let mut bytes = vec![0xAA; 5];
    let header = raw_header(&[("y", 8)]);
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&[0u8; 8]);

    let (schema, consumed) = Schema::decode(&bytes, 5).unwrap();
    assert_eq!(consumed, header.len());
    assert_eq!(schema.columns()[0].name(), "y");
}

#[test]
fn test_decode_timestamp_column() {
    let bytes = raw_header(&[("frame-timestamp", 8), ("x", 8)]);
    let (schema, _) = Schema::decode(&bytes, 0).unwrap();

    assert_eq!(
        schema.columns()[0].scalar_type(),
        ScalarType::Int64Timestamp
    );
    assert_eq!(schema.columns()[1].scalar_type(), ScalarType::Float64);
}

#[test]
fn test_decode_unknown_width_aborts() {
    let bytes = raw_header(&[("id", 4), ("half", 2)]);
    let err = Schema::decode(&bytes, 0).unwrap_err();
    assert!(matches!(
        err,
        ParticleError::UnknownColumnType { ref name, width: 2 } if name == "half"
    ));
}

#[test]
fn test_decode_truncated_count() {
    let err = Schema::decode(&[0x01, 0x00], 0).unwrap_err();
    assert!(matches!(
        err,
        ParticleError::TruncatedHeader {
            offset: 0,
            needed: 4,
            remaining: 2
        }
    ));
}

#[test]
fn test_decode_truncated_name() {
    let mut bytes = raw_header(&[("position", 8)]);
    // Cut inside the name
    bytes.truncate(4 + 4 + 3);
    let err = Schema::decode(&bytes, 0).unwrap_err();
    assert!(matches!(err, ParticleError::TruncatedHeader { offset: 8, .. }));
}

#[test]
fn test_decode_truncated_width() {
    let mut bytes = raw_header(&[("x", 8)]);
    bytes.pop();
    let err = Schema::decode(&bytes, 0).unwrap_err();
    assert!(matches!(err, ParticleError::TruncatedHeader { .. }));
}

#[test]
fn test_decode_more_columns_than_present() {
    let mut bytes = raw_header(&[("x", 8)]);
    bytes[0..4].copy_from_slice(&1000i32.to_le_bytes());
    let err = Schema::decode(&bytes, 0).unwrap_err();
    assert!(matches!(err, ParticleError::TruncatedHeader { .. }));
}

#[test]
fn test_decode_negative_lengths() {
    let err = Schema::decode(&(-1i32).to_le_bytes(), 0).unwrap_err();
    assert!(matches!(
        err,
        ParticleError::NegativeLength {
            field: "column count",
            value: -1,
            ..
        }
    ));

    let mut bytes = raw_header(&[("x", 8)]);
    bytes[4..8].copy_from_slice(&(-5i32).to_le_bytes());
    let err = Schema::decode(&bytes, 0).unwrap_err();
    assert!(matches!(
        err,
        ParticleError::NegativeLength {
            field: "name length",
            offset: 4,
            value: -5
        }
    ));
}

#[test]
fn test_decode_invalid_utf8_name() {
    let mut bytes = raw_header(&[("ab", 8)]);
    bytes[8] = 0xFF;
    let err = Schema::decode(&bytes, 0).unwrap_err();
    assert!(matches!(err, ParticleError::InvalidColumnName { offset: 8 }));
}

#[test]
fn test_decode_utf8_name() {
    let bytes = raw_header(&[("σ-x", 8)]);
    let (schema, _) = Schema::decode(&bytes, 0).unwrap();
    assert_eq!(schema.columns()[0].name(), "σ-x");
}

#[test]
fn test_duplicate_names_rejected() {
    let bytes = raw_header(&[("x", 8), ("x", 4)]);
    let err = Schema::decode(&bytes, 0).unwrap_err();
    assert!(matches!(err, ParticleError::DuplicateColumnName(ref n) if n == "x"));

    let err = Schema::new(vec![
        Column::new("x", ScalarType::Float64),
        Column::new("x", ScalarType::Float64),
    ])
    .unwrap_err();
    assert!(matches!(err, ParticleError::DuplicateColumnName(_)));
}

#[test]
fn test_empty_schema() {
    let schema = Schema::default();
    let bytes = schema.encode().unwrap();
    assert_eq!(bytes, 0i32.to_le_bytes());

    let (decoded, consumed) = Schema::decode(&bytes, 0).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded.stride(), 0);
    assert_eq!(consumed, 4);
}

#[test]
fn test_encode_decode_preserves_order() {
    let schema = Schema::new(vec![
        Column::new("z", ScalarType::Float64),
        Column::new("frame-timestamp", ScalarType::Int64Timestamp),
        Column::new("a", ScalarType::Bool),
        Column::new("frame", ScalarType::Int32),
    ])
    .unwrap();

    let bytes = schema.encode().unwrap();
    let (decoded, consumed) = Schema::decode(&bytes, 0).unwrap();
    assert_eq!(decoded, schema);
    assert_eq!(consumed, bytes.len());
}

#[test]
fn test_schema_serializes_to_json() {
    let json = serde_json::to_value(id_x_schema()).unwrap();
    assert_eq!(json["columns"][0]["name"], "id");
    assert_eq!(json["columns"][0]["scalar_type"], "Int32");
    assert_eq!(json["columns"][1]["scalar_type"], "Float64");
}
