//! Integration tests for trellis-core metadata types.

use trellis_core::{Cardinality, DataType, FieldKind, FieldSpec, TableMetadata, TableSchema};

const VEGETABLES_SCHEMA: &str = r#"{
    "schemaName": "vegetables",
    "dimensionFieldSpecs": [
        {"name": "name", "dataType": "STRING"},
        {"name": "colors", "dataType": "STRING", "singleValueField": false},
        {"name": "regions", "dataType": "STRING", "singleValueField": "FALSE"}
    ],
    "metricFieldSpecs": [
        {"name": "weight", "dataType": "DOUBLE"}
    ],
    "dateTimeFieldSpecs": [
        {"name": "harvested", "dataType": "LONG", "format": "1:MILLISECONDS:EPOCH",
         "granularity": "1:DAYS"}
    ]
}"#;

#[test]
fn test_schema_json_to_metadata() {
    let schema = TableSchema::from_json(VEGETABLES_SCHEMA).unwrap();
    let metadata = TableMetadata::new("vegetables")
        .with_partition_columns(["name"])
        .with_schema(schema);

    assert!(metadata.is_partition_column("name"));
    assert!(!metadata.is_multi_valued("name"));
    assert!(metadata.is_multi_valued("colors"));
    assert!(metadata.is_multi_valued("regions"));
    assert!(!metadata.is_multi_valued("weight"));
    assert!(!metadata.is_multi_valued("harvested"));
    assert!(!metadata.is_multi_valued("unknown"));
}

#[test]
fn test_field_kinds_preserved() {
    let schema = TableSchema::from_json(VEGETABLES_SCHEMA).unwrap();

    assert_eq!(schema.field("weight").unwrap().kind, FieldKind::Metric);
    assert_eq!(schema.field("harvested").unwrap().kind, FieldKind::DateTime);
    assert_eq!(schema.field("colors").unwrap().cardinality(), Cardinality::MultiValued);
    assert_eq!(schema.field("weight").unwrap().data_type, DataType::Double);
}

#[test]
fn test_schema_serde_roundtrip() {
    let schema = TableSchema::new("t")
        .with_field(FieldSpec::multi_valued_dimension("tags", DataType::String))
        .with_field(FieldSpec::date_time("ts", DataType::Timestamp));

    let json = serde_json::to_string(&schema).unwrap();
    let restored: TableSchema = serde_json::from_str(&json).unwrap();
    assert_eq!(schema, restored);
}

#[test]
fn test_missing_schema_name_rejected() {
    assert!(TableSchema::from_json(r#"{"dimensionFieldSpecs": []}"#).is_err());
}
