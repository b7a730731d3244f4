//! Property-based tests for core types.

use proptest::prelude::*;

use crate::schema::{Cardinality, FieldSpec, TableSchema};
use crate::types::{DataType, Value};

/// Strategy for generating literal values that roundtrip through JSON.
/// Uses integer-representable floats to avoid JSON precision issues.
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int64),
        any::<i32>().prop_map(|i| Value::Float64(f64::from(i))),
        ".*".prop_map(Value::String),
    ]
}

fn arb_data_type() -> impl Strategy<Value = DataType> {
    prop_oneof![
        Just(DataType::Int),
        Just(DataType::Long),
        Just(DataType::Float),
        Just(DataType::Double),
        Just(DataType::Boolean),
        Just(DataType::String),
        Just(DataType::Bytes),
    ]
}

fn arb_schema() -> impl Strategy<Value = TableSchema> {
    prop::collection::btree_map("[a-z]{1,8}", (arb_data_type(), any::<bool>()), 0..8).prop_map(
        |fields| {
            fields
                .into_iter()
                .fold(TableSchema::new("t"), |schema, (name, (dt, single))| {
                    let field = if single {
                        FieldSpec::dimension(name, dt)
                    } else {
                        FieldSpec::multi_valued_dimension(name, dt)
                    };
                    schema.with_field(field)
                })
        },
    )
}

proptest! {
    /// Value serialization roundtrips correctly.
    #[test]
    fn value_serde_roundtrip(value in arb_value()) {
        let serialized = serde_json::to_string(&value).unwrap();
        let deserialized: Value = serde_json::from_str(&serialized).unwrap();
        prop_assert_eq!(value, deserialized);
    }

    /// Columns missing from a schema are always single-valued.
    #[test]
    fn absent_columns_single_valued(schema in arb_schema(), column in "[A-Z]{1,8}") {
        prop_assert_eq!(schema.cardinality(&column), Cardinality::SingleValued);
    }

    /// Cardinality agrees with the declared flag.
    #[test]
    fn cardinality_matches_flag(schema in arb_schema()) {
        for (name, field) in &schema.fields {
            prop_assert_eq!(schema.is_multi_valued(name), !field.single_value_field);
        }
    }
}
