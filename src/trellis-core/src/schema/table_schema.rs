//! Table schema with per-column cardinality.

use std::collections::BTreeMap;

use common_error::{TrellisError, TrellisResult};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::{Cardinality, FieldKind, FieldSpec};
use crate::types::DataType;

/// Schema of a table, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Schema name.
    pub schema_name: String,
    /// Fields by column name.
    pub fields: BTreeMap<String, FieldSpec>,
}

impl TableSchema {
    /// Create an empty schema.
    pub fn new(schema_name: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, replacing any field with the same name.
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Look up a field by column name.
    pub fn field(&self, column: &str) -> Option<&FieldSpec> {
        self.fields.get(column)
    }

    /// Cardinality of a column. Columns absent from the schema are single-valued.
    pub fn cardinality(&self, column: &str) -> Cardinality {
        self.field(column)
            .map_or(Cardinality::SingleValued, FieldSpec::cardinality)
    }

    /// Check whether a column is declared multi-valued.
    pub fn is_multi_valued(&self, column: &str) -> bool {
        self.cardinality(column) == Cardinality::MultiValued
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a schema from the broker's JSON schema layout.
    ///
    /// Fields are grouped under `dimensionFieldSpecs`, `metricFieldSpecs` and
    /// `dateTimeFieldSpecs`. `singleValueField` may be a JSON boolean or the
    /// string `"true"`/`"false"` and defaults to `true`; only dimensions can be
    /// multi-valued. A column declared twice is rejected.
    pub fn from_json(json: &str) -> TrellisResult<Self> {
        let raw: RawSchema = serde_json::from_str(json)?;
        let mut schema = Self::new(raw.schema_name);

        let groups = [
            (FieldKind::Dimension, raw.dimension_field_specs),
            (FieldKind::Metric, raw.metric_field_specs),
            (FieldKind::DateTime, raw.date_time_field_specs),
        ];
        for (kind, specs) in groups {
            for spec in specs {
                if schema.fields.contains_key(&spec.name) {
                    return Err(TrellisError::schema_error(format!(
                        "column '{}' declared more than once in schema '{}'",
                        spec.name, schema.schema_name
                    )));
                }
                let field = FieldSpec {
                    name: spec.name,
                    data_type: spec.data_type,
                    single_value_field: kind != FieldKind::Dimension || spec.single_value_field,
                    kind,
                };
                schema.fields.insert(field.name.clone(), field);
            }
        }

        Ok(schema)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    schema_name: String,
    #[serde(default)]
    dimension_field_specs: Vec<RawFieldSpec>,
    #[serde(default)]
    metric_field_specs: Vec<RawFieldSpec>,
    #[serde(default)]
    date_time_field_specs: Vec<RawFieldSpec>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldSpec {
    name: String,
    data_type: DataType,
    #[serde(default = "single_valued", deserialize_with = "deserialize_flag")]
    single_value_field: bool,
}

const fn single_valued() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(text) => match text.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::custom(format!(
                "expected \"true\" or \"false\", got \"{other}\""
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SCHEMA: &str = r#"{"schemaName":"testSchema",
        "dimensionFieldSpecs":[
            {"name":"col2","dataType":"LONG","singleValueField":"false"},
            {"name":"col3","dataType":"LONG","singleValueField":"false"}],
        "dateTimeFieldSpecs":[{"name":"dt1","dataType":"INT","format":"x:HOURS:EPOCH",
            "granularity":"1:HOURS"}]}"#;

    #[test]
    fn test_from_json() {
        let schema = TableSchema::from_json(TEST_SCHEMA).unwrap();

        assert_eq!(schema.schema_name, "testSchema");
        assert_eq!(schema.len(), 3);
        assert!(schema.is_multi_valued("col2"));
        assert!(schema.is_multi_valued("col3"));
        assert!(!schema.is_multi_valued("dt1"));
        assert_eq!(schema.field("dt1").unwrap().kind, FieldKind::DateTime);
        assert_eq!(schema.field("col2").unwrap().data_type, DataType::Long);
    }

    #[test]
    fn test_absent_column_is_single_valued() {
        let schema = TableSchema::from_json(TEST_SCHEMA).unwrap();
        assert_eq!(schema.cardinality("col1"), Cardinality::SingleValued);
        assert!(schema.field("col1").is_none());
    }

    #[test]
    fn test_boolean_flag_and_default() {
        let json = r#"{"schemaName":"s",
            "dimensionFieldSpecs":[
                {"name":"tags","dataType":"STRING","singleValueField":false},
                {"name":"city","dataType":"STRING"}],
            "metricFieldSpecs":[{"name":"clicks","dataType":"LONG"}]}"#;
        let schema = TableSchema::from_json(json).unwrap();

        assert!(schema.is_multi_valued("tags"));
        assert!(!schema.is_multi_valued("city"));
        assert_eq!(schema.field("clicks").unwrap().kind, FieldKind::Metric);
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let json = r#"{"schemaName":"s",
            "dimensionFieldSpecs":[{"name":"c","dataType":"INT","singleValueField":"maybe"}]}"#;
        assert!(matches!(
            TableSchema::from_json(json),
            Err(TrellisError::SerdeJsonError(_))
        ));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let json = r#"{"schemaName":"s",
            "dimensionFieldSpecs":[{"name":"c","dataType":"INT"}],
            "metricFieldSpecs":[{"name":"c","dataType":"LONG"}]}"#;
        assert!(matches!(
            TableSchema::from_json(json),
            Err(TrellisError::SchemaError(_))
        ));
    }

    #[test]
    fn test_builder() {
        let schema = TableSchema::new("t")
            .with_field(FieldSpec::dimension("col1", DataType::String))
            .with_field(FieldSpec::multi_valued_dimension("col2", DataType::Long))
            .with_field(FieldSpec::metric("m", DataType::Double));

        assert!(!schema.is_multi_valued("col1"));
        assert!(schema.is_multi_valued("col2"));
        assert!(!schema.is_multi_valued("m"));
        assert!(!schema.is_empty());
    }
}
