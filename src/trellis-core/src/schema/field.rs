//! Field specifications.

use serde::{Deserialize, Serialize};

use crate::types::DataType;

/// Whether a column holds one or many values per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cardinality {
    /// One value per record.
    #[default]
    SingleValued,
    /// Zero or more values per record.
    MultiValued,
}

/// Role of a field within the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Dimension column.
    Dimension,
    /// Metric column.
    Metric,
    /// Date-time column.
    DateTime,
}

/// Specification of one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name.
    pub name: String,
    /// Declared data type.
    pub data_type: DataType,
    /// Whether the column is single-valued.
    pub single_value_field: bool,
    /// Role of the field.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a single-valued dimension field.
    pub fn dimension(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            single_value_field: true,
            kind: FieldKind::Dimension,
        }
    }

    /// Create a multi-valued dimension field.
    pub fn multi_valued_dimension(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            single_value_field: false,
            ..Self::dimension(name, data_type)
        }
    }

    /// Create a metric field. Metrics are always single-valued.
    pub fn metric(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            kind: FieldKind::Metric,
            ..Self::dimension(name, data_type)
        }
    }

    /// Create a date-time field.
    pub fn date_time(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            kind: FieldKind::DateTime,
            ..Self::dimension(name, data_type)
        }
    }

    /// Cardinality of this field.
    pub const fn cardinality(&self) -> Cardinality {
        if self.single_value_field {
            Cardinality::SingleValued
        } else {
            Cardinality::MultiValued
        }
    }
}
