//! Type system for Trellis literals and schema fields.

mod data_type;
mod value;

pub use data_type::DataType;
pub use value::Value;
