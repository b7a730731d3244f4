//! Query envelope and ORDER BY items.

mod envelope;
mod order_by;

pub use envelope::QueryEnvelope;
pub use order_by::{OrderByItem, SortDirection};
