//! Interchange surfaces: flat arrays and buffered records.

pub mod ora;
pub mod records;

pub use ora::OraArrays;
pub use records::{Record, RecordBuffer};
