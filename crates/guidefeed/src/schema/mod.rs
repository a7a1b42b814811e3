//! Sheet schema: which column carries which field.

mod columns;
mod field;

pub use columns::ColumnMap;
pub use field::SemanticField;
