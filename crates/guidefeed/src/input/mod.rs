//! Input parsing and row sources.

mod parser;
mod sheet;
mod source;

pub use parser::{Parser, ParserConfig};
pub use sheet::{DirectorySource, SheetExportSource, StaticSource, TableSource, DEFAULT_EXPORT_URL};
pub use source::{DataTable, SourceMetadata};
