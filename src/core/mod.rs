//! Extraction engine.
//!
//! Documents come from a [`DocumentSource`], are pre-scanned for string
//! tables, walked for text-bearing nodes, classified and written to a
//! [`RowSink`]. [`extract_all`] runs the whole pipeline.

pub mod address;
pub mod ancestors;
pub mod classify;
pub mod document;
pub mod driver;
pub mod error;
pub mod fields;
pub mod keys;
pub mod line_index;
pub mod sink;
pub mod string_table;
pub mod walker;

pub use address::PathMarkers;
pub use document::{Document, DocumentSource, ScanOptions};
pub use driver::{ExtractSummary, Extractor, extract_all};
pub use error::{ExtractError, LineHint};
pub use keys::{NAMESPACE_SEPARATOR, NamespaceTable, join_key, short_table_name};
pub use sink::{CsvSink, Row, RowSink};
pub use string_table::{StringTableEntry, StringTables};
pub use walker::{TextNode, text_nodes};
