//! assetloc - localizable string extraction for exported game assets
//!
//! assetloc walks directories of asset JSON exported from a game project,
//! finds every localizable text node and writes one CSV row per unique key,
//! ready for a translation platform. A second tool compares two such CSV
//! files by namespace-less key.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (pre-scan, classification, sweep)
//! - `compare`: Key reconciliation of two extracted CSV files

pub mod cli;
pub mod compare;
pub mod config;
pub mod core;
