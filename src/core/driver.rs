//! Extraction driver.
//!
//! Runs the three passes over a [`DocumentSource`]: the string-table
//! pre-scan, the per-document classification pass and the final sweep of
//! string-table entries nothing else produced.

use std::collections::HashSet;

use colored::Colorize;
use serde_json::Value;

use super::{
    address::PathMarkers,
    classify::{Classify, Match, route},
    document::{Document, DocumentSource},
    error::{ExtractError, LineHint},
    fields::SOURCE_STRING,
    line_index::SourceLocator,
    sink::{Row, RowSink},
    string_table::StringTables,
    walker::text_nodes,
};

static NO_SOURCE: Value = Value::Null;

/// Counts reported after a full run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Documents processed by the main pass.
    pub documents: usize,
    /// Rows written for text nodes.
    pub rows: usize,
    /// Rows written by the string-table sweep.
    pub table_rows: usize,
    /// Documents the pre-scan could not read or parse.
    pub prescan_skipped: usize,
    /// Paths the document scan could not access; their documents are missing from the output.
    pub scan_skipped: usize,
}

impl ExtractSummary {
    pub fn total_rows(&self) -> usize {
        self.rows + self.table_rows
    }
}

/// State shared across every document of one run.
///
/// Both the namespace table and the set of emitted keys are first-writer-wins,
/// so documents must be fed in the same order on every run.
pub struct Extractor {
    markers: PathMarkers,
    tables: StringTables,
    emitted: HashSet<String>,
}

impl Extractor {
    pub fn new(markers: PathMarkers) -> Self {
        Self {
            markers,
            tables: StringTables::new(),
            emitted: HashSet::new(),
        }
    }

    pub fn tables(&self) -> &StringTables {
        &self.tables
    }

    /// Records the string tables of every readable document.
    ///
    /// Unreadable or malformed documents are skipped here; the main pass
    /// reports them. Returns how many were skipped.
    pub fn prescan(&mut self, source: &DocumentSource, verbose: bool) -> usize {
        let mut skipped = 0;
        for document in source.documents() {
            match document {
                Ok(document) => self.tables.collect(&document, &self.markers),
                Err(e) => {
                    skipped += 1;
                    if verbose {
                        eprintln!("{} {}, skipping", "warning:".bold().yellow(), e);
                    }
                }
            }
        }
        skipped
    }

    /// Classifies every text node of `document` and writes the new rows.
    ///
    /// Returns the number of rows written.
    pub fn process_document<S: RowSink>(
        &mut self,
        document: &Document,
        sink: &mut S,
    ) -> Result<usize, ExtractError> {
        let mut locator = SourceLocator::new(&document.text);
        let mut written = 0;

        for text in text_nodes(&document.tree) {
            let source_value = text.node.get(SOURCE_STRING).unwrap_or(&NO_SOURCE);
            let m = Match::new(&text, &document.path, &self.markers);

            let Some(classifier) = route(&m) else {
                return Err(ExtractError::UnrecognizedNode {
                    path: document.path.clone(),
                    line: LineHint(locator.line_of(source_value)),
                });
            };
            let Some(candidate) = classifier.classify(&m) else {
                let line = LineHint(locator.line_of(source_value));
                if let Some(err) = classifier.incomplete(document.path.clone(), line) {
                    return Err(err);
                }
                continue;
            };

            let context = candidate.context_text();
            let key = self.tables.namespaces.rewrite(candidate.key);
            if self.emit(Row::new(key, candidate.source, context), sink)? {
                written += 1;
            }
            locator.advance_past(source_value);
        }

        Ok(written)
    }

    /// Writes every string-table entry whose key was not emitted yet.
    pub fn sweep<S: RowSink>(&mut self, sink: &mut S) -> Result<usize, ExtractError> {
        let entries = std::mem::take(&mut self.tables.entries);
        let mut written = 0;
        for entry in entries {
            if self.emit(Row::new(entry.key, entry.source, entry.address), sink)? {
                written += 1;
            }
        }
        Ok(written)
    }

    fn emit<S: RowSink>(&mut self, row: Row, sink: &mut S) -> Result<bool, ExtractError> {
        if self.emitted.contains(&row.key) {
            return Ok(false);
        }
        sink.write_row(&row)?;
        self.emitted.insert(row.key);
        Ok(true)
    }
}

/// Runs a full extraction over `source` into `sink`.
///
/// Stops at the first fatal error; rows written before it stay in the sink.
pub fn extract_all<S: RowSink>(
    source: &DocumentSource,
    markers: &PathMarkers,
    sink: &mut S,
    verbose: bool,
) -> Result<ExtractSummary, ExtractError> {
    let mut extractor = Extractor::new(markers.clone());
    let mut summary = ExtractSummary {
        prescan_skipped: extractor.prescan(source, verbose),
        scan_skipped: source.skipped_count,
        ..Default::default()
    };

    for document in source.documents() {
        let document = document?;
        let written = extractor.process_document(&document, sink)?;
        if verbose {
            eprintln!(
                "{} {} ({} rows)",
                "processed".dimmed(),
                document.path.display(),
                written
            );
        }
        summary.documents += 1;
        summary.rows += written;
    }

    summary.table_rows = extractor.sweep(sink)?;
    Ok(summary)
}
