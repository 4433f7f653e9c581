//! Discovery and loading of exported asset documents.

use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use serde_json::Value;
use walkdir::{DirEntry, WalkDir};

use super::error::ExtractError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A parsed document together with its raw text.
///
/// The raw text is kept for locating strings by line in diagnostics.
#[derive(Debug)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
    pub tree: Value,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let text = fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(path, text)
    }

    /// Parses already-read text; a leading byte-order mark is dropped.
    pub fn from_text(path: &Path, text: String) -> Result<Self, ExtractError> {
        let text = match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(stripped) => stripped.to_string(),
            None => text,
        };
        let tree = serde_json::from_str(&text).map_err(|source| ExtractError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
            tree,
        })
    }
}

/// Which files under the roots count as documents.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File extension without the dot, compared case-insensitively.
    pub extension: String,
    /// Glob patterns; matching paths are skipped.
    pub ignores: Vec<String>,
    pub verbose: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: "json".to_string(),
            ignores: Vec::new(),
            verbose: false,
        }
    }
}

/// Ordered list of document paths.
///
/// Inside every directory, files come first and then subdirectories, each
/// group sorted by case-insensitive name. Extraction relies on this order
/// being the same on every run.
#[derive(Debug, Default)]
pub struct DocumentSource {
    paths: Vec<PathBuf>,
    /// Entries that could not be read while walking.
    pub skipped_count: usize,
}

fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    let rank = |e: &DirEntry| e.file_type().is_dir();
    let name = |e: &DirEntry| e.file_name().to_string_lossy().to_lowercase();
    rank(a)
        .cmp(&rank(b))
        .then_with(|| name(a).cmp(&name(b)))
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

impl DocumentSource {
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            skipped_count: 0,
        }
    }

    /// Collects the documents below each root, roots in the given order.
    ///
    /// Roots that are not directories are reported and skipped.
    pub fn scan(roots: &[PathBuf], options: &ScanOptions) -> Self {
        let mut source = Self::default();

        let mut ignore_patterns: Vec<Pattern> = Vec::new();
        for p in &options.ignores {
            match Pattern::new(p) {
                Ok(pattern) => ignore_patterns.push(pattern),
                Err(e) => {
                    if options.verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        }

        for root in roots {
            if !root.is_dir() {
                eprintln!(
                    "{} {} is not a directory, skipping",
                    "warning:".bold().yellow(),
                    root.display()
                );
                continue;
            }

            for entry in WalkDir::new(root).sort_by(walk_order) {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        source.skipped_count += 1;
                        if options.verbose {
                            eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                        }
                        continue;
                    }
                };
                let path = entry.path();
                if !entry.file_type().is_file() || !has_extension(path, &options.extension) {
                    continue;
                }
                let path_str = path.to_string_lossy();
                if ignore_patterns.iter().any(|p| p.matches(&path_str)) {
                    continue;
                }
                source.paths.push(path.to_path_buf());
            }
        }

        source
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Loads each document in order. Every call reads the files afresh.
    pub fn documents(&self) -> impl Iterator<Item = Result<Document, ExtractError>> + '_ {
        self.paths.iter().map(|path| Document::load(path))
    }
}
