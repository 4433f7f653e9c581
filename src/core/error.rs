use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Line of a diagnostic, when the offending text could be located in the raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHint(pub Option<usize>);

impl fmt::Display for LineHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(line) => write!(f, "line {}", line),
            None => write!(f, "line number unavailable"),
        }
    }
}

/// Fatal conditions raised while extracting strings from documents.
///
/// Read and parse failures are only fatal during the main pass; the
/// string-table pre-scan drops unreadable documents instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse JSON in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("DataTable entry without key or text in {} ({line})", path.display())]
    MissingTableKey { path: PathBuf, line: LineHint },

    #[error("UserDefinedEnum entry without key or text in {} ({line})", path.display())]
    MissingEnumKey { path: PathBuf, line: LineHint },

    #[error("unexpected block with SourceString in {} ({line})", path.display())]
    UnrecognizedNode { path: PathBuf, line: LineHint },

    #[error("failed to write output row")]
    Write(#[from] io::Error),
}

impl ExtractError {
    /// Line number attached to a classification error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ExtractError::MissingTableKey { line, .. }
            | ExtractError::MissingEnumKey { line, .. }
            | ExtractError::UnrecognizedNode { line, .. } => line.0,
            ExtractError::Read { .. } | ExtractError::Parse { .. } | ExtractError::Write(_) => {
                None
            }
        }
    }
}
