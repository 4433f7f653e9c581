//! Classification of text nodes.
//!
//! Every node yielded by the walker is routed to exactly one classifier, the
//! first in [`PRIORITY`] whose [`Classify::applies`] accepts it. A classifier
//! that applies but cannot build a row either skips the node or, for table
//! and enum data, reports it through [`Classify::incomplete`].

mod data_table;
mod dialogue;
mod enum_entry;
mod property;
mod script;

use std::path::{Path, PathBuf};

use enum_dispatch::enum_dispatch;
use serde_json::{Map, Value};

pub use data_table::DataTableCell;
pub use dialogue::DialogueLine;
pub use enum_entry::EnumEntry;
pub use property::GenericProperty;
pub use script::ScriptConstant;

use super::{
    address::{PathMarkers, resolve_address},
    ancestors::{in_text_const_context, nearest_of_type},
    error::{ExtractError, LineHint},
    fields::{
        DATA_TABLE, DIALOG_ASSET, LOCALIZED_STRING, SOURCE_STRING, USER_DEFINED_ENUM, text_of,
    },
    walker::{Ancestry, TextNode},
};

/// Everything a classifier may consult about one text node.
pub struct Match<'a, 'm> {
    pub text: &'m TextNode<'a>,
    pub document: &'m Path,
    pub markers: &'m PathMarkers,
    /// Nearest enclosing `DialogAsset`.
    pub dialogue: Option<&'a Map<String, Value>>,
    /// Nearest enclosing `DataTable`.
    pub data_table: Option<&'a Map<String, Value>>,
    /// Nearest enclosing `UserDefinedEnum`.
    pub user_enum: Option<&'a Map<String, Value>>,
    /// The node or one of its ancestors carries `KeyString` and `Namespace`.
    pub in_text_const: bool,
}

impl<'a, 'm> Match<'a, 'm> {
    pub fn new(text: &'m TextNode<'a>, document: &'m Path, markers: &'m PathMarkers) -> Self {
        let ancestry = &text.ancestry;
        Self {
            text,
            document,
            markers,
            dialogue: nearest_of_type(ancestry, DIALOG_ASSET),
            data_table: nearest_of_type(ancestry, DATA_TABLE),
            user_enum: nearest_of_type(ancestry, USER_DEFINED_ENUM),
            in_text_const: in_text_const_context(text.node, ancestry),
        }
    }

    pub fn node(&self) -> &'a Map<String, Value> {
        self.text.node
    }

    pub fn ancestry(&self) -> &'m Ancestry<'a> {
        &self.text.ancestry
    }

    /// First context line: the nearest object path, else the document path.
    pub fn address(&self) -> String {
        resolve_address(self.ancestry(), self.document, self.markers)
    }

    /// Localized text when present and non-empty, else the source text.
    ///
    /// Either may be a plain string or a `{"Value": "..."}` map.
    pub fn effective_source(&self) -> Option<&'a str> {
        let node = self.node();
        node.get(LOCALIZED_STRING)
            .and_then(text_of)
            .filter(|s| !s.is_empty())
            .or_else(|| node.get(SOURCE_STRING).and_then(text_of))
    }
}

/// A row as produced by a classifier, before namespace rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub source: String,
    pub context: Vec<String>,
}

impl Candidate {
    pub fn context_text(&self) -> String {
        self.context.join("\n")
    }
}

#[enum_dispatch]
pub trait Classify {
    /// Whether this classifier claims the node.
    fn applies(&self, m: &Match<'_, '_>) -> bool;

    /// Builds the row, or `None` when the key or text cannot be derived.
    fn classify(&self, m: &Match<'_, '_>) -> Option<Candidate>;

    /// Error for a claimed node that produced no row; `None` skips the node.
    fn incomplete(&self, _path: PathBuf, _line: LineHint) -> Option<ExtractError> {
        None
    }
}

#[enum_dispatch(Classify)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classifier {
    DialogueLine(DialogueLine),
    GenericProperty(GenericProperty),
    DataTableCell(DataTableCell),
    EnumEntry(EnumEntry),
    ScriptConstant(ScriptConstant),
}

/// Classifiers in routing order.
pub const PRIORITY: [Classifier; 5] = [
    Classifier::DialogueLine(DialogueLine),
    Classifier::GenericProperty(GenericProperty),
    Classifier::DataTableCell(DataTableCell),
    Classifier::EnumEntry(EnumEntry),
    Classifier::ScriptConstant(ScriptConstant),
];

/// The classifier responsible for `m`, if any claims it.
pub fn route(m: &Match<'_, '_>) -> Option<Classifier> {
    PRIORITY.iter().copied().find(|c| c.applies(m))
}

/// `"<label>: <value>"`, with `null` for a missing value.
fn labeled(label: &str, value: Option<&str>) -> String {
    format!("{}: {}", label, value.unwrap_or("null"))
}
