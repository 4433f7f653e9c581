//! String-table pre-scan.
//!
//! Before extraction every document is walked once for `StringTable`
//! containers. Their keys feed the [`NamespaceTable`] used to rewrite loose
//! keys, and their entries are kept for a final sweep that emits every table
//! string extraction did not already produce.

use serde_json::{Map, Value};

use super::{
    address::{PathMarkers, document_address},
    document::Document,
    fields::{KEYS_TO_ENTRIES, STRING_TABLE, TABLE_NAMESPACE, str_field},
    keys::{NamespaceTable, join_key},
};

/// A string-table entry waiting for the final sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTableEntry {
    /// `<namespace>::<key>`, or the bare key for tables without a namespace.
    pub key: String,
    pub source: String,
    /// Address of the owning document.
    pub address: String,
}

#[derive(Debug, Default)]
pub struct StringTables {
    pub namespaces: NamespaceTable,
    pub entries: Vec<StringTableEntry>,
}

impl StringTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every string table found in `document`, in document order.
    pub fn collect(&mut self, document: &Document, markers: &PathMarkers) {
        let address = document_address(&document.path, markers);
        self.collect_value(&document.tree, &address);
    }

    fn collect_value(&mut self, value: &Value, address: &str) {
        match value {
            Value::Object(map) => {
                if let Some(table) = map.get(STRING_TABLE).and_then(Value::as_object) {
                    self.record_table(table, address);
                }
                for child in map.values() {
                    self.collect_value(child, address);
                }
            }
            Value::Array(items) => {
                for child in items {
                    self.collect_value(child, address);
                }
            }
            _ => {}
        }
    }

    fn record_table(&mut self, table: &Map<String, Value>, address: &str) {
        let Some(entries) = table.get(KEYS_TO_ENTRIES).and_then(Value::as_object) else {
            return;
        };
        let namespace = str_field(table, TABLE_NAMESPACE).unwrap_or_default();

        for (key, text) in entries {
            if !namespace.is_empty() {
                self.namespaces.insert(key, namespace);
            }
            let source = match text {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.entries.push(StringTableEntry {
                key: join_key(namespace, key),
                source,
                address: address.to_string(),
            });
        }
    }
}
