//! Key construction and the loose-key → namespace table.

use std::collections::HashMap;

/// Separator between a namespace and a key.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Suffix of generated blueprint classes (`Loot_C`).
const GENERATED_CLASS_SUFFIX: &str = "_C";

/// `<namespace>::<key>`, or just `key` when the namespace is empty.
pub fn join_key(namespace: &str, key: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, key)
    }
}

/// Short table name of a table identifier: its last `.` segment, without a
/// generated-class suffix.
///
/// ```
/// use assetloc::core::short_table_name;
///
/// assert_eq!(short_table_name("/Game/DT.Loot_C"), "Loot");
/// assert_eq!(short_table_name("/Game/ST_Items.ST_Items"), "ST_Items");
/// assert_eq!(short_table_name("Plain"), "Plain");
/// ```
pub fn short_table_name(table_id: &str) -> &str {
    let last = table_id.rsplit('.').next().unwrap_or(table_id);
    match last.strip_suffix(GENERATED_CLASS_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => last,
    }
}

/// Namespaces of string-table keys, collected before extraction.
///
/// The first namespace recorded for a key wins; later definitions of the same
/// key are ignored. Insertion order is kept because lookups by suffix return
/// the earliest matching key.
#[derive(Debug, Default, Clone)]
pub struct NamespaceTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` under `namespace` unless the key is already known.
    ///
    /// Returns whether the key was newly recorded.
    pub fn insert(&mut self, key: &str, namespace: &str) -> bool {
        if self.index.contains_key(key) {
            return false;
        }
        self.index.insert(key.to_string(), self.entries.len());
        self.entries.push((key.to_string(), namespace.to_string()));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn namespace_of(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&at| self.entries[at].1.as_str())
    }

    /// Finds the table key matching `key` exactly or as a suffix after a
    /// `.` or `:` separator.
    ///
    /// When several recorded keys match, the one recorded first wins.
    /// Returns `(namespace, matched_key)`.
    pub fn lookup(&self, key: &str) -> Option<(&str, &str)> {
        if key.is_empty() {
            return None;
        }
        let suffixes = key
            .char_indices()
            .filter(|(_, c)| matches!(c, '.' | ':'))
            .map(|(at, c)| &key[at + c.len_utf8()..]);
        std::iter::once(key)
            .chain(suffixes)
            .filter_map(|candidate| self.index.get(candidate).copied())
            .min()
            .map(|at| {
                let (matched, namespace) = &self.entries[at];
                (namespace.as_str(), matched.as_str())
            })
    }

    /// Rewrites a key that carries no namespace to `<namespace>::<matched-key>`.
    ///
    /// Keys that already contain the separator, and keys unknown to the table,
    /// are returned unchanged.
    pub fn rewrite(&self, key: String) -> String {
        if key.contains(NAMESPACE_SEPARATOR) {
            return key;
        }
        match self.lookup(&key) {
            Some((namespace, matched)) => join_key(namespace, matched),
            None => key,
        }
    }
}
