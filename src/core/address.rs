//! Human-readable addresses for extracted strings.
//!
//! Rows point back at their asset either through an object path found in the
//! document (`/Game/UnleashedPrototype/Maps/Hub.Hub:PersistentLevel.12`) or
//! through the document's own file path. Both are shortened to the part below
//! the project root.

use std::{path::Path, sync::LazyLock};

use regex::Regex;
use serde_json::{Map, Value};

use super::{
    fields::{OBJECT_PATH, OBJECT_PATH_FIELDS, str_field},
    walker::Ancestry,
};

/// Trailing `.<digits>` export index of an object path.
static EXPORT_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d+$").expect("valid export index pattern"));

/// Directory names that mark the project root inside paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMarkers {
    /// Project directory name; object paths must contain it to be used as an address.
    pub project: String,
    /// Content directory name, tried after `project` for file paths.
    pub content: String,
}

impl Default for PathMarkers {
    fn default() -> Self {
        Self {
            project: "UnleashedPrototype".to_string(),
            content: "Content".to_string(),
        }
    }
}

/// Components following the first component equal (ignoring case) to `marker`.
fn after_marker<'p>(parts: &[&'p str], marker: &str) -> Option<Vec<&'p str>> {
    let at = parts.iter().position(|p| p.eq_ignore_ascii_case(marker))?;
    Some(parts[at + 1..].to_vec())
}

/// Shortens an object path to the part below the project directory.
///
/// A trailing numeric export index is replaced by `.json`, so
/// `/Game/UnleashedPrototype/Maps/Hub.4` becomes `Maps/Hub.json`.
pub fn format_object_path(raw: &str, markers: &PathMarkers) -> String {
    let normalized = raw.replace('\\', "/");
    let parts: Vec<&str> = normalized.split('/').collect();
    let relative = match after_marker(&parts, &markers.project) {
        Some(rest) => rest.join("/"),
        None => normalized.clone(),
    };
    EXPORT_INDEX.replace(&relative, ".json").into_owned()
}

/// Document path relative to the project or content directory.
///
/// Markers are tried in order; the first one present wins. Paths without any
/// marker are returned whole, with forward slashes.
pub fn relative_document_path(path: &Path, markers: &PathMarkers) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let parts: Vec<&str> = normalized.split('/').collect();
    [&markers.project, &markers.content]
        .into_iter()
        .find_map(|marker| after_marker(&parts, marker))
        .map(|rest| rest.join("/"))
        .unwrap_or(normalized)
}

fn object_path_of(map: &Map<String, Value>, markers: &PathMarkers) -> Option<String> {
    let is_project_path = |s: &&str| s.contains(markers.project.as_str());

    let direct = OBJECT_PATH_FIELDS
        .iter()
        .find_map(|field| str_field(map, field).filter(is_project_path));
    let nested = || {
        map.values()
            .filter_map(Value::as_object)
            .find_map(|child| str_field(child, OBJECT_PATH).filter(is_project_path))
    };
    direct
        .or_else(nested)
        .map(|raw| format_object_path(raw, markers))
}

/// Nearest object path inside the project, already shortened.
pub fn find_object_address(ancestry: &Ancestry<'_>, markers: &PathMarkers) -> Option<String> {
    ancestry
        .maps()
        .find_map(|map| object_path_of(map, markers))
}

/// Address line of a row: the nearest object path, else the document path.
pub fn resolve_address(ancestry: &Ancestry<'_>, document: &Path, markers: &PathMarkers) -> String {
    find_object_address(ancestry, markers)
        .filter(|address| !address.is_empty())
        .unwrap_or_else(|| document_address(document, markers))
}

/// Address of a whole document; falls back to the full path when nothing is left after the marker.
pub fn document_address(document: &Path, markers: &PathMarkers) -> String {
    let relative = relative_document_path(document, markers);
    if relative.is_empty() {
        document.to_string_lossy().into_owned()
    } else {
        relative
    }
}
