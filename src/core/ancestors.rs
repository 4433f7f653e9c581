//! Read-only lookups over an ancestry chain.
//!
//! Every query scans from the nearest container outwards and answers
//! `None` when nothing matches; absent or oddly-typed fields are never an error.

use serde_json::{Map, Value};

use super::{
    fields::{
        NAME, PROPERTY, ROWS, SPEAKER, TABLE_ID, TYPE, has_tag, is_namespaced, str_field,
        unwrap_text,
    },
    walker::{Ancestry, Segment},
};

/// Identifier field names, highest priority first (compared case-insensitively).
const IDENTIFIER_FIELDS: [&str; 4] = ["keystring", "selectedkeyname", "selectedkey", "key"];

/// Nearest ancestor whose `Type` equals `type_tag`.
pub fn nearest_of_type<'a>(
    ancestry: &Ancestry<'a>,
    type_tag: &str,
) -> Option<&'a Map<String, Value>> {
    ancestry.maps().find(|map| has_tag(map, TYPE, type_tag))
}

/// The identifier-like field of a single map, by field priority.
///
/// Falls back to the first field whose name merely contains `key`.
fn identifier_field(map: &Map<String, Value>) -> Option<&Value> {
    let by_name = |wanted: &str| {
        map.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, value)| value)
    };
    IDENTIFIER_FIELDS
        .iter()
        .find_map(|wanted| by_name(wanted))
        .or_else(|| {
            map.iter()
                .find(|(name, _)| name.to_ascii_lowercase().contains("key"))
                .map(|(_, value)| value)
        })
}

fn identifier_of(map: &Map<String, Value>) -> Option<&str> {
    identifier_field(map)
        .and_then(unwrap_text)
        .filter(|s| !s.is_empty())
}

/// Key candidate for a text node: the node itself first, then each ancestor outward.
///
/// Within one map only the highest-priority identifier field is consulted; if
/// it does not hold a non-empty string the search moves on to the next map.
pub fn find_identifier<'a>(
    node: &'a Map<String, Value>,
    ancestry: &Ancestry<'a>,
) -> Option<&'a str> {
    identifier_of(node).or_else(|| ancestry.maps().find_map(identifier_of))
}

/// Table identifier exposed by the node or its nearest ancestor.
pub fn find_table_id<'a>(node: &'a Map<String, Value>, ancestry: &Ancestry<'a>) -> Option<&'a str> {
    str_field(node, TABLE_ID).or_else(|| ancestry.maps().find_map(|map| str_field(map, TABLE_ID)))
}

/// Value of `field` on the nearest ancestor that carries it.
pub fn find_ancestor_field<'a>(ancestry: &Ancestry<'a>, field: &str) -> Option<&'a Value> {
    ancestry.maps().find_map(|map| map.get(field))
}

/// `Name` of the nearest enclosing `Property` descriptor.
pub fn find_property_name<'a>(ancestry: &Ancestry<'a>) -> Option<&'a str> {
    ancestry.maps().find_map(|map| {
        map.get(PROPERTY)
            .and_then(Value::as_object)
            .and_then(|property| str_field(property, NAME))
    })
}

/// Nearest `Speaker` value, looking at the node before its ancestors.
pub fn find_speaker<'a>(node: &'a Map<String, Value>, ancestry: &Ancestry<'a>) -> Option<&'a Value> {
    node.get(SPEAKER)
        .or_else(|| find_ancestor_field(ancestry, SPEAKER))
}

/// True if the node or any ancestor carries both `KeyString` and `Namespace`.
pub fn in_text_const_context(node: &Map<String, Value>, ancestry: &Ancestry<'_>) -> bool {
    is_namespaced(node) || ancestry.maps().any(is_namespaced)
}

/// Row identifier of a data-table cell: the segment taken right below `Rows`.
pub fn find_row_segment<'a>(ancestry: &Ancestry<'a>) -> Option<Segment<'a>> {
    let steps = ancestry.root_first();
    let rows_at = steps
        .iter()
        .position(|step| step.segment == Segment::Key(ROWS))?;
    steps.get(rows_at + 1).map(|step| step.segment)
}
