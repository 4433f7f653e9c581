//! Field names and discriminator tags of the exported asset JSON.
//!
//! The documents are untyped: nodes are recognised purely by which of these
//! fields they carry, so every structural probe in the crate goes through the
//! helpers below instead of matching on ad-hoc string literals.

use serde_json::{Map, Value};

pub const SOURCE_STRING: &str = "SourceString";
pub const LOCALIZED_STRING: &str = "LocalizedString";
pub const KEY_STRING: &str = "KeyString";
pub const NAMESPACE: &str = "Namespace";
pub const VALUE: &str = "Value";
pub const EXPRESSION: &str = "Expression";
pub const KEY: &str = "Key";
pub const NAME: &str = "Name";
pub const SPEAKER: &str = "Speaker";
pub const PROPERTY: &str = "Property";
pub const TABLE_ID: &str = "TableId";
pub const ROWS: &str = "Rows";

/// Structural discriminator of asset containers.
pub const TYPE: &str = "Type";
/// Discriminator of script bytecode instructions.
pub const INST: &str = "Inst";

pub const TEXT_CONST: &str = "EX_TextConst";
pub const STRING_CONST: &str = "EX_StringConst";

pub const DIALOG_ASSET: &str = "DialogAsset";
pub const DATA_TABLE: &str = "DataTable";
pub const USER_DEFINED_ENUM: &str = "UserDefinedEnum";

pub const STRING_TABLE: &str = "StringTable";
pub const TABLE_NAMESPACE: &str = "TableNamespace";
pub const KEYS_TO_ENTRIES: &str = "KeysToEntries";

pub const OBJECT_PATH: &str = "ObjectPath";
pub const ASSET_PATH_NAME: &str = "AssetPathName";
/// Fields that may carry an object address, in lookup order.
pub const OBJECT_PATH_FIELDS: [&str; 3] = [OBJECT_PATH, "Owner", "ObjectName"];

/// True if the map carries every one of `names`.
pub fn has_fields(map: &Map<String, Value>, names: &[&str]) -> bool {
    names.iter().all(|name| map.contains_key(*name))
}

/// True if the map carries both `KeyString` and `Namespace`.
pub fn is_namespaced(map: &Map<String, Value>) -> bool {
    has_fields(map, &[KEY_STRING, NAMESPACE])
}

/// True if the map carries `SourceString`, `KeyString` and `Namespace`.
pub fn is_full_text(map: &Map<String, Value>) -> bool {
    has_fields(map, &[SOURCE_STRING, KEY_STRING, NAMESPACE])
}

/// Value of `field` if it is a string.
pub fn str_field<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    map.get(field).and_then(Value::as_str)
}

/// Value of `field` if it is a non-empty string.
pub fn non_empty_str<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    str_field(map, field).filter(|s| !s.is_empty())
}

/// True if `field` holds exactly the string `tag`.
pub fn has_tag(map: &Map<String, Value>, field: &str, tag: &str) -> bool {
    str_field(map, field) == Some(tag)
}

/// `Key` (or lowercase `key`) of the map, if it is a non-empty string.
pub fn own_key(map: &Map<String, Value>) -> Option<&str> {
    non_empty_str(map, KEY).or_else(|| non_empty_str(map, "key"))
}

/// Follows nested `Value` maps down to a string.
///
/// `{"Value": {"Value": "x"}}` yields `"x"`; anything that does not bottom out
/// in a string yields `None`.
pub fn unwrap_text(value: &Value) -> Option<&str> {
    let mut current = value;
    while let Value::Object(map) = current {
        match map.get(VALUE) {
            Some(inner) => current = inner,
            None => return None,
        }
    }
    current.as_str()
}

/// A text value given either as a plain string or as `{"Value": "..."}`.
pub fn text_of(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => str_field(map, VALUE),
        _ => None,
    }
}

/// Human-readable rendering of a scalar for context lines.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
