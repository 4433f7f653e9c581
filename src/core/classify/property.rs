use serde_json::Value;

use super::{Candidate, Classify, Match, labeled};
use crate::core::{
    ancestors::{find_ancestor_field, find_identifier, find_table_id},
    fields::{NAME, NAMESPACE, display_value, non_empty_str},
    keys::{join_key, short_table_name},
    walker::Ancestry,
};

/// Text properties of ordinary objects (`DisplayName`, `DeathMenuText`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericProperty;

/// Nearest meaningful `Name` (or `name`) above the node.
fn owner_name(ancestry: &Ancestry<'_>) -> Option<String> {
    let meaningful = |v: &&Value| match v {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    };
    find_ancestor_field(ancestry, NAME)
        .filter(meaningful)
        .or_else(|| find_ancestor_field(ancestry, "name").filter(meaningful))
        .map(display_value)
}

impl Classify for GenericProperty {
    fn applies(&self, m: &Match<'_, '_>) -> bool {
        !m.in_text_const && m.data_table.is_none()
    }

    fn classify(&self, m: &Match<'_, '_>) -> Option<Candidate> {
        let node = m.node();
        let key = find_identifier(node, m.ancestry())?;
        let source = m.effective_source()?;

        let key = match find_table_id(node, m.ancestry()) {
            Some(table_id) if !table_id.is_empty() => join_key(short_table_name(table_id), key),
            _ => join_key(non_empty_str(node, NAMESPACE).unwrap_or_default(), key),
        };
        let field = m.text.parent_key().and_then(|s| s.as_key());

        Some(Candidate {
            key,
            source: source.to_string(),
            context: vec![
                m.address(),
                labeled("Name", owner_name(m.ancestry()).as_deref()),
                field.unwrap_or("null").to_string(),
            ],
        })
    }
}
