use serde_json::Value;

use super::{Candidate, Classify, Match, labeled};
use crate::core::{
    ancestors::find_property_name,
    fields::{KEY_STRING, NAMESPACE, SOURCE_STRING, VALUE, unwrap_text},
    keys::join_key,
};

/// Text constants of compiled scripts, and whatever else still carries text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptConstant;

impl Classify for ScriptConstant {
    fn applies(&self, m: &Match<'_, '_>) -> bool {
        m.node().contains_key(SOURCE_STRING)
    }

    fn classify(&self, m: &Match<'_, '_>) -> Option<Candidate> {
        let node = m.node();
        let block = node.get(VALUE).and_then(Value::as_object).unwrap_or(node);
        let field = |name: &str| block.get(name).and_then(unwrap_text);

        let source = field(SOURCE_STRING)
            .or_else(|| node.get(SOURCE_STRING).and_then(unwrap_text))
            .unwrap_or_default();
        let key = join_key(
            field(NAMESPACE).unwrap_or_default(),
            field(KEY_STRING).unwrap_or_default(),
        );
        if key.is_empty() {
            return None;
        }

        Some(Candidate {
            key,
            source: source.to_string(),
            context: vec![
                m.address(),
                labeled("Name", find_property_name(m.ancestry())),
            ],
        })
    }
}
