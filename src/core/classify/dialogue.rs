use serde_json::Value;

use super::{Candidate, Classify, Match, labeled};
use crate::core::{
    ancestors::{find_identifier, find_speaker},
    fields::{ASSET_PATH_NAME, NAME, NAMESPACE, OBJECT_PATH, display_value, non_empty_str},
    keys::join_key,
};

/// Marker closing the context of every dialogue row.
const DIALOGUE_MARKER: &str = "DialogueText";

/// Lines spoken inside a `DialogAsset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueLine;

/// Short speaker name: `/Game/NPC/Bob.Bob_C` gives `Bob_C`, `/Game/NPC.Bob` gives `Bob`.
fn speaker_leaf(speaker: &Value) -> Option<String> {
    let path = match speaker {
        Value::String(s) => s.as_str(),
        Value::Object(map) => non_empty_str(map, ASSET_PATH_NAME)
            .or_else(|| non_empty_str(map, OBJECT_PATH))
            .unwrap_or_default(),
        _ => "",
    };
    if path.is_empty() {
        return None;
    }
    let normalized = path.replace('\\', "/");
    let last = normalized.rsplit('/').next().unwrap_or_default();
    let leaf = last.rsplit('.').next().unwrap_or(last);
    Some(leaf.to_string()).filter(|s| !s.is_empty())
}

impl Classify for DialogueLine {
    fn applies(&self, m: &Match<'_, '_>) -> bool {
        m.dialogue.is_some()
    }

    fn classify(&self, m: &Match<'_, '_>) -> Option<Candidate> {
        let node = m.node();
        let key = find_identifier(node, m.ancestry())?;
        let source = m.effective_source()?;

        let namespace = non_empty_str(node, NAMESPACE).unwrap_or_default();
        let dialogue_name = m.dialogue.and_then(|d| d.get(NAME)).map(display_value);
        let speaker = find_speaker(node, m.ancestry()).and_then(speaker_leaf);

        Some(Candidate {
            key: join_key(namespace, key),
            source: source.to_string(),
            context: vec![
                m.address(),
                labeled("Name", dialogue_name.as_deref()),
                labeled("Speaker", speaker.as_deref()),
                DIALOGUE_MARKER.to_string(),
            ],
        })
    }
}
