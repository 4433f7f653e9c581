use std::path::PathBuf;

use super::{Candidate, Classify, Match};
use crate::core::{
    error::{ExtractError, LineHint},
    fields::{KEY, NAME, non_empty_str, own_key},
};

/// Display names of `UserDefinedEnum` enumerators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumEntry;

impl Classify for EnumEntry {
    fn applies(&self, m: &Match<'_, '_>) -> bool {
        m.user_enum.is_some()
    }

    fn classify(&self, m: &Match<'_, '_>) -> Option<Candidate> {
        let node = m.node();
        let key = own_key(node)?;
        let source = m.effective_source()?;

        let enum_name = m.user_enum.and_then(|e| non_empty_str(e, NAME));
        let enumerator = m.text.parent_map().and_then(|p| non_empty_str(p, KEY));

        let mut context = vec![m.address()];
        context.extend(enum_name.map(|name| format!("Name: {}", name)));
        context.extend(enumerator.map(|name| format!("Key: {}", name)));

        Some(Candidate {
            key: key.to_string(),
            source: source.to_string(),
            context,
        })
    }

    fn incomplete(&self, path: PathBuf, line: LineHint) -> Option<ExtractError> {
        Some(ExtractError::MissingEnumKey { path, line })
    }
}
