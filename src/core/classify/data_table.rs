use std::path::PathBuf;

use super::{Candidate, Classify, Match};
use crate::core::{
    ancestors::{find_row_segment, find_table_id},
    error::{ExtractError, LineHint},
    fields::{NAME, NAMESPACE, non_empty_str, own_key},
    keys::{join_key, short_table_name},
};

/// Cells of a `DataTable` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataTableCell;

impl Classify for DataTableCell {
    fn applies(&self, m: &Match<'_, '_>) -> bool {
        m.data_table.is_some()
    }

    fn classify(&self, m: &Match<'_, '_>) -> Option<Candidate> {
        let node = m.node();
        let key = own_key(node)?;
        let source = m.effective_source()?;

        let prefix = find_table_id(node, m.ancestry())
            .filter(|id| !id.is_empty())
            .map(short_table_name)
            .or_else(|| non_empty_str(node, NAMESPACE))
            .unwrap_or_default();

        let table = m.data_table.and_then(|t| non_empty_str(t, NAME));
        let row = find_row_segment(m.ancestry()).map(|s| s.to_string());
        let field = m.text.parent_key().and_then(|s| s.as_key());
        let location: Vec<&str> = [table, row.as_deref(), field]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        let mut context = vec![m.address()];
        if !location.is_empty() {
            context.push(location.join(", "));
        }

        Some(Candidate {
            key: join_key(prefix, key),
            source: source.to_string(),
            context,
        })
    }

    fn incomplete(&self, path: PathBuf, line: LineHint) -> Option<ExtractError> {
        Some(ExtractError::MissingTableKey { path, line })
    }
}
