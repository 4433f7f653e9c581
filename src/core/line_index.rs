//! Line lookup for diagnostics.
//!
//! Parsed JSON carries no positions, so a text node is re-located by searching
//! the raw document for `"SourceString": <serialized value>`. The search only
//! moves forward: each successful match advances a cursor, which keeps
//! repeated strings pointing at the right occurrence.

use serde_json::Value;

use super::fields::SOURCE_STRING;

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

pub struct SourceLocator<'t> {
    content: &'t str,
    line_index: Vec<usize>,
    cursor: usize,
}

impl<'t> SourceLocator<'t> {
    pub fn new(content: &'t str) -> Self {
        Self {
            content,
            line_index: build_line_index(content),
            cursor: 0,
        }
    }

    /// Byte offset of the next `"SourceString": <value>` at or after the cursor.
    ///
    /// Values whose serialized form differs from the raw text (other escaping,
    /// pretty-printed maps) are not found.
    fn find(&self, value: &Value) -> Option<usize> {
        let serialized = serde_json::to_string(value).ok()?;
        let field = format!("\"{}\"", SOURCE_STRING);
        let remaining = &self.content[self.cursor..];

        let mut pos = 0;
        while let Some(rel_pos) = remaining[pos..].find(&field) {
            let abs_pos = pos + rel_pos;
            let after_field = remaining[abs_pos + field.len()..].trim_start();
            if let Some(after_colon) = after_field.strip_prefix(':') {
                if after_colon.trim_start().starts_with(&serialized) {
                    return Some(self.cursor + abs_pos);
                }
            }
            pos = abs_pos + 1;
        }
        None
    }

    /// 1-based line of the next occurrence of `value`, without moving the cursor.
    pub fn line_of(&self, value: &Value) -> Option<usize> {
        self.find(value)
            .map(|offset| offset_to_line(&self.line_index, offset))
    }

    /// Moves the cursor just past the next occurrence of `value`, if found.
    pub fn advance_past(&mut self, value: &Value) {
        if let Some(offset) = self.find(value) {
            self.cursor = offset + 1;
        }
    }
}
