//! Document model - ordered text runs and resource tokens
//!
//! Offsets are counted over the flattened content: every `char` of a text run
//! is one unit, every token is exactly one unit. A token is never split, so
//! any offset in `0..=len()` is a boundary a caret may rest on.

use std::ops::Range;

use crate::editable::cursor::{CaretPosition, CursorIndex};
use crate::util::char_to_byte;

/// A single piece of content in a [`Document`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// Plain text. Only empty transiently, or as the canonical empty document.
    TextRun { text: String },
    /// Opaque inline reference to a resource. Only the id is stored.
    ResourceToken { resource_id: String },
}

impl ContentNode {
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::TextRun { text: text.into() }
    }

    pub fn token(resource_id: impl Into<String>) -> Self {
        ContentNode::ResourceToken {
            resource_id: resource_id.into(),
        }
    }

    /// Width in flattened units
    pub fn len(&self) -> usize {
        match self {
            ContentNode::TextRun { text } => text.chars().count(),
            ContentNode::ResourceToken { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_token(&self) -> bool {
        matches!(self, ContentNode::ResourceToken { .. })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentNode::TextRun { text } => Some(text),
            ContentNode::ResourceToken { .. } => None,
        }
    }

    pub fn resource_id(&self) -> Option<&str> {
        match self {
            ContentNode::ResourceToken { resource_id } => Some(resource_id),
            ContentNode::TextRun { .. } => None,
        }
    }
}

/// Ordered content of one input instance.
///
/// Invariants kept by every mutator:
/// - no two adjacent text runs
/// - no empty text run, except the single run of the canonical empty document
/// - each resource id appears at most once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<ContentNode>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Canonical empty document: a single empty text run
    pub fn new() -> Self {
        Self {
            nodes: vec![ContentNode::text("")],
        }
    }

    /// Build a document from arbitrary nodes, merging runs and dropping
    /// duplicate tokens (first occurrence wins)
    pub fn from_nodes(nodes: impl IntoIterator<Item = ContentNode>) -> Self {
        let mut doc = Self { nodes: Vec::new() };
        for node in nodes {
            if let Some(id) = node.resource_id() {
                if doc.contains_token(id) {
                    continue;
                }
            }
            doc.nodes.push(node);
        }
        doc.normalize();
        doc
    }

    pub fn with_text(text: &str) -> Self {
        Self::from_nodes([ContentNode::text(text)])
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Total flattened length (text chars + one per token)
    pub fn len(&self) -> usize {
        self.nodes.iter().map(ContentNode::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when there are no tokens and the text is only whitespace
    pub fn is_blank(&self) -> bool {
        self.nodes.iter().all(|node| match node {
            ContentNode::TextRun { text } => text.trim().is_empty(),
            ContentNode::ResourceToken { .. } => false,
        })
    }

    /// Concatenated text of all runs, tokens skipped
    pub fn text(&self) -> String {
        self.nodes.iter().filter_map(ContentNode::as_text).collect()
    }

    pub fn token_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_token()).count()
    }

    pub fn contains_token(&self, resource_id: &str) -> bool {
        self.tokens().any(|(id, _)| id == resource_id)
    }

    /// Flattened offset of the token's left edge
    pub fn token_offset(&self, resource_id: &str) -> Option<usize> {
        let mut start = 0;
        for node in &self.nodes {
            if node.resource_id() == Some(resource_id) {
                return Some(start);
            }
            start += node.len();
        }
        None
    }

    /// Tokens in document order. Cheap to clone, so it can be restarted.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            inner: self.nodes.iter(),
        }
    }

    /// Node holding the unit immediately left of `offset`
    pub fn node_before(&self, offset: usize) -> Option<&ContentNode> {
        offset.checked_sub(1).and_then(|unit| self.node_at_unit(unit))
    }

    /// Node holding the unit immediately right of `offset`
    pub fn node_after(&self, offset: usize) -> Option<&ContentNode> {
        self.node_at_unit(offset)
    }

    fn node_at_unit(&self, unit: usize) -> Option<&ContentNode> {
        let mut start = 0;
        for node in &self.nodes {
            let end = start + node.len();
            if unit < end {
                return Some(node);
            }
            start = end;
        }
        None
    }

    /// Insert plain text at `at` (clamped). Returns the offset right after
    /// the inserted text.
    pub fn insert_text(&mut self, text: &str, at: usize) -> usize {
        let at = at.min(self.len());
        if text.is_empty() {
            return at;
        }

        match CursorIndex::new(self).position(at) {
            CaretPosition::Text { node, offset } => {
                if let ContentNode::TextRun { text: run } = &mut self.nodes[node] {
                    let byte = char_to_byte(run, offset);
                    run.insert_str(byte, text);
                }
            }
            CaretPosition::Between { index } => {
                self.nodes.insert(index, ContentNode::text(text))
            }
        }
        self.normalize();
        at + text.chars().count()
    }

    /// Insert a token at `at` (clamped), splitting a text run if needed.
    ///
    /// Returns `false` without touching the document if the id is already
    /// present; callers must remove it first.
    pub fn insert_token(&mut self, resource_id: &str, at: usize) -> bool {
        if self.contains_token(resource_id) {
            tracing::debug!(resource_id, "token already present, insert ignored");
            return false;
        }
        let at = at.min(self.len());
        let token = ContentNode::token(resource_id);

        match CursorIndex::new(self).position(at) {
            CaretPosition::Text { node, offset } => {
                let Some(run) = self.nodes[node].as_text() else {
                    return false;
                };
                let byte = char_to_byte(run, offset);
                let (left, right) = (run[..byte].to_string(), run[byte..].to_string());
                self.nodes.splice(
                    node..=node,
                    [ContentNode::text(left), token, ContentNode::text(right)],
                );
            }
            CaretPosition::Between { index } => self.nodes.insert(index, token),
        }
        self.normalize();
        true
    }

    /// Remove a token as a whole. Returns the offset it occupied.
    pub fn remove_token(&mut self, resource_id: &str) -> Option<usize> {
        let offset = self.token_offset(resource_id)?;
        self.nodes
            .retain(|node| node.resource_id() != Some(resource_id));
        self.normalize();
        Some(offset)
    }

    /// Swap a token's id in place, keeping its position.
    ///
    /// Fails if `from` is absent or `to` is already present.
    pub fn rekey_token(&mut self, from: &str, to: &str) -> bool {
        if from == to || self.contains_token(to) {
            return false;
        }
        for node in &mut self.nodes {
            if let ContentNode::ResourceToken { resource_id } = node {
                if resource_id == from {
                    *resource_id = to.to_string();
                    return true;
                }
            }
        }
        false
    }

    /// Delete every unit in `range` (clamped). Tokens inside the range go as
    /// a whole; their ids are returned in document order.
    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<String> {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return Vec::new();
        }

        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.nodes.len());
        let mut node_start = 0;
        for node in self.nodes.drain(..) {
            let node_len = node.len();
            let node_end = node_start + node_len;
            match node {
                ContentNode::ResourceToken { resource_id } => {
                    if node_start >= start && node_end <= end {
                        removed.push(resource_id);
                    } else {
                        kept.push(ContentNode::ResourceToken { resource_id });
                    }
                }
                ContentNode::TextRun { text } => {
                    let text: String = text
                        .chars()
                        .enumerate()
                        .filter(|(i, _)| {
                            let unit = node_start + i;
                            unit < start || unit >= end
                        })
                        .map(|(_, ch)| ch)
                        .collect();
                    kept.push(ContentNode::TextRun { text });
                }
            }
            node_start = node_end;
        }
        self.nodes = kept;
        self.normalize();
        removed
    }

    /// Drop every node and return to the canonical empty state
    pub fn clear(&mut self) {
        self.nodes = vec![ContentNode::text("")];
    }

    /// Restore the structural invariants after a raw mutation
    fn normalize(&mut self) {
        let mut merged: Vec<ContentNode> = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.drain(..) {
            match node {
                ContentNode::TextRun { text } if text.is_empty() => {}
                ContentNode::TextRun { text } => match merged.last_mut() {
                    Some(ContentNode::TextRun { text: prev }) => prev.push_str(&text),
                    _ => merged.push(ContentNode::TextRun { text }),
                },
                token => merged.push(token),
            }
        }
        if merged.is_empty() {
            merged.push(ContentNode::text(""));
        }
        self.nodes = merged;
    }
}

/// Lazy, restartable iteration over `(resource_id, node)` pairs
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    inner: std::slice::Iter<'a, ContentNode>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (&'a str, &'a ContentNode);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find_map(|node| node.resource_id().map(|id| (id, node)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::from_nodes([
            ContentNode::text("hello "),
            ContentNode::token("r1"),
            ContentNode::text(" world"),
        ])
    }

    #[test]
    fn test_new_is_canonical_empty() {
        let doc = Document::new();
        assert_eq!(doc.nodes(), &[ContentNode::text("")]);
        assert!(doc.is_empty());
        assert!(doc.is_blank());
    }

    #[test]
    fn test_from_nodes_merges_runs_and_drops_duplicates() {
        let doc = Document::from_nodes([
            ContentNode::text("a"),
            ContentNode::text("b"),
            ContentNode::token("r1"),
            ContentNode::token("r1"),
            ContentNode::text(""),
        ]);
        assert_eq!(
            doc.nodes(),
            &[ContentNode::text("ab"), ContentNode::token("r1")]
        );
    }

    #[test]
    fn test_len_counts_token_as_one() {
        assert_eq!(sample().len(), 13);
    }

    #[test]
    fn test_insert_text_clamps_offset() {
        let mut doc = Document::with_text("abc");
        let caret = doc.insert_text("!", 99);
        assert_eq!(doc.text(), "abc!");
        assert_eq!(caret, 4);
    }

    #[test]
    fn test_insert_text_next_to_token_joins_run() {
        let mut doc = sample();
        // Right after the token: start of " world"
        doc.insert_text("X", 7);
        assert_eq!(doc.nodes()[2], ContentNode::text("X world"));
        // Right before the token: end of "hello "
        doc.insert_text("Y", 6);
        assert_eq!(doc.nodes()[0], ContentNode::text("hello Y"));
    }

    #[test]
    fn test_insert_text_between_tokens_creates_run() {
        let mut doc = Document::from_nodes([ContentNode::token("a"), ContentNode::token("b")]);
        doc.insert_text("-", 1);
        assert_eq!(
            doc.nodes(),
            &[
                ContentNode::token("a"),
                ContentNode::text("-"),
                ContentNode::token("b")
            ]
        );
    }

    #[test]
    fn test_insert_token_splits_run() {
        let mut doc = Document::with_text("hello world");
        assert!(doc.insert_token("r1", 6));
        assert_eq!(
            doc.nodes(),
            &[
                ContentNode::text("hello "),
                ContentNode::token("r1"),
                ContentNode::text("world")
            ]
        );
    }

    #[test]
    fn test_insert_token_into_empty_document() {
        let mut doc = Document::new();
        assert!(doc.insert_token("r1", 0));
        assert_eq!(doc.nodes(), &[ContentNode::token("r1")]);
    }

    #[test]
    fn test_insert_duplicate_token_is_noop() {
        let mut doc = sample();
        let before = doc.clone();
        assert!(!doc.insert_token("r1", 0));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_insert_token_multibyte_split() {
        let mut doc = Document::with_text("héllo");
        doc.insert_token("r1", 2);
        assert_eq!(doc.nodes()[0], ContentNode::text("hé"));
        assert_eq!(doc.nodes()[2], ContentNode::text("llo"));
    }

    #[test]
    fn test_remove_token_merges_runs() {
        let mut doc = sample();
        assert_eq!(doc.remove_token("r1"), Some(6));
        assert_eq!(doc.nodes(), &[ContentNode::text("hello  world")]);
        assert_eq!(doc.remove_token("r1"), None);
    }

    #[test]
    fn test_remove_last_token_resets_to_canonical() {
        let mut doc = Document::from_nodes([ContentNode::token("r1")]);
        doc.remove_token("r1");
        assert_eq!(doc, Document::new());
    }

    #[test]
    fn test_tokens_is_restartable() {
        let doc = Document::from_nodes([
            ContentNode::token("a"),
            ContentNode::text("x"),
            ContentNode::token("b"),
        ]);
        let tokens = doc.tokens();
        let first: Vec<_> = tokens.clone().map(|(id, _)| id).collect();
        let second: Vec<_> = tokens.map(|(id, _)| id).collect();
        assert_eq!(first, vec!["a", "b"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_node_before_and_after() {
        let doc = sample();
        assert!(doc.node_before(7).is_some_and(ContentNode::is_token));
        assert!(doc.node_after(6).is_some_and(ContentNode::is_token));
        assert!(doc.node_before(6).is_some_and(|n| !n.is_token()));
        assert!(doc.node_before(0).is_none());
        assert!(doc.node_after(doc.len()).is_none());
    }

    #[test]
    fn test_rekey_token_in_place() {
        let mut doc = sample();
        assert!(doc.rekey_token("r1", "r2"));
        assert_eq!(doc.nodes()[1], ContentNode::token("r2"));
        assert!(!doc.rekey_token("r1", "r3"));
    }

    #[test]
    fn test_remove_range_takes_whole_tokens_only() {
        let mut doc = sample();
        // "lo " + token + " w"
        let removed = doc.remove_range(3..9);
        assert_eq!(removed, vec!["r1".to_string()]);
        assert_eq!(doc.nodes(), &[ContentNode::text("helorld")]);
    }

    #[test]
    fn test_is_blank_ignores_whitespace() {
        assert!(Document::with_text("  \n ").is_blank());
        assert!(!Document::from_nodes([ContentNode::token("a")]).is_blank());
    }
}
