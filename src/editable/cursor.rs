//! Caret positions and the offset <-> node mapping.
//!
//! A linear caret offset counts each text `char` as one unit and each token
//! as one unit. A structural [`CaretPosition`] names a node instead, which is
//! what a rendered surface needs to place a caret programmatically.

use serde::Serialize;

use crate::model::{ContentNode, Document};

/// Structural caret position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CaretPosition {
    /// Inside (or at an edge of) the text run at `node`
    Text { node: usize, offset: usize },
    /// Between nodes, right before node `index`; `index == node count` is
    /// the very end
    Between { index: usize },
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: usize,
    len: usize,
    is_token: bool,
}

/// Offset lookup table built from one document snapshot.
///
/// Rebuild it after every mutation; it does not track edits.
#[derive(Debug, Clone)]
pub struct CursorIndex {
    segments: Vec<Segment>,
    len: usize,
}

impl CursorIndex {
    pub fn new(doc: &Document) -> Self {
        let mut start = 0;
        let segments = doc
            .nodes()
            .iter()
            .map(|node| {
                let len = node.len();
                let segment = Segment {
                    start,
                    len,
                    is_token: node.is_token(),
                };
                start += len;
                segment
            })
            .collect();
        Self {
            segments,
            len: start,
        }
    }

    /// Flattened document length
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Map a linear offset to a node position, clamping past-the-end offsets.
    ///
    /// An offset on the boundary between a text run and a token resolves into
    /// the text run, since a token is never a caret rest position.
    pub fn position(&self, offset: usize) -> CaretPosition {
        let offset = offset.min(self.len);
        for (i, seg) in self.segments.iter().enumerate() {
            if seg.is_token {
                if offset <= seg.start {
                    return CaretPosition::Between { index: i };
                }
            } else if offset <= seg.start + seg.len {
                return CaretPosition::Text {
                    node: i,
                    offset: offset - seg.start,
                };
            }
        }
        CaretPosition::Between {
            index: self.segments.len(),
        }
    }

    /// Map a node position back to a linear offset, clamping bad input
    pub fn offset(&self, position: CaretPosition) -> usize {
        match position {
            CaretPosition::Text { node, offset } => match self.segments.get(node) {
                Some(seg) if seg.is_token => seg.start + offset.min(1),
                Some(seg) => seg.start + offset.min(seg.len),
                None => self.len,
            },
            CaretPosition::Between { index } => self
                .segments
                .get(index)
                .map_or(self.len, |seg| seg.start),
        }
    }

    /// Offset right after the token at node `index`, if that node is a token
    pub fn after_token(&self, index: usize) -> Option<usize> {
        self.segments
            .get(index)
            .filter(|seg| seg.is_token)
            .map(|seg| seg.start + 1)
    }
}

/// Flattened text with each token written as `@id`.
///
/// Only meant for measuring rendered width; offsets into this string do not
/// match caret offsets.
pub fn measurement_text(doc: &Document) -> String {
    let mut out = String::new();
    for node in doc.nodes() {
        match node {
            ContentNode::TextRun { text } => out.push_str(text),
            ContentNode::ResourceToken { resource_id } => {
                out.push('@');
                out.push_str(resource_id);
            }
        }
    }
    out
}
