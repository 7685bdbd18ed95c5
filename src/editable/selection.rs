//! Selection over flattened caret offsets

use std::ops::Range;

/// A selection with anchor (fixed end) and head (where the caret is).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A caret with nothing selected
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Clamp both ends to a document of length `len`
    pub fn clamped(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_is_empty() {
        let sel = Selection::collapsed(4);
        assert!(sel.is_empty());
        assert_eq!(sel.range(), 4..4);
    }

    #[test]
    fn test_reversed_range() {
        let sel = Selection::new(8, 2);
        assert_eq!(sel.head, 2);
        assert_eq!(sel.range(), 2..8);
    }

    #[test]
    fn test_clamped() {
        let sel = Selection::new(3, 40).clamped(10);
        assert_eq!(sel, Selection::new(3, 10));
    }
}
