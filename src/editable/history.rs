//! Recall history of submitted inputs (ArrowUp on a blank input)

use std::collections::VecDeque;

/// Submitted storage strings, newest last.
///
/// Bounded; consecutive duplicates are stored once.
#[derive(Debug, Clone)]
pub struct RecallHistory {
    entries: VecDeque<String>,
    limit: usize,
    /// Index of the entry last handed out by `previous`
    cursor: Option<usize>,
}

impl Default for RecallHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl RecallHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a submitted input; blank input is ignored. Resets the walk.
    pub fn push(&mut self, content: &str) {
        self.cursor = None;
        if content.trim().is_empty() {
            return;
        }
        if self.entries.back().map(String::as_str) == Some(content) {
            return;
        }
        self.entries.push_back(content.to_string());
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Step one entry back. Stays on the oldest entry once reached.
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Forget the current walk position
    pub fn reset_walk(&mut self) {
        self.cursor = None;
    }
}
