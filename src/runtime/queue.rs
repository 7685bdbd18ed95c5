//! Per-input mutation queue

use std::collections::VecDeque;

use crate::messages::Msg;

/// Serializes updates to one input.
///
/// A message pushed while another is being applied waits until the current
/// one (and everything queued before it) has finished.
#[derive(Debug, Default)]
pub struct MutationQueue {
    pending: VecDeque<Msg>,
    applying: bool,
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: Msg) {
        self.pending.push_back(msg);
    }

    /// Start draining. Returns false if a drain is already in progress, in
    /// which case the caller must leave the queue to that drain.
    pub fn begin(&mut self) -> bool {
        if self.applying {
            return false;
        }
        self.applying = true;
        true
    }

    pub fn pop(&mut self) -> Option<Msg> {
        self.pending.pop_front()
    }

    pub fn finish(&mut self) {
        self.applying = false;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
