//! EditSurface - turns user input into document mutations.
//!
//! Tokens are atomic: the caret never rests inside one, a single backspace or
//! delete next to one removes it whole, and range deletions take only whole
//! tokens.

use crate::model::{ContentNode, Document};
use crate::surface::SurfaceProjection;
use crate::util::{normalize_line_endings, strip_markup};

use super::cursor::{CaretPosition, CursorIndex};
use super::messages::{ClipboardData, InputEvent, Key, Modifiers};
use super::selection::Selection;

/// Input-handling state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfaceState {
    #[default]
    Idle,
    /// An input-method composition is in progress; keys wait for its end
    Composing,
}

/// Host-facing signals raised by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceSignal {
    /// Plain Enter: the host decides whether and what to send
    Submit,
    /// A newline was inserted via Ctrl/Cmd/Shift+Enter
    NewlineRequested,
    /// ArrowUp on a blank input
    RecallPrevious,
}

/// What handling one event did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Document content changed
    pub changed: bool,
    /// A token was inserted or removed (rendered height may change)
    pub structural: bool,
    /// Tokens deleted by the user, in document order
    pub removed: Vec<String>,
    pub signals: Vec<SurfaceSignal>,
}

impl EditOutcome {
    fn signal(signal: SurfaceSignal) -> Self {
        Self {
            signals: vec![signal],
            ..Self::default()
        }
    }

    fn record_removed(&mut self, removed: Vec<String>) {
        if !removed.is_empty() {
            self.structural = true;
            self.removed.extend(removed);
        }
    }
}

/// Caret, selection, focus, and composition state of one input surface,
/// plus the index of rendered token nodes.
#[derive(Debug, Clone, Default)]
pub struct EditSurface {
    state: SurfaceState,
    selection: Selection,
    focused: bool,
    projection: SurfaceProjection,
}

impl EditSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_composing(&self) -> bool {
        self.state == SurfaceState::Composing
    }

    /// Caret offset (the selection head)
    pub fn caret(&self) -> usize {
        self.selection.head
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn projection(&self) -> &SurfaceProjection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut SurfaceProjection {
        &mut self.projection
    }

    /// Collapse the selection to `offset`, clamped to the document
    pub fn set_caret(&mut self, doc: &Document, offset: usize) {
        self.selection = Selection::collapsed(offset.min(doc.len()));
    }

    pub fn set_selection(&mut self, doc: &Document, selection: Selection) {
        self.selection = selection.clamped(doc.len());
    }

    /// Re-clamp after the document changed underneath the surface
    pub fn clamp_to(&mut self, doc: &Document) {
        self.selection = self.selection.clamped(doc.len());
    }

    /// Drop per-mount state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply one user event to the document
    pub fn handle(&mut self, doc: &mut Document, event: &InputEvent) -> EditOutcome {
        if self.is_composing() {
            return match event {
                InputEvent::CompositionEnd { text } => {
                    self.state = SurfaceState::Idle;
                    tracing::trace!("composition ended");
                    self.insert_plain(doc, text)
                }
                _ => {
                    tracing::trace!(?event, "ignored while composing");
                    EditOutcome::default()
                }
            };
        }

        match event {
            InputEvent::Key { key, modifiers } => self.handle_key(doc, *key, *modifiers),
            InputEvent::Text { text } => self.insert_plain(doc, &normalize_line_endings(text)),
            InputEvent::Paste { data } => self.paste(doc, data),
            InputEvent::CompositionStart => {
                self.state = SurfaceState::Composing;
                tracing::trace!("composition started");
                EditOutcome::default()
            }
            InputEvent::CompositionEnd { text } => self.insert_plain(doc, text),
            InputEvent::Select { anchor, head } => {
                self.set_selection(doc, Selection::new(*anchor, *head));
                EditOutcome::default()
            }
        }
    }

    /// Remove a token on explicit request (its delete affordance)
    pub fn remove_token(&mut self, doc: &mut Document, resource_id: &str) -> EditOutcome {
        let mut outcome = EditOutcome::default();
        if let Some(offset) = doc.remove_token(resource_id) {
            let caret = self.caret();
            let caret = if caret > offset { caret - 1 } else { caret };
            self.selection = Selection::collapsed(caret.min(doc.len()));
            outcome.changed = true;
            outcome.record_removed(vec![resource_id.to_string()]);
        }
        outcome
    }

    fn handle_key(&mut self, doc: &mut Document, key: Key, modifiers: Modifiers) -> EditOutcome {
        tracing::trace!(?key, ?modifiers, caret = self.caret(), "key");
        match key {
            Key::Enter if modifiers.command() || modifiers.shift => {
                let mut outcome = self.insert_plain(doc, "\n");
                outcome.signals.push(SurfaceSignal::NewlineRequested);
                outcome
            }
            Key::Enter if modifiers.is_empty() => EditOutcome::signal(SurfaceSignal::Submit),
            Key::ArrowUp if doc.is_blank() => EditOutcome::signal(SurfaceSignal::RecallPrevious),
            Key::Backspace => self.delete_backward(doc),
            Key::Delete => self.delete_forward(doc),
            Key::ArrowLeft => {
                self.move_horizontal(doc, false, modifiers.shift);
                EditOutcome::default()
            }
            Key::ArrowRight => {
                self.move_horizontal(doc, true, modifiers.shift);
                EditOutcome::default()
            }
            Key::Home => {
                self.move_to(0, modifiers.shift);
                EditOutcome::default()
            }
            Key::End => {
                self.move_to(doc.len(), modifiers.shift);
                EditOutcome::default()
            }
            _ => EditOutcome::default(),
        }
    }

    fn move_to(&mut self, offset: usize, extend: bool) {
        if extend {
            self.selection.head = offset;
        } else {
            self.selection = Selection::collapsed(offset);
        }
    }

    /// One unit left or right; a token is one unit so it is crossed whole
    fn move_horizontal(&mut self, doc: &Document, forward: bool, extend: bool) {
        let sel = self.selection;
        if !extend && !sel.is_empty() {
            let edge = if forward { sel.end() } else { sel.start() };
            self.selection = Selection::collapsed(edge);
            return;
        }
        let head = if forward {
            (sel.head + 1).min(doc.len())
        } else {
            sel.head.saturating_sub(1)
        };
        self.move_to(head, extend);
    }

    /// Delete the selection, if any. Tokens inside go whole.
    fn delete_selection(&mut self, doc: &mut Document, outcome: &mut EditOutcome) -> bool {
        let sel = self.selection.clamped(doc.len());
        if sel.is_empty() {
            return false;
        }
        let removed = doc.remove_range(sel.range());
        outcome.changed = true;
        outcome.record_removed(removed);
        self.selection = Selection::collapsed(sel.start());
        true
    }

    fn delete_backward(&mut self, doc: &mut Document) -> EditOutcome {
        let mut outcome = EditOutcome::default();
        if self.delete_selection(doc, &mut outcome) {
            return outcome;
        }
        let caret = self.caret().min(doc.len());
        if caret == 0 {
            return outcome;
        }

        if let Some(ContentNode::ResourceToken { resource_id }) = doc.node_before(caret) {
            let resource_id = resource_id.clone();
            if let Some(offset) = doc.remove_token(&resource_id) {
                tracing::debug!(%resource_id, "token deleted by backspace");
                self.selection = Selection::collapsed(offset);
                outcome.changed = true;
                outcome.record_removed(vec![resource_id]);
            }
            return outcome;
        }

        doc.remove_range(caret - 1..caret);
        self.selection = Selection::collapsed(caret - 1);
        outcome.changed = true;
        outcome
    }

    fn delete_forward(&mut self, doc: &mut Document) -> EditOutcome {
        let mut outcome = EditOutcome::default();
        if self.delete_selection(doc, &mut outcome) {
            return outcome;
        }
        let caret = self.caret().min(doc.len());
        if caret >= doc.len() {
            return outcome;
        }
        let removed = doc.remove_range(caret..caret + 1);
        if !removed.is_empty() {
            tracing::debug!(resource_id = %removed[0], "token deleted by delete");
        }
        self.selection = Selection::collapsed(caret);
        outcome.changed = true;
        outcome.record_removed(removed);
        outcome
    }

    /// Replace the selection with plain text; never creates tokens
    fn insert_plain(&mut self, doc: &mut Document, text: &str) -> EditOutcome {
        let mut outcome = EditOutcome::default();
        self.delete_selection(doc, &mut outcome);
        if text.is_empty() {
            return outcome;
        }
        let caret = doc.insert_text(text, self.caret());
        self.selection = Selection::collapsed(caret);
        outcome.changed = true;
        outcome
    }

    fn paste(&mut self, doc: &mut Document, data: &ClipboardData) -> EditOutcome {
        if !data.has_text() {
            tracing::trace!(kinds = ?data.other, "non-text paste ignored");
            return EditOutcome::default();
        }
        let text = match (&data.text, &data.html) {
            (Some(text), _) => normalize_line_endings(text),
            (None, html) => normalize_line_endings(&strip_markup(html.as_deref().unwrap_or_default())),
        };
        self.insert_plain(doc, &text)
    }

    /// Node position of the caret, for programmatic placement
    pub fn caret_position(&self, doc: &Document) -> CaretPosition {
        CursorIndex::new(doc).position(self.caret())
    }
}
