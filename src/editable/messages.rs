//! Input events delivered to the edit surface

use serde::{Deserialize, Serialize};

/// Modifier keys held during a key event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Cmd on macOS, Win elsewhere
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers::new(false, false, false, false);
    pub const CTRL: Modifiers = Modifiers::new(true, false, false, false);
    pub const SHIFT: Modifiers = Modifiers::new(false, true, false, false);
    pub const META: Modifiers = Modifiers::new(false, false, false, true);

    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        Self {
            ctrl,
            shift,
            alt,
            meta,
        }
    }

    pub const fn is_empty(self) -> bool {
        !(self.ctrl || self.shift || self.alt || self.meta)
    }

    /// Ctrl or Cmd held
    pub const fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the surface reacts to. Everything else arrives as text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

/// Clipboard contents offered by a paste
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardData {
    /// `text/plain` flavor
    pub text: Option<String>,
    /// `text/html` flavor
    pub html: Option<String>,
    /// MIME types of any non-text flavors (images, files)
    pub other: Vec<String>,
}

impl ClipboardData {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Self::default()
        }
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some() || self.html.is_some()
    }
}

/// A single user interaction with the surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InputEvent {
    /// A named key press
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Typed characters
    Text { text: String },
    /// Clipboard paste
    Paste { data: ClipboardData },
    /// Input-method composition began
    CompositionStart,
    /// Input-method composition committed `text`
    CompositionEnd { text: String },
    /// The user moved the caret or selection (mouse, native movement)
    Select { anchor: usize, head: usize },
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_with(key: Key, modifiers: Modifiers) -> Self {
        InputEvent::Key { key, modifiers }
    }

    pub fn text(text: impl Into<String>) -> Self {
        InputEvent::Text { text: text.into() }
    }

    /// Check if this event can change the document
    pub fn is_editing(&self) -> bool {
        match self {
            InputEvent::Key { key, modifiers } => match key {
                Key::Backspace | Key::Delete => true,
                Key::Enter => modifiers.command() || modifiers.shift,
                _ => false,
            },
            InputEvent::Text { .. } | InputEvent::Paste { .. } | InputEvent::CompositionEnd { .. } => {
                true
            }
            InputEvent::CompositionStart | InputEvent::Select { .. } => false,
        }
    }
}
