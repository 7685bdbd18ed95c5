//! Input model - the complete state of one resource-aware input
//!
//! Follows the Elm Architecture: this is the state, `messages` are the
//! inputs, `update` is the transition function.

pub mod document;
pub mod resource;

pub use document::{ContentNode, Document, Tokens};
pub use resource::{Resource, ResourceKind, ResourceLookup};

use crate::codec::{to_display, to_storage};
use crate::config::InputConfig;
use crate::editable::EditSurface;

/// State that only exists while the surface is mounted
#[derive(Debug, Clone)]
pub struct MountedInput {
    pub document: Document,
    pub surface: EditSurface,
    /// Storage string last reported to the host
    pub last_content: String,
}

impl MountedInput {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            surface: EditSurface::new(),
            last_content: String::new(),
        }
    }
}

impl Default for MountedInput {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete input state
#[derive(Debug, Clone, Default)]
pub struct InputModel {
    pub config: InputConfig,
    /// Authoritative resource list from the host. Kept while unmounted.
    pub resources: Vec<Resource>,
    /// Storage content last set by the host. Applied on mount.
    pub content: String,
    /// `None` until mounted
    pub mounted: Option<MountedInput>,
    /// Bumped on every focus change; a blur check only fires for the latest
    pub blur_generation: u64,
    /// A remeasure tick is already scheduled
    pub remeasure_pending: bool,
}

impl InputModel {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn document(&self) -> Option<&Document> {
        self.mounted.as_ref().map(|m| &m.document)
    }

    pub fn surface(&self) -> Option<&EditSurface> {
        self.mounted.as_ref().map(|m| &m.surface)
    }

    /// Current storage-format content; `None` before mount
    pub fn storage_content(&self) -> Option<String> {
        self.document().map(to_storage)
    }

    /// Current display-format content; `None` before mount
    pub fn display_content(&self) -> Option<String> {
        self.document()
            .map(|doc| to_display(doc, self.resources.as_slice()))
    }

    pub fn is_focused(&self) -> bool {
        self.surface().is_some_and(EditSurface::is_focused)
    }
}
