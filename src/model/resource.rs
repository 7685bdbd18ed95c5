//! Resources supplied by the host - the things a token can point at

use serde::{Deserialize, Serialize};

/// Kind of a referenced resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Code,
    File,
    Image,
    Folder,
}

/// An external entity that can be referenced inline.
///
/// Owned by the host. The input never creates resources, it only refers to
/// them by `id` and resolves the other fields at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Resource {
    /// Create a resource with only an id and kind set
    pub fn new(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            file_path: None,
            language: None,
            language_id: None,
            start_line: None,
            end_line: None,
            name: None,
        }
    }

    pub fn code(id: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Code).with_path(file_path)
    }

    pub fn file(id: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::File).with_path(file_path)
    }

    pub fn folder(id: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Folder).with_path(file_path)
    }

    pub fn image(id: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Image)
    }

    pub fn with_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_lines(mut self, start_line: u32, end_line: u32) -> Self {
        self.start_line = Some(start_line);
        self.end_line = Some(end_line);
        self
    }

    /// Path if present, otherwise the name
    pub fn path_or_name(&self) -> Option<&str> {
        self.file_path.as_deref().or(self.name.as_deref())
    }
}

/// Read-only lookup over a resource list, by id.
///
/// The list stays the authority; this only borrows it for one pass.
pub trait ResourceLookup {
    fn resolve(&self, id: &str) -> Option<&Resource>;
}

impl ResourceLookup for [Resource] {
    fn resolve(&self, id: &str) -> Option<&Resource> {
        self.iter().find(|r| r.id == id)
    }
}

impl ResourceLookup for Vec<Resource> {
    fn resolve(&self, id: &str) -> Option<&Resource> {
        self.as_slice().resolve(id)
    }
}
