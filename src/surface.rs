//! Projection of the document onto a rendered surface.
//!
//! The host renders each token as its own node. Rebuilding every node on each
//! change loses the caret and flickers, so this keeps a resourceId -> handle
//! index and emits only the patches for tokens that actually changed. A
//! re-keyed token keeps its handle.

use std::collections::HashMap;

use serde::Serialize;

use crate::codec::token_label;
use crate::model::{Document, ResourceLookup};

/// Stable identity of one rendered token node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeHandle(pub u64);

/// One incremental change to the rendered surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum SurfacePatch {
    /// Create a token node at flattened `offset`
    #[serde(rename_all = "camelCase")]
    Insert {
        handle: NodeHandle,
        resource_id: String,
        label: String,
        offset: usize,
    },
    /// Drop a token node
    #[serde(rename_all = "camelCase")]
    Remove {
        handle: NodeHandle,
        resource_id: String,
    },
    /// Same node, new label (resource edited in place)
    Relabel { handle: NodeHandle, label: String },
    /// Same node, new resource id
    Rekey {
        handle: NodeHandle,
        from: String,
        to: String,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    handle: NodeHandle,
    label: String,
}

#[derive(Debug, Clone, Default)]
pub struct SurfaceProjection {
    entries: HashMap<String, Entry>,
    next_handle: u64,
}

impl SurfaceProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self, resource_id: &str) -> Option<NodeHandle> {
        self.entries.get(resource_id).map(|e| e.handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move a node to a new id without recreating it
    pub fn rekey(&mut self, from: &str, to: &str) -> Option<SurfacePatch> {
        let entry = self.entries.remove(from)?;
        let handle = entry.handle;
        self.entries.insert(to.to_string(), entry);
        Some(SurfacePatch::Rekey {
            handle,
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Diff the document against the index and update it.
    ///
    /// Removals come first, then inserts and relabels in document order.
    pub fn patch<R>(&mut self, doc: &Document, resources: &R) -> Vec<SurfacePatch>
    where
        R: ResourceLookup + ?Sized,
    {
        let mut patches = Vec::new();

        let mut gone: Vec<(String, NodeHandle)> = self
            .entries
            .iter()
            .filter(|(id, _)| !doc.contains_token(id))
            .map(|(id, e)| (id.clone(), e.handle))
            .collect();
        gone.sort_by_key(|(_, handle)| handle.0);
        for (resource_id, handle) in gone {
            self.entries.remove(&resource_id);
            patches.push(SurfacePatch::Remove {
                handle,
                resource_id,
            });
        }

        let mut offset = 0;
        for node in doc.nodes() {
            if let Some(id) = node.resource_id() {
                let label = token_label(id, resources);
                match self.entries.get_mut(id) {
                    Some(entry) if entry.label != label => {
                        entry.label = label.clone();
                        patches.push(SurfacePatch::Relabel {
                            handle: entry.handle,
                            label,
                        });
                    }
                    Some(_) => {}
                    None => {
                        let handle = NodeHandle(self.next_handle);
                        self.next_handle += 1;
                        self.entries.insert(
                            id.to_string(),
                            Entry {
                                handle,
                                label: label.clone(),
                            },
                        );
                        patches.push(SurfacePatch::Insert {
                            handle,
                            resource_id: id.to_string(),
                            label,
                            offset,
                        });
                    }
                }
            }
            offset += node.len();
        }

        if !patches.is_empty() {
            tracing::trace!(count = patches.len(), "surface patches");
        }
        patches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentNode, Resource};

    #[test]
    fn test_first_patch_inserts_all() {
        let doc = Document::from_nodes([
            ContentNode::text("a"),
            ContentNode::token("x"),
            ContentNode::token("y"),
        ]);
        let resources = vec![Resource::image("x"), Resource::file("y", "y.rs")];
        let mut projection = SurfaceProjection::new();
        let patches = projection.patch(&doc, &resources);
        assert_eq!(patches.len(), 2);
        assert!(matches!(
            &patches[1],
            SurfacePatch::Insert { resource_id, offset: 2, label, .. }
                if resource_id == "y" && label == "[file-ref] y.rs"
        ));
    }

    #[test]
    fn test_unchanged_document_yields_no_patches() {
        let doc = Document::from_nodes([ContentNode::token("x")]);
        let resources = vec![Resource::image("x")];
        let mut projection = SurfaceProjection::new();
        projection.patch(&doc, &resources);
        assert!(projection.patch(&doc, &resources).is_empty());
    }

    #[test]
    fn test_relabel_keeps_handle() {
        let doc = Document::from_nodes([ContentNode::token("c")]);
        let mut projection = SurfaceProjection::new();
        projection.patch(&doc, &vec![Resource::code("c", "a.rs").with_lines(1, 2)]);
        let handle = projection.handle("c");
        let patches = projection.patch(&doc, &vec![Resource::code("c", "a.rs").with_lines(1, 9)]);
        assert_eq!(
            patches,
            vec![SurfacePatch::Relabel {
                handle: handle.unwrap(),
                label: "[code-ref] a.rs(1-9)".to_string()
            }]
        );
    }

    #[test]
    fn test_rekey_preserves_identity() {
        let mut doc = Document::from_nodes([ContentNode::token("r1")]);
        let mut projection = SurfaceProjection::new();
        projection.patch(&doc, &vec![Resource::code("r1", "a.ts")]);
        let before = projection.handle("r1");

        doc.rekey_token("r1", "r2");
        let rekey = projection.rekey("r1", "r2");
        assert!(matches!(rekey, Some(SurfacePatch::Rekey { .. })));
        let patches = projection.patch(&doc, &vec![Resource::code("r2", "a.ts")]);
        assert!(patches.is_empty());
        assert_eq!(projection.handle("r2"), before);
    }

    #[test]
    fn test_removed_token_patched_out() {
        let mut doc = Document::from_nodes([ContentNode::token("x")]);
        let resources = vec![Resource::image("x")];
        let mut projection = SurfaceProjection::new();
        projection.patch(&doc, &resources);
        doc.remove_token("x");
        let patches = projection.patch(&doc, &resources);
        assert!(matches!(&patches[..], [SurfacePatch::Remove { resource_id, .. }] if resource_id == "x"));
        assert!(projection.is_empty());
    }
}
