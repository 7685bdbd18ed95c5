//! Reconciliation of the host's resource list against the document
//!
//! Runs on every resource-list update. Token identity matters: the surface
//! is patched incrementally keyed by resource id, so an id that survives an
//! update must keep its node and position.

use std::collections::HashSet;

use crate::editable::CursorIndex;
use crate::model::{Document, Resource, ResourceKind, ResourceLookup};
pub use crate::util::normalize_path;

/// Where brand-new tokens go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    /// Append at the end of the document
    End,
    /// Insert at the caret (the surface has focus)
    Caret,
}

/// What a reconcile pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Tokens pruned because their id left the list
    pub removed: Vec<String>,
    /// Tokens whose id was swapped in place, as `(old, new)`
    pub rekeyed: Vec<(String, String)>,
    /// Tokens newly inserted, in insertion order
    pub inserted: Vec<String>,
    /// New caret offset, when pruning or inserting moved it
    pub caret: Option<usize>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.rekeyed.is_empty() && self.inserted.is_empty()
    }
}

/// Bring `doc` in line with `next`.
///
/// 1. Tokens whose id is not in `next` are stale. A stale token that was a
///    `code` resource (per `previous`) is a re-key candidate; every other
///    stale token is pruned.
/// 2. Walking `next` in order: present ids stay put; a `code` resource with a
///    path re-keys the earliest unused candidate whose previous path matches
///    after [`normalize_path`]; anything else is inserted at `insert_at`.
/// 3. Candidates nobody claimed are pruned. An empty result is the
///    canonical empty document.
///
/// `caret` follows the edits: it shifts left past pruned tokens and, with
/// [`InsertionPoint::Caret`], lands right after each inserted token.
///
/// The path match is a heuristic: two ranges of the same file swapped in one
/// update may land on each other's token.
pub fn reconcile(
    doc: &mut Document,
    previous: &[Resource],
    next: &[Resource],
    insert_at: InsertionPoint,
    caret: usize,
) -> ReconcileReport {
    let original_caret = caret;
    let mut caret = caret.min(doc.len());
    let mut report = ReconcileReport::default();
    let next_ids: HashSet<&str> = next.iter().map(|r| r.id.as_str()).collect();

    let stale: Vec<String> = doc
        .tokens()
        .map(|(id, _)| id)
        .filter(|id| !next_ids.contains(id))
        .map(str::to_string)
        .collect();

    // Stale tokens with a previous code path, still claimable
    let mut candidates: Vec<(String, String)> = stale
        .iter()
        .filter_map(|id| {
            previous
                .resolve(id)
                .filter(|r| r.kind == ResourceKind::Code)
                .and_then(|r| r.file_path.as_deref())
                .map(|path| (id.clone(), normalize_path(path)))
        })
        .collect();

    // Plan re-keys first so pruning leaves the claimed tokens alone
    let mut seen = HashSet::new();
    let mut pending = Vec::new();
    for resource in next {
        if !seen.insert(resource.id.as_str()) || doc.contains_token(&resource.id) {
            continue;
        }
        let claimed = match (resource.kind, resource.file_path.as_deref()) {
            (ResourceKind::Code, Some(path)) => {
                let wanted = normalize_path(path);
                let found = candidates.iter().position(|(_, p)| *p == wanted);
                found.map(|i| candidates.remove(i).0)
            }
            _ => None,
        };
        match claimed {
            Some(old) => {
                doc.rekey_token(&old, &resource.id);
                report.rekeyed.push((old, resource.id.clone()));
            }
            None => pending.push(resource.id.as_str()),
        }
    }

    let claimed: HashSet<&str> = report.rekeyed.iter().map(|(old, _)| old.as_str()).collect();
    for id in stale.iter().filter(|id| !claimed.contains(id.as_str())) {
        if let Some(offset) = doc.remove_token(id) {
            if offset < caret {
                caret -= 1;
            }
            report.removed.push(id.clone());
        }
    }

    for id in pending {
        let at = match insert_at {
            InsertionPoint::Caret => caret.min(doc.len()),
            InsertionPoint::End => doc.len(),
        };
        if !doc.insert_token(id, at) {
            continue;
        }
        if insert_at == InsertionPoint::Caret {
            caret = placed_after(doc, id).unwrap_or(at + 1);
        }
        report.inserted.push(id.to_string());
    }

    if caret != original_caret {
        report.caret = Some(caret);
    }

    if !report.is_noop() {
        tracing::debug!(
            removed = report.removed.len(),
            rekeyed = report.rekeyed.len(),
            inserted = report.inserted.len(),
            "reconciled resources"
        );
    }
    report
}

/// Offset right after the token `resource_id`
fn placed_after(doc: &Document, resource_id: &str) -> Option<usize> {
    let index = doc
        .nodes()
        .iter()
        .position(|node| node.resource_id() == Some(resource_id))?;
    CursorIndex::new(doc).after_token(index)
}
