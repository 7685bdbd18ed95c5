//! Display format: tokens rendered as short human-readable references

use crate::model::{ContentNode, Document, Resource, ResourceKind, ResourceLookup};

/// Human description of one resource
pub fn describe(resource: &Resource) -> String {
    let target = resource.path_or_name().unwrap_or_default();
    match resource.kind {
        ResourceKind::Code => {
            let lines = match (resource.start_line, resource.end_line) {
                (Some(start), Some(end)) => format!("({start}-{end})"),
                (Some(start), None) => format!("({start})"),
                _ => String::new(),
            };
            format!("[code-ref] {target}{lines}")
        }
        ResourceKind::File => format!("[file-ref] {target}"),
        ResourceKind::Folder => format!("[folder-ref] {target}"),
        ResourceKind::Image => "[image-ref]".to_string(),
    }
}

/// Label for a token: the resource description, or `[ref] <id>` when the id
/// no longer resolves
pub fn token_label<R>(resource_id: &str, resources: &R) -> String
where
    R: ResourceLookup + ?Sized,
{
    match resources.resolve(resource_id) {
        Some(resource) => describe(resource),
        None => format!("[ref] {resource_id}"),
    }
}

/// Render the document with every token replaced by its label
pub fn to_display<R>(doc: &Document, resources: &R) -> String
where
    R: ResourceLookup + ?Sized,
{
    let mut out = String::new();
    for node in doc.nodes() {
        match node {
            ContentNode::TextRun { text } => out.push_str(text),
            ContentNode::ResourceToken { resource_id } => {
                out.push_str(&token_label(resource_id, resources))
            }
        }
    }
    out
}
