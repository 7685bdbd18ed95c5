//! Shared helpers for benchmarks

use resource_input::model::{ContentNode, Document, Resource};

/// `tokens` code resources spread over distinct files
#[allow(dead_code)]
pub fn make_resources(tokens: usize) -> Vec<Resource> {
    (0..tokens)
        .map(|i| Resource::code(format!("res-{i}"), format!("src/module_{i}.rs")).with_lines(1, 40))
        .collect()
}

/// A document alternating a sentence of text with one token per resource
#[allow(dead_code)]
pub fn make_document(resources: &[Resource]) -> Document {
    let mut nodes = Vec::with_capacity(resources.len() * 2 + 1);
    for resource in resources {
        nodes.push(ContentNode::text("The quick brown fox jumps over the lazy dog. "));
        nodes.push(ContentNode::token(resource.id.clone()));
    }
    nodes.push(ContentNode::text(" tail"));
    Document::from_nodes(nodes)
}
