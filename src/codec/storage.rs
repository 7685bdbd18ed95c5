//! Storage format: `@@id@@` per token, literal text in between

use crate::model::{ContentNode, Document, ResourceLookup};

/// Sentinel wrapping a resource id on both sides.
///
/// Resource ids are generated by the host and never contain it.
pub const RESOURCE_MARKER: &str = "@@";

/// Serialize a document in strict document order
pub fn to_storage(doc: &Document) -> String {
    let mut out = String::new();
    for node in doc.nodes() {
        match node {
            ContentNode::TextRun { text } => out.push_str(text),
            ContentNode::ResourceToken { resource_id } => {
                out.push_str(RESOURCE_MARKER);
                out.push_str(resource_id);
                out.push_str(RESOURCE_MARKER);
            }
        }
    }
    out
}

/// Parse a storage string against the current resource list.
///
/// Never fails. When a marker pair does not wrap a known id, only the first
/// `@` of the opening marker becomes literal text and scanning resumes one
/// character later, so any later marker can still open a valid span. This
/// keeps text ending in `@` intact in front of a token. A repeated id keeps
/// only its first token.
pub fn from_storage<R>(input: &str, resources: &R) -> Document
where
    R: ResourceLookup + ?Sized,
{
    let marker_len = RESOURCE_MARKER.len();
    let mut nodes = Vec::new();
    let mut literal = String::new();
    let mut rest = input;

    while let Some(open) = rest.find(RESOURCE_MARKER) {
        literal.push_str(&rest[..open]);
        let after_open = &rest[open + marker_len..];
        let Some(close) = after_open.find(RESOURCE_MARKER) else {
            rest = &rest[open..];
            break;
        };
        let id = &after_open[..close];

        if !id.is_empty() && resources.resolve(id).is_some() {
            if !literal.is_empty() {
                nodes.push(ContentNode::text(std::mem::take(&mut literal)));
            }
            nodes.push(ContentNode::token(id));
            rest = &after_open[close + marker_len..];
        } else {
            if !id.is_empty() && !id.starts_with('@') {
                tracing::warn!(resource_id = id, "unknown resource in stored content, kept as text");
            }
            literal.push('@');
            rest = &rest[open + 1..];
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        nodes.push(ContentNode::text(literal));
    }

    Document::from_nodes(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resource;

    fn m(id: &str) -> String {
        format!("{RESOURCE_MARKER}{id}{RESOURCE_MARKER}")
    }

    #[test]
    fn test_to_storage_example() {
        let doc = Document::from_nodes([
            ContentNode::text("hello "),
            ContentNode::token("r1"),
            ContentNode::text(" world"),
        ]);
        assert_eq!(to_storage(&doc), format!("hello {} world", m("r1")));
    }

    #[test]
    fn test_from_storage_rebuilds_structure() {
        let resources = vec![Resource::file("r1", "a.ts")];
        let doc = from_storage(&format!("hello {} world", m("r1")), &resources);
        assert_eq!(
            doc.nodes(),
            &[
                ContentNode::text("hello "),
                ContentNode::token("r1"),
                ContentNode::text(" world")
            ]
        );
    }

    #[test]
    fn test_unknown_id_kept_literally() {
        let input = m("missing");
        let doc = from_storage(&input, &Vec::<Resource>::new());
        assert_eq!(doc.nodes(), &[ContentNode::text(input.clone())]);
        assert_eq!(to_storage(&doc), input);
    }

    #[test]
    fn test_closing_marker_can_open_next_span() {
        let resources = vec![Resource::file("r1", "a.ts")];
        let input = format!("a{RESOURCE_MARKER}x{}b", m("r1"));
        let doc = from_storage(&input, &resources);
        assert_eq!(
            doc.nodes(),
            &[
                ContentNode::text(format!("a{RESOURCE_MARKER}x")),
                ContentNode::token("r1"),
                ContentNode::text("b")
            ]
        );
        assert_eq!(to_storage(&doc), input);
    }

    #[test]
    fn test_dangling_marker_is_text() {
        let input = format!("mail me{RESOURCE_MARKER}later");
        let doc = from_storage(&input, &Vec::<Resource>::new());
        assert_eq!(doc.text(), input);
    }

    #[test]
    fn test_empty_input_is_canonical_empty() {
        let doc = from_storage("", &Vec::<Resource>::new());
        assert_eq!(doc, Document::new());
    }

    #[test]
    fn test_adjacent_tokens() {
        let resources = vec![Resource::file("a", "a"), Resource::image("b")];
        let doc = from_storage(&format!("{}{}", m("a"), m("b")), &resources);
        assert_eq!(
            doc.nodes(),
            &[ContentNode::token("a"), ContentNode::token("b")]
        );
    }

    #[test]
    fn test_at_sign_before_token_survives() {
        let resources = vec![Resource::file("r1", "a.ts")];
        let doc = Document::from_nodes([ContentNode::text("ping @"), ContentNode::token("r1")]);
        let stored = to_storage(&doc);
        assert_eq!(from_storage(&stored, &resources), doc);
    }

    #[test]
    fn test_at_signs_around_and_between_tokens_survive() {
        let resources = vec![Resource::file("a", "a"), Resource::image("b")];
        for between in ["@", "@@", "x@@"] {
            let doc = Document::from_nodes([
                ContentNode::token("a"),
                ContentNode::text(between),
                ContentNode::token("b"),
                ContentNode::text("@"),
            ]);
            let stored = to_storage(&doc);
            assert_eq!(from_storage(&stored, &resources), doc, "between = {between:?}");
        }
    }
}
