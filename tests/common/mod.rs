//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use resource_input::commands::{Cmd, HostSignal};
use resource_input::config::InputConfig;
use resource_input::messages::{HostMsg, Msg};
use resource_input::model::{ContentNode, Document, InputModel, Resource};
use resource_input::update::update;

/// `"hello " [r1] " world"`
pub fn sample_document() -> Document {
    Document::from_nodes([
        ContentNode::text("hello "),
        ContentNode::token("r1"),
        ContentNode::text(" world"),
    ])
}

pub fn sample_resources() -> Vec<Resource> {
    vec![Resource::file("r1", "a.ts")]
}

/// Token ids in document order
pub fn token_ids(doc: &Document) -> Vec<String> {
    doc.tokens().map(|(id, _)| id.to_string()).collect()
}

/// A mounted model with `resources` and storage `content`
pub fn mounted_model(resources: Vec<Resource>, content: &str) -> InputModel {
    let mut model = InputModel::new(InputConfig::default());
    update(&mut model, HostMsg::SetResources(resources).into());
    update(&mut model, HostMsg::SetContent(content.to_string()).into());
    update(&mut model, HostMsg::Mount.into());
    model
}

/// Run one message and collect the host signals it produced
pub fn signals_of(model: &mut InputModel, msg: impl Into<Msg>) -> Vec<HostSignal> {
    update(model, msg.into())
        .map(|cmd| cmd.signals().into_iter().cloned().collect())
        .unwrap_or_default()
}

/// Run one message and return its flattened commands
pub fn cmds_of(model: &mut InputModel, msg: impl Into<Msg>) -> Vec<Cmd> {
    update(model, msg.into()).map(Cmd::flatten).unwrap_or_default()
}

pub fn storage(model: &InputModel) -> String {
    model.storage_content().unwrap_or_default()
}

/// Only the `content-changed` payloads
pub fn content_changes(signals: &[HostSignal]) -> Vec<&str> {
    signals
        .iter()
        .filter_map(|s| match s {
            HostSignal::ContentChanged { content } => Some(content.as_str()),
            _ => None,
        })
        .collect()
}
