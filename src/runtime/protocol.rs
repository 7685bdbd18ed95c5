//! Inbound host protocol: one JSON object per line, tagged by `"type"`

use serde::Deserialize;

use crate::editable::InputEvent;
use crate::messages::{FocusMsg, HostMsg, Msg};
use crate::model::Resource;

/// A message from the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostMessage {
    Mount,
    Unmount,
    SetResources {
        resources: Vec<Resource>,
    },
    SetContent {
        content: String,
    },
    /// Programmatic focus
    Focus,
    /// Programmatic blur, immediate
    Blur,
    SetCursorPosition {
        offset: usize,
    },
    /// A user event on the rendered surface
    Input {
        event: InputEvent,
    },
    #[serde(rename_all = "camelCase")]
    RemoveResource {
        resource_id: String,
    },
    /// The rendered surface received focus
    FocusGained,
    /// The rendered surface lost focus; debounced
    FocusLost,
    GetStorageContent,
    GetDisplayContent,
}

/// What the runtime should do with a host message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Update(Msg),
    StorageContent,
    DisplayContent,
}

impl HostMessage {
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    pub fn into_request(self) -> Request {
        let msg: Msg = match self {
            HostMessage::Mount => HostMsg::Mount.into(),
            HostMessage::Unmount => HostMsg::Unmount.into(),
            HostMessage::SetResources { resources } => HostMsg::SetResources(resources).into(),
            HostMessage::SetContent { content } => HostMsg::SetContent(content).into(),
            HostMessage::Focus => HostMsg::Focus.into(),
            HostMessage::Blur => HostMsg::Blur.into(),
            HostMessage::SetCursorPosition { offset } => HostMsg::SetCursorPosition(offset).into(),
            HostMessage::Input { event } => event.into(),
            HostMessage::RemoveResource { resource_id } => {
                HostMsg::RemoveResource(resource_id).into()
            }
            HostMessage::FocusGained => FocusMsg::Gained.into(),
            HostMessage::FocusLost => FocusMsg::Lost.into(),
            HostMessage::GetStorageContent => return Request::StorageContent,
            HostMessage::GetDisplayContent => return Request::DisplayContent,
        };
        Request::Update(msg)
    }
}
