//! Message types for the Elm-style architecture
//!
//! Every change to an input instance flows through one of these.

use crate::editable::InputEvent;
use crate::model::Resource;

/// Values and requests coming from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMsg {
    /// Surface attached; creates the document
    Mount,
    /// Surface detached; discards the document
    Unmount,
    /// Authoritative resource list, replaces the previous one wholesale
    SetResources(Vec<Resource>),
    /// Storage-format content set from outside
    SetContent(String),
    /// Focus request
    Focus,
    /// Programmatic blur, takes effect immediately
    Blur,
    /// Place the caret at a flattened offset
    SetCursorPosition(usize),
    /// The user clicked a token's own delete affordance
    RemoveResource(String),
    /// Restore a previously submitted input, caret at the end. Unlike
    /// `SetContent` this is reported back as a content change.
    Recall(String),
}

/// Focus changes reported by the rendered surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMsg {
    Gained,
    /// Debounced: only takes effect if nothing refocuses in time
    Lost,
}

/// Deferred work coming back from the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMsg {
    /// Blur debounce elapsed; stale generations are ignored
    BlurCheck { generation: u64 },
    /// One tick after a structural edit; geometry can be read now
    Remeasure,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Host(HostMsg),
    Input(InputEvent),
    Focus(FocusMsg),
    Timer(TimerMsg),
}

impl From<HostMsg> for Msg {
    fn from(msg: HostMsg) -> Self {
        Msg::Host(msg)
    }
}

impl From<InputEvent> for Msg {
    fn from(event: InputEvent) -> Self {
        Msg::Input(event)
    }
}

impl From<FocusMsg> for Msg {
    fn from(msg: FocusMsg) -> Self {
        Msg::Focus(msg)
    }
}

impl From<TimerMsg> for Msg {
    fn from(msg: TimerMsg) -> Self {
        Msg::Timer(msg)
    }
}

impl Msg {
    /// Check if this message may change the document
    pub fn is_mutation(&self) -> bool {
        match self {
            Msg::Host(m) => matches!(
                m,
                HostMsg::Mount
                    | HostMsg::SetResources(_)
                    | HostMsg::SetContent(_)
                    | HostMsg::RemoveResource(_)
                    | HostMsg::Recall(_)
            ),
            Msg::Input(event) => event.is_editing(),
            Msg::Focus(_) | Msg::Timer(_) => false,
        }
    }
}
