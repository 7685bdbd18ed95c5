//! Command types for the Elm-style architecture
//!
//! Commands represent side effects to perform after an update: signals for
//! the host and timers for the runtime.

use std::time::Duration;

use serde::Serialize;

use crate::editable::CaretPosition;
use crate::surface::SurfacePatch;

/// Everything the input reports to its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostSignal {
    /// New storage-format content after any mutation
    ContentChanged { content: String },
    /// The user deleted a token
    #[serde(rename_all = "camelCase")]
    ResourceRemoved { resource_id: String },
    /// Plain Enter
    Submit,
    /// Ctrl/Cmd/Shift+Enter inserted a newline
    NewlineRequested,
    /// ArrowUp on a blank input
    RecallPrevious,
    /// Rendered height may have changed; `measure` is the text to measure
    LayoutChanged { measure: String },
    /// Incremental token node updates for the rendered surface
    SurfacePatch { patches: Vec<SurfacePatch> },
    /// Put the rendered caret here
    PlaceCaret { position: CaretPosition },
    /// Reply to a storage content query
    StorageContent { content: String },
    /// Reply to a display content query
    DisplayContent { content: String },
}

/// Side effects requested by `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Send a signal to the host
    Emit(HostSignal),
    /// Deliver `TimerMsg::BlurCheck { generation }` after `delay`
    ScheduleBlurCheck { generation: u64, delay: Duration },
    /// Deliver `TimerMsg::Remeasure` on the next tick
    ScheduleRemeasure,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Collapse a list into one command: `None` if empty, the command itself
    /// if single, a batch otherwise
    pub fn batch(mut cmds: Vec<Cmd>) -> Option<Cmd> {
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    /// Flatten nested batches into a list, in order
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }

    /// Host signals carried by this command, in order
    pub fn signals(&self) -> Vec<&HostSignal> {
        match self {
            Cmd::Emit(signal) => vec![signal],
            Cmd::Batch(cmds) => cmds.iter().flat_map(Cmd::signals).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_collapses() {
        assert_eq!(Cmd::batch(vec![]), None);
        assert_eq!(
            Cmd::batch(vec![Cmd::ScheduleRemeasure]),
            Some(Cmd::ScheduleRemeasure)
        );
        assert!(matches!(
            Cmd::batch(vec![Cmd::ScheduleRemeasure, Cmd::Emit(HostSignal::Submit)]),
            Some(Cmd::Batch(_))
        ));
    }

    #[test]
    fn test_flatten_nested() {
        let cmd = Cmd::Batch(vec![
            Cmd::Emit(HostSignal::Submit),
            Cmd::Batch(vec![Cmd::ScheduleRemeasure]),
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![Cmd::Emit(HostSignal::Submit), Cmd::ScheduleRemeasure]
        );
    }

    #[test]
    fn test_signal_wire_shape() {
        let json = serde_json::to_string(&HostSignal::ResourceRemoved {
            resource_id: "r1".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"resource-removed","resourceId":"r1"}"#);
        let json = serde_json::to_string(&HostSignal::Submit).unwrap();
        assert_eq!(json, r#"{"type":"submit"}"#);
    }
}
