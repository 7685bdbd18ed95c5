//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod focus;
mod host;
mod input;

use crate::codec::to_storage;
use crate::commands::{Cmd, HostSignal};
use crate::messages::Msg;
use crate::model::InputModel;

#[cfg(debug_assertions)]
use crate::tracing::DocumentSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use focus::{update_focus, update_timer};
pub use host::update_host;
pub use input::update_input;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut InputModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut InputModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Host(m) => update_host(model, m),
        Msg::Input(event) => update_input(model, event),
        Msg::Focus(m) => update_focus(model, m),
        Msg::Timer(m) => update_timer(model, m),
    }
}

/// Common tail of every mutation: patch the surface projection, report new
/// content, and schedule a remeasure after structural edits.
pub(crate) fn after_mutation(model: &mut InputModel, structural: bool, cmds: &mut Vec<Cmd>) {
    let Some(mounted) = model.mounted.as_mut() else {
        return;
    };
    mounted.surface.clamp_to(&mounted.document);

    let patches = mounted
        .surface
        .projection_mut()
        .patch(&mounted.document, model.resources.as_slice());
    if !patches.is_empty() {
        cmds.push(Cmd::Emit(HostSignal::SurfacePatch { patches }));
    }

    let content = to_storage(&mounted.document);
    if content != mounted.last_content {
        mounted.last_content = content.clone();
        model.content = content.clone();
        cmds.push(Cmd::Emit(HostSignal::ContentChanged { content }));
    }

    if structural && !model.remeasure_pending {
        model.remeasure_pending = true;
        cmds.push(Cmd::ScheduleRemeasure);
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after document state and logs diffs.
#[cfg(debug_assertions)]
fn update_traced(model: &mut InputModel, msg: Msg) -> Option<Cmd> {
    let is_noisy = matches!(&msg, Msg::Timer(_));
    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = DocumentSnapshot::from_model(model);
    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    if let (Some(before), Some(after)) = (before, DocumentSnapshot::from_model(model)) {
        if let Some(diff) = before.diff(&after) {
            debug!(target: "document", %diff, "state changed");
        }
    }
    if let Some(doc) = model.document() {
        crate::tracing::assert_document_invariants(doc, &msg_name);
    }

    result
}

/// Display name for a message, variant and arguments included
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Host(m) => format!("Host::{:?}", m),
        Msg::Input(e) => format!("Input::{:?}", e),
        Msg::Focus(m) => format!("Focus::{:?}", m),
        Msg::Timer(m) => format!("Timer::{:?}", m),
    }
}
