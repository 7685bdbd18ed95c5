//! User-driven updates: keys, text, paste, composition

use crate::commands::{Cmd, HostSignal};
use crate::editable::{InputEvent, SurfaceSignal};
use crate::model::InputModel;

use super::after_mutation;

pub fn update_input(model: &mut InputModel, event: InputEvent) -> Option<Cmd> {
    let Some(mounted) = model.mounted.as_mut() else {
        tracing::trace!("input before mount ignored");
        return None;
    };
    if event.is_editing() {
        mounted.surface.set_focused(true);
    }

    let outcome = mounted.surface.handle(&mut mounted.document, &event);
    let mut cmds = Vec::new();

    for resource_id in outcome.removed {
        cmds.push(Cmd::Emit(HostSignal::ResourceRemoved { resource_id }));
    }
    if outcome.changed {
        after_mutation(model, outcome.structural, &mut cmds);
    }
    for signal in outcome.signals {
        let signal = match signal {
            SurfaceSignal::Submit => HostSignal::Submit,
            SurfaceSignal::NewlineRequested => HostSignal::NewlineRequested,
            SurfaceSignal::RecallPrevious => HostSignal::RecallPrevious,
        };
        cmds.push(Cmd::Emit(signal));
    }

    Cmd::batch(cmds)
}
