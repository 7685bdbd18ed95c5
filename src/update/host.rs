//! Host-driven updates: mount lifecycle, resource list, external content,
//! focus and caret requests

use crate::codec::{from_storage, to_storage};
use crate::commands::{Cmd, HostSignal};
use crate::editable::CursorIndex;
use crate::messages::HostMsg;
use crate::model::{InputModel, MountedInput};
use crate::sync::{reconcile, InsertionPoint};

use super::after_mutation;

pub fn update_host(model: &mut InputModel, msg: HostMsg) -> Option<Cmd> {
    let mut cmds = Vec::new();

    match msg {
        HostMsg::Mount => {
            if model.is_mounted() {
                tracing::debug!("already mounted");
                return None;
            }
            let mut mounted = MountedInput::new();
            mounted.document = from_storage(&model.content, model.resources.as_slice());
            mounted.last_content = model.content.clone();
            reconcile(
                &mut mounted.document,
                &[],
                &model.resources,
                InsertionPoint::End,
                0,
            );
            model.mounted = Some(mounted);
            tracing::debug!(resources = model.resources.len(), "mounted");
            after_mutation(model, true, &mut cmds);
        }

        HostMsg::Unmount => {
            if model.mounted.take().is_some() {
                model.blur_generation += 1;
                model.remeasure_pending = false;
                tracing::debug!("unmounted");
            }
        }

        HostMsg::SetResources(resources) => {
            let previous = std::mem::replace(&mut model.resources, resources);
            let Some(mounted) = model.mounted.as_mut() else {
                return None;
            };

            let insert_at = if mounted.surface.is_focused() {
                InsertionPoint::Caret
            } else {
                InsertionPoint::End
            };
            let report = reconcile(
                &mut mounted.document,
                &previous,
                &model.resources,
                insert_at,
                mounted.surface.caret(),
            );

            let rekeys: Vec<_> = report
                .rekeyed
                .iter()
                .filter_map(|(from, to)| mounted.surface.projection_mut().rekey(from, to))
                .collect();
            if !rekeys.is_empty() {
                cmds.push(Cmd::Emit(HostSignal::SurfacePatch { patches: rekeys }));
            }

            if let Some(caret) = report.caret {
                mounted.surface.set_caret(&mounted.document, caret);
                let position = CursorIndex::new(&mounted.document).position(caret);
                cmds.push(Cmd::Emit(HostSignal::PlaceCaret { position }));
            }

            let structural = !report.removed.is_empty() || !report.inserted.is_empty();
            after_mutation(model, structural, &mut cmds);
        }

        HostMsg::SetContent(content) => {
            model.content = content;
            let Some(mounted) = model.mounted.as_mut() else {
                return None;
            };
            if to_storage(&mounted.document) == model.content {
                return None;
            }

            let parsed = from_storage(&model.content, model.resources.as_slice());
            let structural = !parsed.tokens().map(|(id, _)| id).eq(mounted
                .document
                .tokens()
                .map(|(id, _)| id));
            mounted.document = parsed;
            mounted.last_content = model.content.clone();
            tracing::debug!(structural, "content replaced by host");
            after_mutation(model, structural, &mut cmds);
        }

        HostMsg::Recall(content) => {
            let Some(mounted) = model.mounted.as_mut() else {
                return None;
            };
            mounted.document = from_storage(&content, model.resources.as_slice());
            let end = mounted.document.len();
            mounted.surface.set_caret(&mounted.document, end);
            let position = mounted.surface.caret_position(&mounted.document);
            cmds.push(Cmd::Emit(HostSignal::PlaceCaret { position }));
            after_mutation(model, true, &mut cmds);
        }

        HostMsg::Focus => {
            let Some(mounted) = model.mounted.as_mut() else {
                return None;
            };
            model.blur_generation += 1;
            mounted.surface.set_focused(true);
            let position = mounted.surface.caret_position(&mounted.document);
            cmds.push(Cmd::Emit(HostSignal::PlaceCaret { position }));
        }

        HostMsg::Blur => {
            let Some(mounted) = model.mounted.as_mut() else {
                return None;
            };
            model.blur_generation += 1;
            mounted.surface.set_focused(false);
        }

        HostMsg::SetCursorPosition(offset) => {
            let Some(mounted) = model.mounted.as_mut() else {
                return None;
            };
            mounted.surface.set_caret(&mounted.document, offset);
            let position = mounted.surface.caret_position(&mounted.document);
            cmds.push(Cmd::Emit(HostSignal::PlaceCaret { position }));
        }

        HostMsg::RemoveResource(resource_id) => {
            let Some(mounted) = model.mounted.as_mut() else {
                return None;
            };
            // The click that triggered this blurred the field first
            model.blur_generation += 1;
            let outcome = mounted
                .surface
                .remove_token(&mut mounted.document, &resource_id);
            if !outcome.changed {
                return None;
            }
            for resource_id in outcome.removed {
                cmds.push(Cmd::Emit(HostSignal::ResourceRemoved { resource_id }));
            }
            after_mutation(model, true, &mut cmds);
        }
    }

    Cmd::batch(cmds)
}
