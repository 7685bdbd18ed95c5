//! Focus debounce and deferred ticks

use crate::commands::{Cmd, HostSignal};
use crate::editable::measurement_text;
use crate::messages::{FocusMsg, TimerMsg};
use crate::model::InputModel;

pub fn update_focus(model: &mut InputModel, msg: FocusMsg) -> Option<Cmd> {
    let mounted = model.mounted.as_mut()?;
    model.blur_generation += 1;

    match msg {
        FocusMsg::Gained => {
            mounted.surface.set_focused(true);
            None
        }
        // Clicking a token's delete affordance blurs the field for a moment;
        // only a focus loss that outlasts the debounce counts.
        FocusMsg::Lost => Some(Cmd::ScheduleBlurCheck {
            generation: model.blur_generation,
            delay: model.config.blur_debounce(),
        }),
    }
}

pub fn update_timer(model: &mut InputModel, msg: TimerMsg) -> Option<Cmd> {
    match msg {
        TimerMsg::BlurCheck { generation } => {
            if generation != model.blur_generation {
                tracing::trace!(generation, "stale blur check");
                return None;
            }
            if let Some(mounted) = model.mounted.as_mut() {
                mounted.surface.set_focused(false);
                tracing::debug!("focus lost");
            }
            None
        }
        TimerMsg::Remeasure => {
            model.remeasure_pending = false;
            let doc = model.document()?;
            Some(Cmd::Emit(HostSignal::LayoutChanged {
                measure: measurement_text(doc),
            }))
        }
    }
}
