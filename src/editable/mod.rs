//! Editing surface for resource-aware text input.
//!
//! - [`EditSurface`]: caret, selection, focus and composition state; applies
//!   [`InputEvent`]s to a [`Document`](crate::model::Document)
//! - [`CursorIndex`]: linear caret offsets <-> structural [`CaretPosition`]s
//! - [`Selection`]: anchor/head over flattened offsets
//! - [`RecallHistory`]: submitted inputs for ArrowUp recall

pub mod cursor;
mod history;
mod messages;
mod selection;
mod state;

pub use cursor::{measurement_text, CaretPosition, CursorIndex};
pub use history::RecallHistory;
pub use messages::{ClipboardData, InputEvent, Key, Modifiers};
pub use selection::Selection;
pub use state::{EditOutcome, EditSurface, SurfaceSignal, SurfaceState};
