//! Conversions between a [`Document`](crate::model::Document) and its string forms
//!
//! - storage: marker-delimited ids interleaved with literal text, used for
//!   persistence and transport
//! - display: tokens resolved to human-readable descriptions

mod display;
mod storage;

pub use display::{describe, to_display, token_label};
pub use storage::{from_storage, to_storage, RESOURCE_MARKER};
