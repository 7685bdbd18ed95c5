//! Resource Input - Elm-style resource-aware text input
//!
//! Free text with embedded resource tokens (code ranges, files, images,
//! folders) that are edited as atomic units and kept in sync with a
//! host-supplied resource list. The same content has three forms:
//!
//! - a [`Document`] of text runs and tokens
//! - a storage string (`@@id@@` per token), see [`codec::to_storage`]
//! - a display string with tokens resolved to labels, see [`codec::to_display`]

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod surface;
pub mod sync;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::{Cmd, HostSignal};
pub use config::InputConfig;
pub use messages::Msg;
pub use model::{Document, InputModel, Resource, ResourceKind};
