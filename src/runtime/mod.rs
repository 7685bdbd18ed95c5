//! Runtime module - host integration
//!
//! This module contains the code that drives an [`InputModel`](crate::model::InputModel)
//! from outside:
//! - `app` - event loop, command execution, timers, recall history
//! - `protocol` - inbound JSON-lines messages from the host
//! - `queue` - serializes mutations of one input
//! - `transport` - where outbound signals go

pub mod app;
pub mod protocol;
pub mod queue;
pub mod transport;

pub use app::App;
pub use protocol::{HostMessage, Request};
pub use queue::MutationQueue;
pub use transport::{
    detect_transport, resolve_transport_kind, ChannelTransport, LogTransport, StdioTransport,
    Transport, TransportKind, TRANSPORT_ENV,
};
