//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! document edits, focus transitions, and host traffic.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=document=debug,message=debug` - scoped filtering
//! - `RUST_LOG=resource_input::sync=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/resource-input/logs/resource-input.log`
//! with daily rotation. Console output goes to stderr so stdout stays free
//! for the host protocol.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::SurfaceState;
use crate::model::{ContentNode, Document, InputModel};

/// Initialize tracing subscriber with console and file logging
///
/// File logging uses debug level regardless of RUST_LOG.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "resource-input.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of document and surface state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub len: usize,
    pub tokens: Vec<String>,
    pub caret: usize,
    pub focused: bool,
    pub state: SurfaceState,
}

impl DocumentSnapshot {
    /// `None` while the input is unmounted
    pub fn from_model(model: &InputModel) -> Option<Self> {
        let mounted = model.mounted.as_ref()?;
        Some(Self {
            len: mounted.document.len(),
            tokens: mounted
                .document
                .tokens()
                .map(|(id, _)| id.to_string())
                .collect(),
            caret: mounted.surface.caret(),
            focused: mounted.surface.is_focused(),
            state: mounted.surface.state(),
        })
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &DocumentSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.tokens != other.tokens {
            changes.push(format!("tokens: {:?} → {:?}", self.tokens, other.tokens));
        }
        if self.len != other.len {
            changes.push(format!("len: {} → {}", self.len, other.len));
        }
        if self.caret != other.caret {
            changes.push(format!("caret: {} → {}", self.caret, other.caret));
        }
        if self.focused != other.focused {
            let status = if other.focused { "gained" } else { "lost" };
            changes.push(format!("focus {}", status));
        }
        if self.state != other.state {
            changes.push(format!("state: {:?} → {:?}", self.state, other.state));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

/// Check structural invariants of a document after an update (debug builds)
///
/// Logs rather than panics so a bad edit shows up in the log with the
/// message that produced it.
pub fn assert_document_invariants(doc: &Document, context: &str) {
    let nodes = doc.nodes();
    if nodes.is_empty() {
        tracing::error!(target: "document", context, "document has no nodes");
        return;
    }

    let mut seen = std::collections::HashSet::new();
    let mut previous_was_text = false;
    for node in nodes {
        match node {
            ContentNode::TextRun { text } => {
                if previous_was_text {
                    tracing::error!(target: "document", context, "adjacent text runs");
                }
                if text.is_empty() && nodes.len() > 1 {
                    tracing::error!(target: "document", context, "empty text run");
                }
                previous_was_text = true;
            }
            ContentNode::ResourceToken { resource_id } => {
                if !seen.insert(resource_id.as_str()) {
                    tracing::error!(target: "document", context, %resource_id, "duplicate token");
                }
                previous_was_text = false;
            }
        }
    }
}
