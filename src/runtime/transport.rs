//! Outbound signal transports
//!
//! The transport is chosen once at startup and handed to [`App`](super::App);
//! nothing else in the crate knows which one is in use.

use std::io::{self, IsTerminal, Write};
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::commands::HostSignal;

/// Environment variable consulted by [`detect_transport`]
pub const TRANSPORT_ENV: &str = "RESOURCE_INPUT_TRANSPORT";

/// Delivers host signals somewhere
pub trait Transport {
    fn post(&mut self, signal: &HostSignal) -> Result<()>;

    fn kind(&self) -> TransportKind;
}

/// Which transport to use
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// JSON lines on stdout for an embedding host
    Stdio,
    /// Signals go to the log; standalone development
    Log,
    /// In-process channel
    Channel,
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "log" => Ok(Self::Log),
            "channel" => Ok(Self::Channel),
            other => Err(format!("unknown transport: {}", other)),
        }
    }
}

/// Writes one JSON object per signal, newline-terminated
pub struct StdioTransport<W: Write = io::Stdout> {
    out: W,
}

impl StdioTransport<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StdioTransport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Transport for StdioTransport<W> {
    fn post(&mut self, signal: &HostSignal) -> Result<()> {
        serde_json::to_writer(&mut self.out, signal).context("encoding host signal")?;
        self.out.write_all(b"\n").context("writing host signal")?;
        self.out.flush().context("flushing host signal")?;
        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Stdio
    }
}

/// Logs every signal at info level
#[derive(Debug, Default)]
pub struct LogTransport;

impl Transport for LogTransport {
    fn post(&mut self, signal: &HostSignal) -> Result<()> {
        let json = serde_json::to_string(signal).context("encoding host signal")?;
        tracing::info!(target: "host", signal = %json);
        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Log
    }
}

/// Sends signals over an `mpsc` channel to an in-process host
pub struct ChannelTransport {
    tx: Sender<HostSignal>,
}

impl ChannelTransport {
    /// Create a transport and the receiving end for the host
    pub fn pair() -> (Self, Receiver<HostSignal>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl Transport for ChannelTransport {
    fn post(&mut self, signal: &HostSignal) -> Result<()> {
        self.tx
            .send(signal.clone())
            .context("host channel closed")
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Channel
    }
}

/// Pick a transport kind from the available hints, first match wins:
/// CLI flag, config file, environment, then whether stdout is a terminal.
pub fn resolve_transport_kind(
    cli: Option<TransportKind>,
    config: Option<TransportKind>,
    env: Option<&str>,
    stdout_is_terminal: bool,
) -> TransportKind {
    if let Some(kind) = cli.or(config) {
        return kind;
    }
    if let Some(value) = env {
        match value.parse() {
            Ok(kind) => return kind,
            Err(e) => tracing::warn!(%e, "ignoring {}", TRANSPORT_ENV),
        }
    }
    if stdout_is_terminal {
        TransportKind::Log
    } else {
        TransportKind::Stdio
    }
}

/// Probe the process environment once and build the transport
pub fn detect_transport(
    cli: Option<TransportKind>,
    config: Option<TransportKind>,
) -> Result<Box<dyn Transport>> {
    let env = std::env::var(TRANSPORT_ENV).ok();
    let kind = resolve_transport_kind(cli, config, env.as_deref(), io::stdout().is_terminal());
    tracing::debug!(?kind, "transport selected");

    match kind {
        TransportKind::Stdio => Ok(Box::new(StdioTransport::stdout())),
        TransportKind::Log => Ok(Box::new(LogTransport)),
        TransportKind::Channel => {
            anyhow::bail!("the channel transport is only available to in-process hosts")
        }
    }
}
