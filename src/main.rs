use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use resource_input::cli::CliArgs;
use resource_input::config::InputConfig;
use resource_input::messages::HostMsg;
use resource_input::runtime::{detect_transport, App};

fn main() -> Result<()> {
    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    resource_input::tracing::init();

    let config = match &startup.config_path {
        Some(path) => InputConfig::load_from(path)?,
        None => InputConfig::load(),
    };
    let transport = detect_transport(startup.transport, config.transport)
        .context("Failed to set up host transport")?;
    tracing::info!(transport = ?transport.kind(), "starting");

    let mut app = App::new(config, transport);
    if let Some(content) = startup.initial_content {
        app.dispatch(HostMsg::SetContent(content).into())?;
    }
    if startup.mount {
        app.dispatch(HostMsg::Mount.into())?;
    }

    app.run(io::BufReader::new(io::stdin()))
}
