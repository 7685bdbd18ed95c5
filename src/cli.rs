//! Command-line argument parsing for the input process
//!
//! Supports:
//! - Choosing the host transport
//! - An explicit config file
//! - Initial storage content, optionally mounted right away

use clap::Parser;
use std::path::PathBuf;

use crate::runtime::TransportKind;

/// A resource-aware text input driven over JSON lines
#[derive(Parser, Debug)]
#[command(
    name = "resource-input",
    version,
    about = "A resource-aware text input driven over JSON lines"
)]
pub struct CliArgs {
    /// Where host signals go (default: probe the environment)
    #[arg(short = 't', long, value_enum)]
    pub transport: Option<TransportKind>,

    /// Config file (default: ~/.config/resource-input/config.yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Initial content in storage format
    #[arg(long, value_name = "TEXT")]
    pub content: Option<String>,

    /// Mount immediately instead of waiting for a `mount` message
    #[arg(short = 'm', long)]
    pub mount: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupConfig {
    pub transport: Option<TransportKind>,
    pub config_path: Option<PathBuf>,
    pub initial_content: Option<String>,
    pub mount: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if let Some(path) = &self.config {
            if path.is_dir() {
                return Err(format!("config path is a directory: {}", path.display()));
            }
        }

        // Normalized the same way as content typed by the user
        let initial_content = self
            .content
            .map(|content| crate::util::normalize_line_endings(&content));

        Ok(StartupConfig {
            transport: self.transport,
            config_path: self.config,
            initial_content,
            mount: self.mount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("resource-input").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_no_args() {
        let config = parse(&[]).into_config().unwrap();
        assert_eq!(config, StartupConfig::default());
    }

    #[test]
    fn test_transport_flag() {
        let config = parse(&["--transport", "log"]).into_config().unwrap();
        assert_eq!(config.transport, Some(TransportKind::Log));
        assert!(CliArgs::try_parse_from(["resource-input", "-t", "smoke-signals"]).is_err());
    }

    #[test]
    fn test_content_line_endings_normalized() {
        let config = parse(&["--content", "a\r\nb", "--mount"]).into_config().unwrap();
        assert_eq!(config.initial_content.as_deref(), Some("a\nb"));
        assert!(config.mount);
    }

    #[test]
    fn test_config_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            transport: None,
            config: Some(dir.path().to_path_buf()),
            content: None,
            mount: false,
        };
        assert!(args.into_config().is_err());
    }
}
