//! On-disk locations for resource-input
//!
//! A single per-user directory holds `config.yaml`, read by
//! [`InputConfig::load`](crate::config::InputConfig::load) at startup, and a
//! `logs/` directory for the rolling log file written by the bridge binary.

use std::ffi::OsString;
use std::{env, fs, io, path::PathBuf};

const APP_DIR: &str = "resource-input";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// Per-user resource-input directory, `None` when the platform reports no
/// config location at all
pub fn config_dir() -> Option<PathBuf> {
    platform_config_root().map(|root| root.join(APP_DIR))
}

#[cfg(not(target_os = "windows"))]
fn platform_config_root() -> Option<PathBuf> {
    xdg_or_home(env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
}

#[cfg(target_os = "windows")]
fn platform_config_root() -> Option<PathBuf> {
    env::var_os("APPDATA").map(PathBuf::from)
}

/// `$XDG_CONFIG_HOME`, else `<home>/.config`. An empty variable counts as unset.
#[cfg_attr(target_os = "windows", allow(dead_code))]
fn xdg_or_home(xdg: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg.filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| home.join(".config")))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let dir = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory available"))?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
