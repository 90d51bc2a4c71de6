//! Configuration file loading and writing.
//!
//! The file holds the same keys as the global command-line flags. It is
//! looked up from `--config`, then `JECKET_CONFIG_PATH`, then `.jecket.toml`
//! in the working directory, then `jecket/config.toml` under the XDG config
//! home.

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Toml};
use log::{debug, info};

use crate::cli_args::GlobalArgs;
use crate::environment;
use crate::error::JecketError;

pub const CONFIG_PATH_ENV: &str = "JECKET_CONFIG_PATH";
pub const LOCAL_CONFIG_FILE: &str = ".jecket.toml";
const XDG_PREFIX: &str = "jecket";
const XDG_CONFIG_FILE: &str = "config.toml";

/// Where a config file path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by the user; it must exist.
    Requested(PathBuf),
    /// Found by searching default locations.
    Discovered(PathBuf),
}

impl ConfigSource {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Requested(p) | Self::Discovered(p) => p,
        }
    }
}

/// Locate the config file to load, if any.
#[must_use]
pub fn discover(requested: Option<&Path>) -> Option<ConfigSource> {
    if let Some(path) = requested {
        return Some(ConfigSource::Requested(path.to_path_buf()));
    }
    if let Some(path) = environment::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
    {
        return Some(ConfigSource::Requested(PathBuf::from(path)));
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(ConfigSource::Discovered(local));
    }
    xdg::BaseDirectories::with_prefix(XDG_PREFIX)
        .find_config_file(XDG_CONFIG_FILE)
        .map(ConfigSource::Discovered)
}

/// Read global settings from the config file, if one is found.
///
/// # Errors
///
/// Returns [`JecketError::Config`] when a requested file is missing or a
/// file cannot be parsed.
pub fn load(requested: Option<&Path>) -> Result<GlobalArgs, JecketError> {
    let Some(source) = discover(requested) else {
        debug!("no configuration file found");
        return Ok(GlobalArgs::default());
    };
    load_from(&source)
}

/// Read global settings from `source`.
///
/// # Errors
///
/// Returns [`JecketError::Config`] when a requested file is missing or the
/// file cannot be parsed.
pub fn load_from(source: &ConfigSource) -> Result<GlobalArgs, JecketError> {
    let path = source.path();
    if matches!(source, ConfigSource::Requested(_)) && !path.is_file() {
        return Err(JecketError::Config(
            format!("config file {} not found", path.display()).into_boxed_str(),
        ));
    }
    debug!("loading configuration from {}", path.display());
    let args: GlobalArgs = Figment::new().merge(Toml::file(path)).extract()?;
    Ok(args)
}

/// Default location written by `set-conf`.
///
/// # Errors
///
/// Returns [`JecketError::Io`] if the XDG config directory cannot be
/// created.
pub fn default_write_path() -> Result<PathBuf, JecketError> {
    Ok(xdg::BaseDirectories::with_prefix(XDG_PREFIX).place_config_file(XDG_CONFIG_FILE)?)
}

/// Serialise `args` as TOML into `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`JecketError`] if serialisation or writing fails.
pub fn write(path: &Path, args: &GlobalArgs) -> Result<(), JecketError> {
    let content = toml::to_string(args)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!("configuration file has been created at {}", path.display());
    Ok(())
}
