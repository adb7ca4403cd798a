//! Directory layout.
//!
//! ```text
//! $XDG_CONFIG_HOME/            (or ~/.config/ when unset or empty)
//!   ricer/
//!     config.{yaml,yml,json,toml}
//!     templates/
//!       *.tmpl, *.tera
//! ```
//!
//! The `_from` functions take every environment input explicitly and are the
//! ones tests use; the plain forms read the process environment.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const APP_DIR: &str = "ricer";
pub const TEMPLATES_DIR: &str = "templates";

/// `$XDG_CONFIG_HOME` when non-empty, else `<home>/.config`.
pub fn config_home_from(
    xdg_config_home: Option<&OsStr>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    match xdg_config_home {
        Some(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg)),
        _ => home
            .map(|h| h.join(".config"))
            .ok_or(ConfigError::HomeNotFound),
    }
}

/// `<config_home>/ricer`.
pub fn ricer_root_from(
    xdg_config_home: Option<&OsStr>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    config_home_from(xdg_config_home, home).map(|dir| dir.join(APP_DIR))
}

/// [`ricer_root_from`] using `$XDG_CONFIG_HOME` and `dirs::home_dir()`.
pub fn ricer_root() -> Result<PathBuf, ConfigError> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME");
    let home = dirs::home_dir();
    ricer_root_from(xdg.as_deref(), home.as_deref())
}

/// `<root>/templates`. Pure, no I/O.
pub fn templates_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATES_DIR)
}
