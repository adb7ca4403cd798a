//! Error types for ricer-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while locating or loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its contents are malformed for its format.
    #[error("failed to parse config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The document parsed, but its root is not a mapping.
    #[error("config {path} must contain a mapping at the top level")]
    NotAMapping { path: PathBuf },

    /// The file extension does not name a supported format.
    #[error("unsupported config format for {path}; expected one of: yaml, yml, json, toml")]
    UnsupportedFormat { path: PathBuf },

    /// No `config.<ext>` file exists in the search directory.
    #[error("no config file found in {dir} (looked for config.yaml, config.yml, config.json, config.toml)")]
    NotFound { dir: PathBuf },

    /// Neither `$XDG_CONFIG_HOME` nor a home directory could be resolved.
    #[error("cannot determine config home; set $XDG_CONFIG_HOME or $HOME")]
    HomeNotFound,
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
