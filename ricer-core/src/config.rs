//! The loaded configuration, queried by dotted path.
//!
//! # Lookup rules
//!
//! - `get("shell.vars")` walks the nested mappings `shell` → `vars`.
//! - Each segment matches exactly first, then ASCII case-insensitively, so a
//!   `Shell.tmpl` template finds a `shell:` section.
//! - Keys *inside* a returned mapping are left untouched; they are the
//!   variable names a template refers to.
//!
//! The store is never mutated after [`ConfigStore::load`]; share it with
//! `Arc` and read it from as many threads as needed.

use std::path::{Path, PathBuf};

use crate::error::{io_err, ConfigError};
use crate::value::{Value, Variables};

/// Base name searched for when no explicit config file is given.
pub const CONFIG_BASENAME: &str = "config";

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Extensions in discovery order.
    pub const EXTENSIONS: &'static [&'static str] = &["yaml", "yml", "json", "toml"];

    /// Pick a format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn parse(self, contents: &str) -> Result<Value, String> {
        match self {
            Self::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Read-only hierarchical key-value store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    root: Variables,
    source: Option<PathBuf>,
}

impl ConfigStore {
    /// Build a store from an in-memory mapping.
    pub fn from_map(root: Variables) -> Self {
        Self { root, source: None }
    }

    /// Load and parse a configuration file, picking the format by extension.
    ///
    /// An empty document yields an empty store.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;

        let root = if contents.trim().is_empty() {
            Variables::new()
        } else {
            match format.parse(&contents) {
                Ok(Value::Map(map)) => map,
                Ok(Value::Null) => Variables::new(),
                Ok(_) => {
                    return Err(ConfigError::NotAMapping {
                        path: path.to_path_buf(),
                    })
                }
                Err(reason) => {
                    return Err(ConfigError::Parse {
                        path: path.to_path_buf(),
                        reason,
                    })
                }
            }
        };

        tracing::debug!("loaded config {} ({} sections)", path.display(), root.len());
        Ok(Self {
            root,
            source: Some(path.to_path_buf()),
        })
    }

    /// Load the first `config.<ext>` found in `dir`, trying extensions in
    /// [`ConfigFormat::EXTENSIONS`] order.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        for ext in ConfigFormat::EXTENSIONS {
            let candidate = dir.join(format!("{CONFIG_BASENAME}.{ext}"));
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Err(ConfigError::NotFound {
            dir: dir.to_path_buf(),
        })
    }

    /// Load `explicit` if given, otherwise [`discover`](Self::discover) in `dir`.
    pub fn load_or_discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => Self::discover(dir),
        }
    }

    /// Path of the file this store was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Look up a value by dotted path.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut current = lookup(&self.root, segments.next()?)?;
        for segment in segments {
            current = lookup(current.as_map()?, segment)?;
        }
        Some(current)
    }

    /// The nested mapping at `key`; `None` when absent or not a mapping.
    pub fn get_map(&self, key: &str) -> Option<&Variables> {
        let value = self.get(key)?;
        let map = value.as_map();
        if map.is_none() && *value != Value::Null {
            tracing::warn!("config key `{key}` is not a mapping; ignoring it");
        }
        map
    }

    /// The scalar at `key` coerced to a string; `None` when absent or not a scalar.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key)?.as_scalar_string()
    }
}

fn lookup<'a>(map: &'a Variables, segment: &str) -> Option<&'a Value> {
    map.get(segment).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(segment))
            .map(|(_, v)| v)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
