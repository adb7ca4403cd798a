//! Ricer core library: configuration store, value model, directory layout.
//!
//! - [`config`]: [`ConfigStore`], loaded once and queried by dotted path
//! - [`value`]: the dynamically-typed [`Value`] handed to templates
//! - [`paths`]: XDG-style config root and templates directory
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod paths;
pub mod value;

pub use config::{ConfigFormat, ConfigStore};
pub use error::ConfigError;
pub use value::{Value, Variables};
