//! # ricer-renderer
//!
//! Turns one template file into one output file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use ricer_core::ConfigStore;
//! use ricer_renderer::{locate_templates, render_template};
//!
//! fn render_all(store: &ConfigStore, dir: &Path) {
//!     for source in locate_templates(dir) {
//!         match render_template(&source, store) {
//!             Ok(done) => println!("{} -> {}", done.name, done.output.display()),
//!             Err(e) => eprintln!("{e}"),
//!         }
//!     }
//! }
//! ```

pub mod engine;
pub mod error;
pub mod job;
pub mod locator;
pub mod writer;

pub use engine::{Syntax, Template};
pub use error::RenderError;
pub use job::{render_template, RenderJob, Rendered};
pub use locator::{locate_templates, template_name};
