//! Progress reporting seam between workers and the console.

use std::path::Path;

use ricer_renderer::{RenderError, Rendered};

/// Receives one call per finished job, from the worker thread that ran it.
pub trait Reporter: Send + Sync {
    fn rendered(&self, rendered: &Rendered);
    fn failed(&self, source: &Path, error: &RenderError);
}
