//! Console reporter: progress on stdout, failures on stderr.

use std::path::Path;

use colored::Colorize;
use ricer_renderer::{RenderError, Rendered};
use ricer_sync::Reporter;

pub struct Console;

impl Reporter for Console {
    fn rendered(&self, rendered: &Rendered) {
        println!(
            "{} Creating {} from template {}.",
            "✎".green().bold(),
            rendered.output.display(),
            rendered.name
        );
    }

    fn failed(&self, _source: &Path, error: &RenderError) {
        eprintln!("{} {error}", "✗".red().bold());
    }
}
