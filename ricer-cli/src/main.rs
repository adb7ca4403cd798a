//! Ricer: render configuration files from templates.
//!
//! # Usage
//!
//! ```text
//! ricer [-c <config-file>]
//! ```
//!
//! Every `*.tmpl` / `*.tera` file in `$XDG_CONFIG_HOME/ricer/templates/` is
//! rendered with `<name>.vars` and written to `<name>.output`, where `<name>`
//! is the template's file name without extension.

mod console;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use ricer_core::paths;
use ricer_sync::{pipeline, RunOptions, RunOutcome};

/// Environment variable holding the `tracing` filter directive.
const LOG_ENV: &str = "RICER_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "ricer",
    version,
    about = "Generate configuration files from templates",
    long_about = None,
)]
struct Cli {
    /// (optional) the configuration file to use
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let root = paths::ricer_root().context("could not locate the ricer config directory")?;
    let options = RunOptions::new(root).with_config_file(cli.config);

    let outcome = pipeline::run_blocking(&options, Arc::new(console::Console))
        .context("ricer run aborted")?;

    match outcome {
        RunOutcome::MissingTemplatesDir { expected } => {
            println!(
                "Templates directory does not exist, please create {}",
                expected.display()
            );
        }
        RunOutcome::Completed(summary) => {
            if !summary.is_success() {
                tracing::warn!(
                    "{} of {} template(s) failed",
                    summary.failed.len() + summary.panicked,
                    summary.total()
                );
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
