//! The render pipeline: one linear pass, no retries.
//!
//! ```text
//! LoadConfig → LocateTemplatesDir → LocateTemplateFiles → DispatchAll → JoinAll
//! ```
//!
//! Only `LoadConfig` can fail the run. A missing templates directory ends it
//! early with [`RunOutcome::MissingTemplatesDir`]; everything that goes wrong
//! inside a job is reported and collected in the [`RunSummary`].

use std::path::PathBuf;
use std::sync::Arc;

use ricer_core::{paths, ConfigStore};
use ricer_renderer::{locate_templates, render_template, RenderError, Rendered};

use crate::error::SyncError;
use crate::report::Reporter;
use crate::throttle::{Throttle, DEFAULT_CONCURRENCY};

/// Inputs for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Explicit config file; when `None`, `config.<ext>` is searched in `root`.
    pub config_file: Option<PathBuf>,
    /// Ricer's config root (`$XDG_CONFIG_HOME/ricer`); templates live below it.
    pub root: PathBuf,
    pub concurrency: usize,
}

impl RunOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config_file: None,
            root: root.into(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn templates_dir(&self) -> PathBuf {
        paths::templates_dir(&self.root)
    }
}

/// A job that ended in a [`RenderError`].
#[derive(Debug)]
pub struct JobFailure {
    pub source: PathBuf,
    pub error: RenderError,
}

/// Everything that happened during the dispatch phase, sorted by template.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rendered: Vec<Rendered>,
    pub failed: Vec<JobFailure>,
    /// Jobs that panicked instead of returning.
    pub panicked: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.panicked == 0
    }

    pub fn total(&self) -> usize {
        self.rendered.len() + self.failed.len() + self.panicked
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Templates were discovered (possibly none) and every job finished.
    Completed(RunSummary),
    /// The templates directory does not exist; nothing was rendered.
    MissingTemplatesDir { expected: PathBuf },
}

/// Run the pipeline on the current tokio runtime.
pub async fn run(options: &RunOptions, reporter: Arc<dyn Reporter>) -> Result<RunOutcome, SyncError> {
    let store = Arc::new(ConfigStore::load_or_discover(
        options.config_file.as_deref(),
        &options.root,
    )?);

    let dir = options.templates_dir();
    if !dir.is_dir() {
        tracing::debug!("templates directory missing: {}", dir.display());
        return Ok(RunOutcome::MissingTemplatesDir { expected: dir });
    }

    let sources = locate_templates(&dir);
    let mut throttle = Throttle::new(options.concurrency);
    for source in sources {
        let store = Arc::clone(&store);
        let reporter = Arc::clone(&reporter);
        tracing::debug!("dispatch: {}", source.display());
        throttle
            .dispatch(move || render_and_report(source, &store, reporter.as_ref()))
            .await?;
    }

    let mut summary = RunSummary::default();
    for result in throttle.join().await {
        match result {
            Ok(Ok(rendered)) => summary.rendered.push(rendered),
            Ok(Err(failure)) => summary.failed.push(failure),
            Err(e) => {
                tracing::error!("render job panicked: {e}");
                summary.panicked += 1;
            }
        }
    }
    summary.rendered.sort_by(|a, b| a.source.cmp(&b.source));
    summary.failed.sort_by(|a, b| a.source.cmp(&b.source));

    tracing::info!(
        "run finished: {} rendered, {} failed, {} panicked",
        summary.rendered.len(),
        summary.failed.len(),
        summary.panicked
    );
    Ok(RunOutcome::Completed(summary))
}

/// [`run`] on a fresh multi-thread runtime, blocking the caller until done.
pub fn run_blocking(options: &RunOptions, reporter: Arc<dyn Reporter>) -> Result<RunOutcome, SyncError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(SyncError::Runtime)?;
    runtime.block_on(run(options, reporter))
}

fn render_and_report(
    source: PathBuf,
    store: &ConfigStore,
    reporter: &dyn Reporter,
) -> Result<Rendered, JobFailure> {
    match render_template(&source, store) {
        Ok(rendered) => {
            reporter.rendered(&rendered);
            Ok(rendered)
        }
        Err(error) => {
            reporter.failed(&source, &error);
            Err(JobFailure { source, error })
        }
    }
}

