//! Error types for ricer-sync.
//!
//! Only run-level failures live here. A single template failing is a
//! [`ricer_renderer::RenderError`] reported through the
//! [`Reporter`](crate::Reporter) and never aborts the run.

use thiserror::Error;

use ricer_core::ConfigError;

/// Fatal errors that stop a run before any template is dispatched.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The configuration could not be located or loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The throttle's semaphore was closed while dispatching.
    #[error("render throttle closed")]
    ThrottleClosed,

    /// The async runtime could not be started.
    #[error("could not start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
