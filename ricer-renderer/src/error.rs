//! Error types for ricer-renderer.
//!
//! Every variant names the template it belongs to, so a message printed at
//! the job boundary is enough to find the offending file.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while rendering a single template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template file is unreadable or syntactically invalid.
    #[error("could not parse template {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// `<name>.output` is absent or empty.
    #[error("you have to define an output for template {template} (set `{template}.output`)")]
    MissingOutput { template: String },

    /// The destination's parent directories could not be created.
    #[error("could not create directory for {output} (template {template}): {source}")]
    DirectoryCreate {
        output: PathBuf,
        template: String,
        #[source]
        source: std::io::Error,
    },

    /// The destination (or its temporary sibling) could not be created.
    #[error("could not create {output} for template {template}: {source}")]
    FileCreate {
        output: PathBuf,
        template: String,
        #[source]
        source: std::io::Error,
    },

    /// The template failed while executing against its variables.
    #[error("could not execute template {template} into {output}: {reason}")]
    Execute {
        output: PathBuf,
        template: String,
        reason: String,
    },

    /// Flushing or moving the finished file into place failed.
    #[error("could not write {output} for template {template}: {source}")]
    Write {
        output: PathBuf,
        template: String,
        #[source]
        source: std::io::Error,
    },
}

/// Flatten an error and its `source()` chain into one line.
pub(crate) fn chain_message(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
