//! Output writer.
//!
//! ## `write_output` protocol
//!
//! 1. Create the destination's missing parent directories.
//! 2. Follow a symlinked destination to its target, so the link survives.
//!    An existing destination that is a directory or read-only is refused.
//! 3. Create `<dest>.ricer.tmp` next to the destination.
//! 4. Stream template execution into it; the handle is closed at end of scope.
//! 5. On execution failure remove the `.tmp` and leave the destination alone.
//! 6. Carry over an existing destination's permissions, then rename into place.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::engine::Template;
use crate::error::RenderError;
use crate::job::RenderJob;

/// Suffix appended to the destination path for the in-progress file.
pub const TMP_SUFFIX: &str = ".ricer.tmp";

/// `<path>.ricer.tmp`. Pure, no I/O.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(TMP_SUFFIX);
    PathBuf::from(s)
}

/// Execute `template` with the job's variables and write the result to the
/// job's output path. Returns the path actually written.
pub fn write_output(job: &RenderJob, template: &Template) -> Result<PathBuf, RenderError> {
    if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::DirectoryCreate {
            output: job.output.clone(),
            template: job.name.clone(),
            source,
        })?;
    }

    let target = follow_symlink(&job.output);
    let existing = fs::metadata(&target).ok();
    if let Some(meta) = &existing {
        let refusal = if meta.is_dir() {
            Some(io::Error::other("destination is a directory"))
        } else if meta.permissions().readonly() {
            Some(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "destination is read-only",
            ))
        } else {
            None
        };
        if let Some(source) = refusal {
            return Err(RenderError::FileCreate {
                output: job.output.clone(),
                template: job.name.clone(),
                source,
            });
        }
    }
    let tmp = tmp_path(&target);

    let streamed = {
        let file = File::create(&tmp).map_err(|source| RenderError::FileCreate {
            output: job.output.clone(),
            template: job.name.clone(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        let executed = match template.execute(&job.vars, &mut out) {
            Ok(()) => out.flush().map_err(|source| RenderError::Write {
                output: job.output.clone(),
                template: job.name.clone(),
                source,
            }),
            Err(e) => Err(RenderError::Execute {
                output: job.output.clone(),
                template: job.name.clone(),
                reason: e.to_string(),
            }),
        };
        executed
    };
    if let Err(e) = streamed {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    if let Some(meta) = existing {
        if let Err(e) = fs::set_permissions(&tmp, meta.permissions()) {
            tracing::warn!("could not copy permissions onto {}: {e}", tmp.display());
        }
    }

    if let Err(source) = fs::rename(&tmp, &target) {
        let _ = fs::remove_file(&tmp);
        return Err(RenderError::Write {
            output: job.output.clone(),
            template: job.name.clone(),
            source,
        });
    }

    tracing::debug!("wrote: {}", target.display());
    Ok(target)
}

fn follow_symlink(path: &Path) -> PathBuf {
    let is_link = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return path.to_path_buf();
    }
    // A dangling link is replaced like any other file.
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
