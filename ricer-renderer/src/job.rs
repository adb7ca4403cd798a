//! Render jobs: resolving one template's configuration and writing it out.
//!
//! For a template named `<name>` the configuration provides:
//!
//! | Key             | Required | Meaning                                  |
//! |-----------------|----------|------------------------------------------|
//! | `<name>.vars`   | no       | mapping passed verbatim to the template  |
//! | `<name>.output` | yes      | destination path (absolute or relative)  |

use std::path::{Path, PathBuf};

use ricer_core::{ConfigStore, Variables};

use crate::engine::Template;
use crate::error::RenderError;
use crate::writer;

/// One template resolved against the configuration, ready to write.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub name: String,
    pub source: PathBuf,
    pub vars: Variables,
    pub output: PathBuf,
}

impl RenderJob {
    /// Resolve `<name>.vars` and `<name>.output` from `store`.
    ///
    /// Missing vars are an empty mapping; a missing or empty output is
    /// [`RenderError::MissingOutput`].
    pub fn resolve(name: &str, source: &Path, store: &ConfigStore) -> Result<RenderJob, RenderError> {
        let vars = store
            .get_map(&format!("{name}.vars"))
            .cloned()
            .unwrap_or_default();

        let output = store
            .get_string(&format!("{name}.output"))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RenderError::MissingOutput {
                template: name.to_string(),
            })?;

        Ok(RenderJob {
            name: name.to_string(),
            source: source.to_path_buf(),
            vars,
            output: PathBuf::from(output),
        })
    }
}

/// A successfully written template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub name: String,
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Parse, resolve and write the template at `source`.
pub fn render_template(source: &Path, store: &ConfigStore) -> Result<Rendered, RenderError> {
    let template = Template::load(source)?;
    let job = RenderJob::resolve(template.name(), source, store)?;
    writer::write_output(&job, &template)?;
    tracing::debug!("rendered {} -> {}", job.name, job.output.display());

    Ok(Rendered {
        name: job.name,
        source: job.source,
        output: job.output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ricer_core::Value;

    fn store_with(name: &str, output: Option<&str>, vars: Option<Variables>) -> ConfigStore {
        let mut section = Variables::new();
        if let Some(o) = output {
            section.insert("output".into(), Value::from(o));
        }
        if let Some(v) = vars {
            section.insert("vars".into(), Value::Map(v));
        }
        let mut root = Variables::new();
        root.insert(name.into(), Value::Map(section));
        ConfigStore::from_map(root)
    }

    #[test]
    fn resolves_vars_and_output() {
        let mut vars = Variables::new();
        vars.insert("editor".into(), Value::from("vim"));
        let store = store_with("shell", Some("/tmp/out/shellrc"), Some(vars.clone()));

        let job = RenderJob::resolve("shell", Path::new("/t/shell.tmpl"), &store).unwrap();
        assert_eq!(job.output, PathBuf::from("/tmp/out/shellrc"));
        assert_eq!(job.vars, vars);
        assert_eq!(job.source, PathBuf::from("/t/shell.tmpl"));
    }

    #[test]
    fn absent_vars_is_empty_mapping() {
        let store = store_with("shell", Some("/tmp/x"), None);
        let job = RenderJob::resolve("shell", Path::new("/t/shell.tmpl"), &store).unwrap();
        assert!(job.vars.is_empty());
    }

    #[test]
    fn missing_or_empty_output_is_error_naming_template() {
        for output in [None, Some("")] {
            let store = store_with("polybar", output, None);
            let err = RenderJob::resolve("polybar", Path::new("/t/polybar.tmpl"), &store)
                .unwrap_err();
            assert!(matches!(err, RenderError::MissingOutput { .. }), "got: {err}");
            assert!(err.to_string().contains("polybar"));
        }
    }

    #[test]
    fn unconfigured_template_is_missing_output() {
        let store = ConfigStore::default();
        let err = RenderJob::resolve("ghost", Path::new("/t/ghost.tmpl"), &store).unwrap_err();
        assert!(matches!(err, RenderError::MissingOutput { .. }));
    }
}
