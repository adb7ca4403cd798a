//! Template engines: [`Syntax`] selection and the parsed [`Template`].
//!
//! | Extension | Syntax                     | Engine  |
//! |-----------|----------------------------|---------|
//! | `.tmpl`   | Go text/template, `{{.x}}` | `gtmpl` |
//! | `.tera`   | Jinja-like, `{{ x }}`      | `tera`  |
//!
//! Substitution is plain text; neither engine auto-escapes HTML. This differs
//! from Go's `html/template`, which escapes `<`, `>`, `&` and quotes; call the
//! `html` builtin (Go) or the `escape` filter (Tera) explicitly when needed.
//!
//! Go templates follow `html/template` for lookups that find nothing: an
//! undefined key or a null value renders as an empty string. Variable keys
//! are also reachable in lower case (`Editor: vim` answers `{{.editor}}`).
//! Tera stays strict and fails on undefined variables.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use ricer_core::{Value, Variables};

use crate::error::{chain_message, RenderError};
use crate::locator::template_name;

// ---------------------------------------------------------------------------
// Syntax
// ---------------------------------------------------------------------------

/// Template syntaxes, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    Go,
    Tera,
}

impl Syntax {
    /// All syntaxes in a stable order.
    pub fn all() -> &'static [Syntax] {
        &[Syntax::Go, Syntax::Tera]
    }

    /// File extension (without the dot) that selects this syntax.
    pub fn extension(&self) -> &'static str {
        match self {
            Syntax::Go => "tmpl",
            Syntax::Tera => "tera",
        }
    }

    /// Syntax for a template path, if its extension is recognised.
    pub fn from_path(path: &Path) -> Option<Syntax> {
        let ext = path.extension()?.to_str()?;
        Syntax::all().iter().copied().find(|s| s.extension() == ext)
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// What `gtmpl` prints for a lookup that found nothing.
const GO_NO_VALUE: &str = "<no value>";

/// Failure raised by an engine while executing a parsed template.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

enum Compiled {
    Go(gtmpl::Template),
    Tera(Box<tera::Tera>),
}

/// A parsed template, ready to execute against any number of variable sets.
pub struct Template {
    name: String,
    path: PathBuf,
    compiled: Compiled,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("syntax", &self.syntax())
            .finish()
    }
}

impl Template {
    /// Read and parse the template at `path`.
    pub fn load(path: &Path) -> Result<Template, RenderError> {
        let syntax = Syntax::from_path(path).ok_or_else(|| RenderError::Parse {
            path: path.to_path_buf(),
            reason: "unrecognised template extension".to_string(),
        })?;
        let text = std::fs::read_to_string(path).map_err(|e| RenderError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Template::parse(path, syntax, &text)
    }

    /// Parse `text` as a template of the given syntax. `path` names it in errors.
    pub fn parse(path: &Path, syntax: Syntax, text: &str) -> Result<Template, RenderError> {
        let name = template_name(path);
        let parse_err = |reason: String| RenderError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        let compiled = match syntax {
            Syntax::Go => {
                let mut tmpl = gtmpl::Template::default();
                tmpl.parse(text).map_err(|e| parse_err(e.to_string()))?;
                Compiled::Go(tmpl)
            }
            Syntax::Tera => {
                let mut tera = tera::Tera::default();
                tera.autoescape_on(vec![]);
                tera.add_raw_template(&name, text)
                    .map_err(|e| parse_err(chain_message(&e)))?;
                Compiled::Tera(Box::new(tera))
            }
        };

        Ok(Template {
            name,
            path: path.to_path_buf(),
            compiled,
        })
    }

    /// Template name: the file name without its extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn syntax(&self) -> Syntax {
        match self.compiled {
            Compiled::Go(_) => Syntax::Go,
            Compiled::Tera(_) => Syntax::Tera,
        }
    }

    /// Execute against `vars`, streaming the output into `out`.
    pub fn execute<W: Write>(&self, vars: &Variables, out: &mut W) -> Result<(), EngineError> {
        match &self.compiled {
            Compiled::Go(tmpl) => {
                let context = gtmpl::Context::from(go_map(vars));
                let mut buf = Vec::new();
                tmpl.execute(&mut buf, &context)
                    .map_err(|e| EngineError(e.to_string()))?;
                let text = String::from_utf8_lossy(&buf).replace(GO_NO_VALUE, "");
                out.write_all(text.as_bytes())
                    .map_err(|e| EngineError(e.to_string()))
            }
            Compiled::Tera(tera) => {
                let context = tera::Context::from_serialize(vars)
                    .map_err(|e| EngineError(chain_message(&e)))?;
                tera.render_to(&self.name, &context, out)
                    .map_err(|e| EngineError(chain_message(&e)))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Value conversion for gtmpl
// ---------------------------------------------------------------------------

fn go_map(vars: &Variables) -> gtmpl::Value {
    let mut map: HashMap<String, gtmpl::Value> = vars
        .iter()
        .map(|(k, v)| (k.clone(), go_value(v)))
        .collect();
    for (k, v) in vars {
        let lower = k.to_lowercase();
        if !map.contains_key(&lower) {
            map.insert(lower, go_value(v));
        }
    }
    gtmpl::Value::Map(map)
}

fn go_value(value: &Value) -> gtmpl::Value {
    match value {
        Value::Null => gtmpl::Value::String(String::new()),
        Value::Bool(b) => gtmpl::Value::Bool(*b),
        Value::Integer(i) => gtmpl::Value::from(*i),
        Value::Float(x) => gtmpl::Value::from(*x),
        Value::String(s) => gtmpl::Value::String(s.clone()),
        Value::List(items) => gtmpl::Value::Array(items.iter().map(go_value).collect()),
        Value::Map(map) => go_map(map),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
