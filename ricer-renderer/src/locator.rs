//! Template discovery.

use std::path::{Path, PathBuf};

use crate::engine::Syntax;

/// Template files directly inside `dir`, sorted by path.
///
/// Only regular files (or links to them) with a recognised extension are
/// returned; subdirectories are not descended into. An unreadable or missing
/// directory yields an empty list.
pub fn locate_templates(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("cannot list {}: {e}", dir.display());
            return vec![];
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| Syntax::from_path(p).is_some() && p.is_file())
        .collect();
    files.sort();
    tracing::debug!("found {} template(s) in {}", files.len(), dir.display());
    files
}

/// File name with directory and extension stripped: `/t/shell.tmpl` → `shell`.
pub fn template_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_only_template_extensions_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["zsh.tmpl", "alacritty.tera", "notes.txt", "bash.tmpl", "README"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let found: Vec<String> = locate_templates(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(found, ["alacritty.tera", "bash.tmpl", "zsh.tmpl"]);
    }

    #[test]
    fn does_not_recurse_or_match_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("inner.tmpl"), "x").unwrap();
        fs::create_dir_all(dir.path().join("looks_like.tmpl")).unwrap();

        assert!(locate_templates(dir.path()).is_empty());
    }

    #[test]
    fn missing_directory_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        assert!(locate_templates(&dir.path().join("absent")).is_empty());
    }

    #[test]
    fn name_strips_directory_and_extension() {
        assert_eq!(template_name(Path::new("/t/shell.tmpl")), "shell");
        assert_eq!(template_name(Path::new("git.config.tmpl")), "git.config");
        assert_eq!(template_name(Path::new("kitty.tera")), "kitty");
    }
}
