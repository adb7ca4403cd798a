//! End-to-end runs of the `ricer` binary with `$XDG_CONFIG_HOME` sandboxed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

struct Home {
    xdg: TempDir,
    out: TempDir,
}

impl Home {
    fn new() -> Self {
        Self {
            xdg: TempDir::new().expect("xdg"),
            out: TempDir::new().expect("out"),
        }
    }

    fn root(&self) -> PathBuf {
        self.xdg.path().join("ricer")
    }

    fn config(&self, yaml: &str) {
        fs::create_dir_all(self.root()).expect("root");
        let yaml = yaml.replace("$OUT", &self.out.path().display().to_string());
        fs::write(self.root().join("config.yaml"), yaml).expect("config");
    }

    fn template(&self, file: &str, text: &str) {
        let dir = self.root().join("templates");
        fs::create_dir_all(&dir).expect("templates");
        fs::write(dir.join(file), text).expect("template");
    }

    fn out(&self, rel: &str) -> PathBuf {
        self.out.path().join(rel)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ricer"));
        cmd.env("XDG_CONFIG_HOME", self.xdg.path())
            .env("HOME", self.xdg.path())
            .env_remove("RICER_LOG");
        cmd
    }
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).map(|mut d| d.next().is_none()).unwrap_or(true)
}

#[test]
fn renders_shell_template() {
    let home = Home::new();
    home.config("shell:\n  vars:\n    editor: vim\n  output: $OUT/out/shellrc\n");
    home.template("shell.tmpl", "export EDITOR={{.editor}}");

    home.cmd()
        .assert()
        .success()
        .stdout(contains("shellrc").and(contains("shell")));

    assert_eq!(
        fs::read_to_string(home.out("out/shellrc")).unwrap(),
        "export EDITOR=vim"
    );
}

#[test]
fn failing_template_is_reported_and_exit_stays_zero() {
    let home = Home::new();
    home.config("a:\n  output: $OUT/a.conf\nb:\n  vars:\n    x: 1\n");
    home.template("a.tmpl", "alpha");
    home.template("b.tmpl", "beta {{.x}}");

    home.cmd()
        .assert()
        .success()
        .stderr(contains("output for template b"));

    assert_eq!(fs::read_to_string(home.out("a.conf")).unwrap(), "alpha");
}

#[test]
fn missing_templates_dir_prints_guidance() {
    let home = Home::new();
    home.config("a:\n  output: $OUT/a.conf\n");

    let expected = home.root().join("templates");
    home.cmd()
        .assert()
        .success()
        .stdout(contains("please create").and(contains(expected.display().to_string())));

    assert!(is_empty_dir(home.out.path()));
    assert!(!expected.exists());
}

#[test]
fn missing_config_is_fatal() {
    let home = Home::new();
    home.template("a.tmpl", "alpha");

    home.cmd()
        .assert()
        .failure()
        .stderr(contains("no config file found"));
}

#[test]
fn explicit_config_flag_overrides_discovery() {
    let home = Home::new();
    home.config("a:\n  output: $OUT/discovered\n");
    home.template("a.tmpl", "alpha");

    let explicit = home.xdg.path().join("elsewhere.toml");
    fs::write(
        &explicit,
        format!("[a]\noutput = \"{}\"\n", home.out("explicit").display()),
    )
    .unwrap();

    home.cmd().arg("-c").arg(&explicit).assert().success();

    assert!(home.out("explicit").exists());
    assert!(!home.out("discovered").exists());
}

#[test]
fn no_templates_is_silent_success() {
    let home = Home::new();
    home.config("{}\n");
    fs::create_dir_all(home.root().join("templates")).unwrap();

    home.cmd().assert().success().stdout(predicate::str::is_empty());
}
