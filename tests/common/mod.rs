//! Common test utilities for Folio integration tests.
//!
//! This module provides:
//! - `Project`: a temp directory with a site fixture, blueprints and config
//! - `folio()`: the binary, isolated from the caller's `FOLIO_*` environment
//! - `run()`: `folio()` with arguments, run to completion
//! - Fixtures: reusable YAML content constants

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub use fixtures::*;

pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Site fixture, blueprint directory and an empty `folio.toml`.
    pub fn new() -> Self {
        let project = Self::empty();
        project.write("site.yml", SITE_FIXTURE);
        project.write("folio.toml", "");
        project.write("blueprints/site.yml", SITE_BLUEPRINT);
        project.write("blueprints/pages/article.yml", ARTICLE_BLUEPRINT);
        project.write("blueprints/files/image.yml", IMAGE_BLUEPRINT);
        project
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Binary running inside the project with its own `folio.toml`.
    pub fn folio(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
        cmd.current_dir(self.root());
        for var in [
            "FOLIO_LOCALE",
            "FOLIO_PANEL_URL",
            "FOLIO_DRAG_TEXT",
            "FOLIO_VERBOSITY",
            "FOLIO_PRETTY",
            "FOLIO_LOG",
        ] {
            cmd.env_remove(var);
        }
        if self.path("folio.toml").exists() {
            cmd.arg("--config").arg(self.path("folio.toml"));
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.folio().args(args).output().unwrap()
    }
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Exit status is success, or fail with the captured stderr.
pub fn assert_success(output: &Output) {
    assert!(output.status.success(), "stderr: {}", stderr(output));
}
