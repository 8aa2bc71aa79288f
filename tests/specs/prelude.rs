//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

pub use predicates::prelude::*;

pub const WEBHOOK: &str = "http://127.0.0.1:9/hook";

/// Path to the `lull` binary, building it when the test run did not
pub fn lull_bin() -> PathBuf {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        let path = assert_cmd::cargo::cargo_bin("lull");
        if !path.exists() {
            let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
            let status = std::process::Command::new(cargo)
                .args(["build", "--quiet", "-p", "lull", "--bin", "lull"])
                .status()
                .unwrap();
            assert!(status.success(), "failed to build lull");
        }
        path
    })
    .clone()
}

/// A scratch directory with a `watched/` folder inside
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("watched")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn watched(&self) -> PathBuf {
        self.dir.path().join("watched")
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// `lull` with no `LULL_*` variables leaking in from the environment
    pub fn lull(&self) -> CliBuilder {
        let mut cmd = Command::new(lull_bin());
        cmd.current_dir(self.path());
        for (key, _) in std::env::vars() {
            if key.starts_with("LULL_") {
                cmd.env_remove(key);
            }
        }
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().failure())
    }
}

pub struct RunAssert(assert_cmd::assert::Assert);

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self(self.0.stdout(predicate::str::contains(expected)))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self(self.0.stderr(predicate::str::contains(expected)))
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).to_string()
    }
}
