//! Test support utilities for bens integration tests.
//!
//! Provides isolated project directories, fixture keys and command helpers.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated project directory.
///
/// Child processes run with `.current_dir()` set to the project, so the
/// default file names (`bens.yml`, `pri.key`, ...) resolve inside it and
/// tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty project.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Project with the fixture key pair and pass file under the default names.
    pub fn with_keys() -> Self {
        let t = Self::new();
        t.copy_fixture(PRIVATE_KEY, "pri.key");
        t.copy_fixture(PUBLIC_KEY, "pub.key");
        t.copy_fixture(PASS_FILE, "pass.txt");
        t
    }

    /// Project with keys and the given entries added through the CLI.
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let t = Self::with_keys();
        for (name, value) in entries {
            let output = t.add(name, value);
            assert!(
                output.status.success(),
                "Failed to add {}: {}",
                name,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Absolute path of a file inside the project.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.path(name), contents).expect("failed to write project file");
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("failed to read project file")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    pub fn copy_fixture(&self, fixture_name: &str, name: &str) {
        fs::copy(fixture(fixture_name), self.path(name)).expect("failed to copy fixture");
    }
}
