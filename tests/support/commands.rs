//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a bens command running inside the project directory.
    ///
    /// Variables that would change behavior from the outside environment
    /// are cleared, and colors are disabled so output is stable.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("bens").expect("failed to find bens binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("BENS_PASS");
        cmd.env_remove("BENS_LOG");
        cmd.env_remove("BENS_SETTINGS");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `bens add NAME VALUE`.
    pub fn add(&self, name: &str, value: &str) -> Output {
        self.cmd()
            .args(["add", name, value])
            .output()
            .expect("failed to run bens add")
    }

    /// Shortcut for `bens environment` with extra arguments.
    pub fn environment(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("environment")
            .args(args)
            .output()
            .expect("failed to run bens environment")
    }

    /// Shortcut for `bens keygen --bits 1024` with extra arguments.
    pub fn keygen(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(["keygen", "--bits", "1024"])
            .args(args)
            .output()
            .expect("failed to run bens keygen")
    }
}
