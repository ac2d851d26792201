//! Tests for the `.bens.toml` settings file.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_settings_file_paths() {
    let t = Test::new();
    std::fs::create_dir(t.path("secrets")).unwrap();
    t.copy_fixture(PRIVATE_KEY, "secrets/pri.pem");
    t.copy_fixture(PUBLIC_KEY, "secrets/pub.pem");
    t.copy_fixture(PASS_FILE, "secrets/pass");
    t.write(
        ".bens.toml",
        "config-file = \"env.yml\"\npass-file = \"secrets/pass\"\nprivate-key-file = \"secrets/pri.pem\"\npublic-key-file = \"secrets/pub.pem\"\n",
    );

    assert_success(&t.add("FOO", "bar"));
    assert!(t.exists("env.yml"));
    assert_environment(&t, &[("FOO", "bar")]);
}

#[test]
fn test_flags_override_settings_file() {
    let t = Test::with_keys();
    t.write(".bens.toml", "config-file = \"from-settings.yml\"\n");

    t.cmd()
        .args(["-c", "from-flag.yml", "add", "FOO", "bar"])
        .assert()
        .success();

    assert!(t.exists("from-flag.yml"));
    assert!(!t.exists("from-settings.yml"));
}

#[test]
fn test_explicit_settings_path() {
    let t = Test::with_keys();
    t.write("custom.toml", "config-file = \"custom.yml\"\n");

    t.cmd()
        .args(["--settings", "custom.toml", "add", "FOO", "bar"])
        .assert()
        .success();
    assert!(t.exists("custom.yml"));
}

#[test]
fn test_malformed_settings() {
    let t = Test::with_keys();
    t.write(".bens.toml", "config-file = [\n");

    t.cmd()
        .args(["add", "FOO", "bar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't parse settings"));
}
