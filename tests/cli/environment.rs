//! Tests for `bens environment`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_shell_output() {
    let t = Test::with_entries(&[("FOO", "bar"), ("BAZ", "qux")]);
    assert_environment(&t, &[("FOO", "bar"), ("BAZ", "qux")]);
}

#[test]
fn test_formatters() {
    let t = Test::with_entries(&[("FOO", "bar")]);

    let output = t.environment(&["--formatter", "powershell"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "$env:FOO = \"bar\"\n");

    let output = t.environment(&["--formatter", "cmd"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "set \"FOO=bar\"\n");

    let output = t.environment(&["--formatter", "json"]);
    assert_success(&output);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed[0]["name"], "FOO");
    assert_eq!(parsed[0]["value"], "bar");
}

#[test]
fn test_known_ciphertext() {
    let t = Test::with_keys();
    t.write(
        "bens.yml",
        &format!(
            "version: 1\nenvironment:\n- name: FOO\n  encryptedValue: {}\n",
            read_fixture(FOOBAR_CIPHERTEXT).trim()
        ),
    );

    assert_environment(&t, &[("FOO", "foobar")]);
}

#[test]
fn test_passphrase_from_environment() {
    let t = Test::with_entries(&[("FOO", "bar")]);
    let pass = read_fixture(PASS_FILE);
    std::fs::remove_file(t.path("pass.txt")).unwrap();

    t.cmd()
        .env("BENS_PASS", pass.trim())
        .arg("environment")
        .assert()
        .success()
        .stdout("export FOO=\"bar\"\n");
}

#[test]
fn test_empty_environment_variable_falls_back_to_file() {
    let t = Test::with_entries(&[("FOO", "bar")]);

    t.cmd()
        .env("BENS_PASS", "")
        .arg("environment")
        .assert()
        .success()
        .stdout("export FOO=\"bar\"\n");
}

#[test]
fn test_custom_paths() {
    let t = Test::new();
    std::fs::create_dir(t.path("keys")).unwrap();
    t.copy_fixture(OTHER_PRIVATE_KEY, "keys/deploy.key");
    t.copy_fixture(OTHER_PUBLIC_KEY, "keys/deploy.pub");
    t.write("secret-pass", "other-passphrase\n");

    let paths = [
        "-c",
        "prod.yml",
        "-p",
        "secret-pass",
        "--private-key-file",
        "keys/deploy.key",
        "--public-key-file",
        "keys/deploy.pub",
    ];

    t.cmd()
        .args(paths)
        .args(["add", "TOKEN", "abc123"])
        .assert()
        .success();
    assert!(t.exists("prod.yml"));

    t.cmd()
        .args(paths)
        .arg("environment")
        .assert()
        .success()
        .stdout("export TOKEN=\"abc123\"\n");
}

#[test]
fn test_wrong_passphrase() {
    let t = Test::with_entries(&[("FOO", "bar")]);
    t.write("pass.txt", "wrong\n");

    t.cmd()
        .arg("environment")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("pri.key"))
        .stderr(predicate::str::contains("private key"));
}

#[test]
fn test_corrupted_entry_prints_nothing() {
    let t = Test::with_entries(&[("GOOD", "fine")]);
    let yaml = t.read("bens.yml");
    t.write(
        "bens.yml",
        &format!("{}- name: BROKEN\n  encryptedValue: AAAA\n", yaml),
    );

    t.cmd()
        .arg("environment")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("couldn't decrypt BROKEN"));
}
