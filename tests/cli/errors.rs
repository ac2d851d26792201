//! Error reporting tests.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_missing_public_key() {
    let t = Test::new();

    t.cmd()
        .args(["add", "FOO", "bar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pub.key"));
}

#[test]
fn test_missing_document() {
    let t = Test::with_keys();

    t.cmd()
        .arg("environment")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bens.yml"));
}

#[test]
fn test_unencrypted_private_key() {
    let t = Test::with_entries(&[("FOO", "bar")]);
    t.copy_fixture(UNENCRYPTED_PRIVATE_KEY, "pri.key");

    t.cmd()
        .arg("environment")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("unencrypted private key"))
        .stderr(predicate::str::contains("openssl rsa -aes256"));
}

#[test]
fn test_non_rsa_public_key() {
    let t = Test::with_keys();
    t.copy_fixture(ED25519_PUBLIC_KEY, "pub.key");

    t.cmd()
        .args(["add", "FOO", "bar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be an RSA public key"));
}

#[test]
fn test_two_blocks_in_key_file() {
    let t = Test::with_keys();
    t.write(
        "pub.key",
        &format!("{}{}", read_fixture(PUBLIC_KEY), read_fixture(OTHER_PUBLIC_KEY)),
    );

    t.cmd()
        .args(["add", "FOO", "bar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 blocks"));
}

#[test]
fn test_malformed_document() {
    let t = Test::with_keys();
    t.write("bens.yml", "environment: {not: a list}\n");

    t.cmd()
        .arg("environment")
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't parse document"));
}

#[test]
fn test_unknown_formatter() {
    let t = Test::with_entries(&[("FOO", "bar")]);

    t.cmd()
        .args(["environment", "--formatter", "fish"])
        .assert()
        .failure();
}

#[test]
fn test_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bens"));
}
