//! Tests for `bens keygen`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_keygen_then_roundtrip() {
    let t = Test::new();
    t.write("pass.txt", "generated passphrase\n");

    let output = t.keygen(&[]);
    assert_success(&output);
    assert!(t.read("pri.key").contains("Proc-Type: 4,ENCRYPTED"));
    assert!(t.read("pri.key").contains("DEK-Info: AES-256-CBC,"));
    assert!(t.read("pub.key").starts_with("-----BEGIN PUBLIC KEY-----"));

    assert_success(&t.add("FOO", "bar"));
    assert_environment(&t, &[("FOO", "bar")]);
}

#[test]
fn test_keygen_uses_environment_passphrase() {
    let t = Test::new();

    t.cmd()
        .env("BENS_PASS", "from-env")
        .args(["keygen", "--bits", "1024"])
        .assert()
        .success();

    assert_success(&t.add("FOO", "bar"));
    t.cmd()
        .env("BENS_PASS", "from-env")
        .arg("environment")
        .assert()
        .success()
        .stdout("export FOO=\"bar\"\n");
}

#[test]
fn test_keygen_refuses_overwrite() {
    let t = Test::with_keys();
    let before = t.read("pri.key");

    t.cmd()
        .args(["keygen", "--bits", "1024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));
    assert_eq!(t.read("pri.key"), before);

    assert_success(&t.keygen(&["--force"]));
    assert_ne!(t.read("pri.key"), before);
}

#[test]
fn test_keygen_rejects_bad_sizes() {
    let t = Test::new();
    t.write("pass.txt", "x\n");

    for bits in ["512", "1025", "32768"] {
        t.cmd()
            .args(["keygen", "--bits", bits])
            .assert()
            .failure();
    }
    assert!(!t.exists("pri.key"));
}
