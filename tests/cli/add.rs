//! Tests for `bens add`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_add_creates_document() {
    let t = Test::with_keys();
    assert!(!t.exists("bens.yml"));

    let output = t.add("FOO", "bar");
    assert_success(&output);
    assert_stderr_contains(&output, "added FOO");

    let yaml = t.read("bens.yml");
    assert!(yaml.contains("version: 1"));
    assert!(yaml.contains("name: FOO"));
    assert!(yaml.contains("encryptedValue:"));
    assert!(!yaml.contains("bar"));
}

#[test]
fn test_add_needs_only_the_public_key() {
    let t = Test::new();
    t.copy_fixture(PUBLIC_KEY, "pub.key");

    assert_success(&t.add("FOO", "bar"));
    assert!(t.exists("bens.yml"));
}

#[test]
fn test_add_from_stdin() {
    let t = Test::with_keys();

    t.cmd()
        .args(["add", "PIPED"])
        .write_stdin("from a pipe\n")
        .assert()
        .success();

    assert_environment(&t, &[("PIPED", "from a pipe")]);
}

#[test]
fn test_add_appends_in_order() {
    let t = Test::with_entries(STANDARD_ENTRIES);
    assert_success(&t.add("BAR", "bar"));

    let mut expected = STANDARD_ENTRIES.to_vec();
    expected.push(("BAR", "bar"));
    assert_environment(&t, &expected);
}

#[test]
fn test_add_duplicate_fails() {
    let t = Test::with_entries(&[("FOO", "bar")]);
    let before = t.read("bens.yml");

    t.cmd()
        .args(["add", "FOO", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FOO already exists"));

    assert_eq!(t.read("bens.yml"), before);
}

#[test]
fn test_add_invalid_name_fails() {
    let t = Test::with_keys();

    for name in ["1ABC", "MY-VAR", "A B"] {
        assert_failure(&t.add(name, "x"));
    }
    assert!(!t.exists("bens.yml"));
}

#[test]
fn test_add_value_too_long() {
    let t = Test::with_keys();

    t.cmd()
        .args(["add", "BIG", &"x".repeat(215)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 214"));
}

#[test]
fn test_add_to_empty_document() {
    let t = Test::with_keys();
    t.write("bens.yml", "");

    assert_success(&t.add("FOO", "bar"));
    assert!(t.read("bens.yml").starts_with("version: 0\n"));
    assert_environment(&t, &[("FOO", "bar")]);
}
