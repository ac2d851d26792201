//! Test fixtures and constants.

use std::path::PathBuf;

/// `AES-128-CBC` encrypted 2048-bit private key.
pub const PRIVATE_KEY: &str = "private.pem";

/// Public half of [`PRIVATE_KEY`].
pub const PUBLIC_KEY: &str = "public.pem";

/// Passphrase of [`PRIVATE_KEY`], with a trailing newline.
pub const PASS_FILE: &str = "pass.txt";

/// [`PRIVATE_KEY`] without encryption.
pub const UNENCRYPTED_PRIVATE_KEY: &str = "private_unencrypted.pem";

/// `DES-EDE3-CBC` encrypted 2048-bit private key.
pub const OTHER_PRIVATE_KEY: &str = "other_private.pem";

/// Public half of [`OTHER_PRIVATE_KEY`].
pub const OTHER_PUBLIC_KEY: &str = "other_public.pem";

/// Passphrase of [`OTHER_PRIVATE_KEY`].
pub const OTHER_PASSPHRASE: &[u8] = b"other-passphrase";

/// An Ed25519 SPKI public key.
pub const ED25519_PUBLIC_KEY: &str = "ed25519_public.pem";

/// Ciphertext of `foobar` under [`PUBLIC_KEY`].
pub const FOOBAR_CIPHERTEXT: &str = "foobar.b64";

/// Standard entries used across multiple tests.
pub const STANDARD_ENTRIES: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/mydb"),
    ("API_KEY", "sk-test-12345"),
    ("JWT_SECRET", "super-secret-jwt-token"),
];

/// Absolute path of a fixture file.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a fixture file.
pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("failed to read fixture")
}
