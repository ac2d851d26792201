//! Constants used throughout bens.
//!
//! Centralizes default paths and PEM markers.

/// Default secret document (`bens.yml`).
pub const DOCUMENT_FILE: &str = "bens.yml";

/// Default passphrase file.
pub const PASS_FILE: &str = "pass.txt";

/// Default encrypted private key file.
pub const PRIVATE_KEY_FILE: &str = "pri.key";

/// Default public key file.
pub const PUBLIC_KEY_FILE: &str = "pub.key";

/// Optional settings file read from the working directory.
pub const SETTINGS_FILE: &str = ".bens.toml";

/// Environment variable holding the passphrase.
pub const PASS_ENV: &str = "BENS_PASS";

/// Environment variable read by the log filter.
pub const LOG_ENV: &str = "BENS_LOG";

/// Version written into newly created documents.
pub const DOCUMENT_VERSION: i64 = 1;

/// PEM type label of a PKCS#1 RSA private key.
pub const PRIVATE_KEY_TAG: &str = "RSA PRIVATE KEY";

/// PEM type label of an SPKI public key.
pub const PUBLIC_KEY_TAG: &str = "PUBLIC KEY";

/// Key size used by `bens keygen` when none is given.
pub const DEFAULT_KEY_BITS: usize = 2048;
