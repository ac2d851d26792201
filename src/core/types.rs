//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An entry name (e.g., DATABASE_URL, API_KEY).
///
/// Rendered as an environment variable name by the formatters.
pub type EntryName = String;

/// Base64 encoding of an RSA-OAEP ciphertext.
///
/// Decodes to exactly as many bytes as the key modulus.
pub type EncryptedValue = String;

/// Document version number; carried through load and save untouched.
pub type Version = i64;
