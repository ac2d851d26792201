//! Value encryption.
//!
//! [`Cipher`] is the capability [`SecretDocument`](crate::core::document::SecretDocument)
//! depends on: turn one short plaintext into a printable ciphertext and back.
//! The production implementation is [`RsaOaep`]; tests substitute
//! deterministic doubles without touching key material.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait in a new file
//! 2. Re-export it from this module

use zeroize::Zeroizing;

use crate::core::types::EncryptedValue;
use crate::error::Result;

mod oaep;

pub use oaep::{max_plaintext_len, RsaOaep};

/// Single-value encryption backend.
pub trait Cipher {
    /// Encrypt `plaintext` into a printable ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError` if the backend can't encrypt at all (no public
    /// key) and `CipherError` if this plaintext can't be encrypted.
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedValue>;

    /// Decrypt a value produced by [`Cipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `PolicyError` if the backend can't decrypt at all (no private
    /// key), `FormatError` for malformed input and `CipherError` if
    /// decryption fails.
    fn decrypt(&self, encrypted: &str) -> Result<Zeroizing<String>>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

impl<C: Cipher + ?Sized> Cipher for &C {
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedValue> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, encrypted: &str) -> Result<Zeroizing<String>> {
        (**self).decrypt(encrypted)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<C: Cipher + ?Sized> Cipher for Box<C> {
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedValue> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, encrypted: &str) -> Result<Zeroizing<String>> {
        (**self).decrypt(encrypted)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
