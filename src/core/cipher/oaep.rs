//! RSA-OAEP backend (SHA-1, empty label).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::Oaep;
use sha1::{Digest, Sha1};
use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::core::keys::KeyPair;
use crate::core::types::EncryptedValue;
use crate::error::{CipherError, FormatError, Result};

/// Longest plaintext OAEP with SHA-1 can carry under a modulus of
/// `modulus_bytes`.
pub fn max_plaintext_len(modulus_bytes: usize) -> usize {
    modulus_bytes.saturating_sub(2 * <Sha1 as Digest>::output_size() + 2)
}

/// Encrypts with the public half of a [`KeyPair`] and decrypts with the
/// private half.
#[derive(Debug)]
pub struct RsaOaep {
    keys: KeyPair,
}

impl RsaOaep {
    pub fn new(keys: KeyPair) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    /// Plaintext limit for the loaded public key.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::NoPublicKey` without a public key.
    pub fn max_plaintext_len(&self) -> Result<usize> {
        Ok(max_plaintext_len(self.keys.public_key()?.size()))
    }

    fn padding() -> Oaep {
        Oaep::new::<Sha1>()
    }
}

impl Cipher for RsaOaep {
    fn name(&self) -> &'static str {
        "rsa-oaep"
    }

    fn encrypt(&self, plaintext: &str) -> Result<EncryptedValue> {
        let public = self.keys.public_key()?;
        let max = max_plaintext_len(public.size());
        if plaintext.len() > max {
            return Err(CipherError::PlaintextTooLong {
                len: plaintext.len(),
                max,
            }
            .into());
        }
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let ciphertext = public
            .encrypt(&mut OsRng, Self::padding(), plaintext.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        trace!(ciphertext_len = ciphertext.len(), "encrypted");
        Ok(STANDARD.encode(ciphertext))
    }

    fn decrypt(&self, encrypted: &str) -> Result<Zeroizing<String>> {
        let private = self.keys.private_key()?;
        let ciphertext = STANDARD
            .decode(encrypted.trim())
            .map_err(FormatError::Base64)?;
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let plaintext = Zeroizing::new(
            private
                .decrypt_blinded(&mut OsRng, Self::padding(), &ciphertext)
                .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?,
        );
        let text = std::str::from_utf8(&plaintext).map_err(|_| {
            CipherError::DecryptionFailed("plaintext is not valid UTF-8".to_string())
        })?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(Zeroizing::new(text.trim().to_string()))
    }
}
