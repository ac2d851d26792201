//! RSA key material.
//!
//! [`KeyLoader`] turns PEM files and a passphrase into a [`KeyPair`]. Every
//! sensitive intermediate (the passphrase, the encrypted payload, the
//! decrypted DER) lives in a [`SecureBuffer`] or `Zeroizing` wrapper, so it
//! is wiped before the loader returns on both success and failure.
//!
//! Only passphrase-encrypted private keys are accepted; an unencrypted
//! `RSA PRIVATE KEY` block is refused outright.

use std::fmt;
use std::path::Path;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::SubjectPublicKeyInfoRef;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

use crate::core::constants::{PRIVATE_KEY_TAG, PUBLIC_KEY_TAG};
use crate::core::memory::{default_backend, LockPolicy, PageLock, SecureBuffer};
use crate::core::passphrase::PassphraseSource;
use crate::error::{CipherError, FormatError, PolicyError, Result};

mod block;
mod generate;
pub mod legacy;

pub use block::{decode_single_block, decode_single_block_from, PemBlock};
pub use generate::{generate, GeneratedKeys};

/// An optional public key (for encryption) and an optional private key
/// (for decryption).
#[derive(Default)]
pub struct KeyPair {
    private: Option<RsaPrivateKey>,
    public: Option<RsaPublicKey>,
}

impl KeyPair {
    pub fn new(private: Option<RsaPrivateKey>, public: Option<RsaPublicKey>) -> Self {
        Self { private, public }
    }

    /// A pair that can only encrypt.
    pub fn public_only(public: RsaPublicKey) -> Self {
        Self::new(None, Some(public))
    }

    /// A pair that can only decrypt.
    pub fn private_only(private: RsaPrivateKey) -> Self {
        Self::new(Some(private), None)
    }

    /// The private half.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::NoPrivateKey` if it wasn't loaded.
    pub fn private_key(&self) -> Result<&RsaPrivateKey> {
        self.private
            .as_ref()
            .ok_or_else(|| PolicyError::NoPrivateKey.into())
    }

    /// The public half.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::NoPublicKey` if it wasn't loaded.
    pub fn public_key(&self) -> Result<&RsaPublicKey> {
        self.public
            .as_ref()
            .ok_or_else(|| PolicyError::NoPublicKey.into())
    }

    pub fn has_private(&self) -> bool {
        self.private.is_some()
    }

    pub fn has_public(&self) -> bool {
        self.public.is_some()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &self.private.as_ref().map(|_| "[REDACTED]"))
            .field("public_bits", &self.public.as_ref().map(|k| k.size() * 8))
            .finish()
    }
}

/// Loads and validates key files.
#[derive(Clone, Copy)]
pub struct KeyLoader {
    policy: LockPolicy,
    backend: &'static dyn PageLock,
}

impl KeyLoader {
    /// Loader locking sensitive buffers with the platform backend.
    pub fn new(policy: LockPolicy) -> Self {
        Self::with_backend(policy, default_backend())
    }

    /// Loader locking sensitive buffers with `backend`.
    pub fn with_backend(policy: LockPolicy, backend: &'static dyn PageLock) -> Self {
        Self { policy, backend }
    }

    fn secure(&self, bytes: Vec<u8>) -> Result<SecureBuffer> {
        SecureBuffer::acquire_with(bytes, self.policy, self.backend)
    }

    /// Load both halves, taking the passphrase from `source`.
    ///
    /// The passphrase is moved into a [`SecureBuffer`] as soon as it is
    /// received and wiped before this returns. An empty passphrase is not an
    /// error by itself; decryption failure is the signal.
    ///
    /// # Errors
    ///
    /// Propagates failures from the source, [`KeyLoader::decrypt_private_key`]
    /// and [`KeyLoader::load_public_key`].
    pub fn build_key_pair(
        &self,
        source: &dyn PassphraseSource,
        private_path: &Path,
        public_path: &Path,
    ) -> Result<KeyPair> {
        let passphrase = {
            let mut received = source.bytes()?;
            self.secure(std::mem::take(&mut *received))?
        };
        debug!(
            source = source.name(),
            empty = passphrase.is_empty(),
            lock = ?passphrase.lock_status(),
            "passphrase received"
        );

        let private = self.decrypt_private_key(private_path, passphrase.as_bytes())?;
        passphrase.release();

        let public = self.load_public_key(public_path)?;

        Ok(KeyPair::new(Some(private), Some(public)))
    }

    /// Load only the public half; enough to encrypt new values.
    pub fn load_public_pair(&self, public_path: &Path) -> Result<KeyPair> {
        Ok(KeyPair::public_only(self.load_public_key(public_path)?))
    }

    /// Decrypt a passphrase-protected PKCS#1 private key.
    ///
    /// # Errors
    ///
    /// - `FormatError` for zero/multiple blocks, a non-private-key block or a
    ///   malformed `DEK-Info` header
    /// - `PolicyError::UnencryptedPrivateKey` if the block isn't encrypted
    /// - `CipherError` for a wrong passphrase or unparseable DER
    pub fn decrypt_private_key(&self, path: &Path, passphrase: &[u8]) -> Result<RsaPrivateKey> {
        let block = decode_single_block(path)?;
        if block.tag() != PRIVATE_KEY_TAG {
            return Err(FormatError::UnexpectedBlockType {
                path: path.to_path_buf(),
                expected: PRIVATE_KEY_TAG,
                found: block.tag().to_string(),
            }
            .into());
        }

        if !block.is_encrypted() {
            return Err(PolicyError::UnencryptedPrivateKey {
                path: path.to_path_buf(),
            }
            .into());
        }

        let dek = match block.dek_info() {
            Some(value) => legacy::DekInfo::parse(path, value)?,
            None => {
                return Err(FormatError::InvalidDekInfo {
                    path: path.to_path_buf(),
                    reason: "missing".to_string(),
                }
                .into())
            }
        };
        debug!(path = %path.display(), cipher = dek.cipher.name(), "decrypting private key");

        let mut contents = block.into_contents();
        let encrypted = self.secure(std::mem::take(&mut *contents))?;
        let der = legacy::decrypt(&dek, passphrase, encrypted.as_bytes()).ok_or_else(|| {
            CipherError::KeyDecryptionFailed {
                path: path.to_path_buf(),
            }
        })?;
        encrypted.release();
        let der = self.secure(der)?;

        let key = RsaPrivateKey::from_pkcs1_der(der.as_bytes()).map_err(|e| {
            CipherError::InvalidPrivateKey {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        debug!(bits = key.size() * 8, "private key loaded");
        Ok(key)
    }

    /// Load an SPKI public key and require it to be RSA.
    ///
    /// # Errors
    ///
    /// - `FormatError` for zero/multiple blocks or a non-public-key block
    /// - `PolicyError::NotRsaKey` if the key algorithm isn't RSA
    /// - `CipherError::InvalidPublicKey` if the key can't be parsed
    pub fn load_public_key(&self, path: &Path) -> Result<RsaPublicKey> {
        let block = decode_single_block(path)?;
        if block.tag() != PUBLIC_KEY_TAG {
            return Err(FormatError::UnexpectedBlockType {
                path: path.to_path_buf(),
                expected: PUBLIC_KEY_TAG,
                found: block.tag().to_string(),
            }
            .into());
        }

        let invalid = |reason: String| CipherError::InvalidPublicKey {
            path: path.to_path_buf(),
            reason,
        };

        let spki =
            SubjectPublicKeyInfoRef::try_from(block.contents()).map_err(|e| invalid(e.to_string()))?;
        if spki.algorithm.oid != rsa::pkcs1::ALGORITHM_OID {
            return Err(PolicyError::NotRsaKey {
                path: path.to_path_buf(),
                algorithm: spki.algorithm.oid.to_string(),
            }
            .into());
        }

        let key = RsaPublicKey::try_from(spki).map_err(|e| invalid(e.to_string()))?;
        debug!(path = %path.display(), bits = key.size() * 8, "public key loaded");
        Ok(key)
    }
}

impl Default for KeyLoader {
    fn default() -> Self {
        Self::new(LockPolicy::default())
    }
}

impl fmt::Debug for KeyLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyLoader")
            .field("policy", &self.policy)
            .field("backend", &self.backend.name())
            .finish()
    }
}
