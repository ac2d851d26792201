//! Key pair generation.
//!
//! Produces the same file formats [`KeyLoader`](super::KeyLoader) accepts:
//! an `AES-256-CBC` legacy-encrypted PKCS#1 private key and an SPKI public key.

use std::fs;
use std::path::Path;

use pem::{EncodeConfig, Pem};
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use tracing::debug;

use super::legacy::{self, DekInfo, PemCipher};
use crate::core::constants::PRIVATE_KEY_TAG;
use crate::core::validation::validate_key_bits;
use crate::error::{CipherError, KeyError, Result};

/// Freshly generated key files.
pub struct GeneratedKeys {
    /// Encrypted private key PEM.
    pub private_pem: String,
    /// Public key PEM.
    pub public_pem: String,
}

impl GeneratedKeys {
    /// Write both files, refusing to replace existing ones unless `force`.
    ///
    /// The private key is written with mode 0600 on Unix.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::AlreadyExists` or `KeyError::WriteFailed`.
    pub fn write(&self, private_path: &Path, public_path: &Path, force: bool) -> Result<()> {
        if !force {
            for path in [private_path, public_path] {
                if path.exists() {
                    return Err(KeyError::AlreadyExists(path.to_path_buf()).into());
                }
            }
        }

        write_file(private_path, &self.private_pem, 0o600)?;
        write_file(public_path, &self.public_pem, 0o644)?;

        debug!(
            private = %private_path.display(),
            public = %public_path.display(),
            "key files written"
        );
        Ok(())
    }
}

/// Generate an RSA key pair of `bits` and encrypt the private half under
/// `passphrase`.
///
/// # Errors
///
/// Returns `ValidationError` for unsupported sizes and `CipherError` if
/// generation or encoding fails.
pub fn generate(bits: usize, passphrase: &[u8]) -> Result<GeneratedKeys> {
    validate_key_bits(bits)?;
    debug!(bits, "generating RSA key pair");

    let private = RsaPrivateKey::new(&mut OsRng, bits)
        .map_err(|e| CipherError::KeyGenerationFailed(e.to_string()))?;

    let public_pem = private
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| CipherError::KeyGenerationFailed(e.to_string()))?;

    let der = private
        .to_pkcs1_der()
        .map_err(|e| CipherError::KeyGenerationFailed(e.to_string()))?;

    let mut iv = vec![0u8; PemCipher::Aes256Cbc.iv_len()];
    OsRng.fill_bytes(&mut iv);
    let dek = DekInfo {
        cipher: PemCipher::Aes256Cbc,
        iv,
    };
    let encrypted = legacy::encrypt(&dek, passphrase, der.as_bytes());

    Ok(GeneratedKeys {
        private_pem: encode_encrypted_pem(&dek, encrypted)?,
        public_pem,
    })
}

/// Legacy-encrypted private key block with its `Proc-Type`/`DEK-Info` headers.
fn encode_encrypted_pem(dek: &DekInfo, payload: Vec<u8>) -> Result<String> {
    let failed = |e: pem::PemError| CipherError::KeyGenerationFailed(e.to_string());

    let mut block = Pem::new(PRIVATE_KEY_TAG, payload);
    block
        .headers_mut()
        .add("Proc-Type", "4,ENCRYPTED")
        .map_err(failed)?;
    block
        .headers_mut()
        .add("DEK-Info", &dek.header_value())
        .map_err(failed)?;

    Ok(pem::encode_config(
        &block,
        EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    ))
}

fn write_file(path: &Path, contents: &str, mode: u32) -> Result<()> {
    let failed = |source| KeyError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(mode)
            .open(path)
            .map_err(failed)?;
        file.write_all(contents.as_bytes()).map_err(failed)?;

        // Ensure the mode even when overwriting an existing file.
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(failed)?;
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
        fs::write(path, contents).map_err(failed)?;
    }

    Ok(())
}
