//! Legacy PEM encryption (`Proc-Type: 4,ENCRYPTED`).
//!
//! The payload is CBC-encrypted with PKCS#7 padding under a key derived
//! from the passphrase by OpenSSL's `EVP_BytesToKey` (MD5, one round,
//! salt = first 8 bytes of the IV named in `DEK-Info`).

use std::path::Path;

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use md5::{Digest, Md5};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{FormatError, Result};

/// Bytes of the IV used as key-derivation salt.
const SALT_LEN: usize = 8;

/// Block ciphers accepted in `DEK-Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PemCipher {
    DesCbc,
    DesEde3Cbc,
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
}

impl PemCipher {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DES-CBC" => Some(Self::DesCbc),
            "DES-EDE3-CBC" => Some(Self::DesEde3Cbc),
            "AES-128-CBC" => Some(Self::Aes128Cbc),
            "AES-192-CBC" => Some(Self::Aes192Cbc),
            "AES-256-CBC" => Some(Self::Aes256Cbc),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::DesCbc => "DES-CBC",
            Self::DesEde3Cbc => "DES-EDE3-CBC",
            Self::Aes128Cbc => "AES-128-CBC",
            Self::Aes192Cbc => "AES-192-CBC",
            Self::Aes256Cbc => "AES-256-CBC",
        }
    }

    pub fn key_len(self) -> usize {
        match self {
            Self::DesCbc => 8,
            Self::DesEde3Cbc => 24,
            Self::Aes128Cbc => 16,
            Self::Aes192Cbc => 24,
            Self::Aes256Cbc => 32,
        }
    }

    /// IV length, which is also the block size.
    pub fn iv_len(self) -> usize {
        match self {
            Self::DesCbc | Self::DesEde3Cbc => 8,
            Self::Aes128Cbc | Self::Aes192Cbc | Self::Aes256Cbc => 16,
        }
    }
}

/// Parsed `DEK-Info` header: `<cipher>,<hex IV>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DekInfo {
    pub cipher: PemCipher,
    pub iv: Vec<u8>,
}

impl DekInfo {
    /// Parse a header value; `path` is only used in errors.
    pub fn parse(path: &Path, value: &str) -> Result<Self> {
        let invalid = |reason: &str| FormatError::InvalidDekInfo {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let (name, iv_hex) = value
            .split_once(',')
            .ok_or_else(|| invalid("expected '<cipher>,<iv>'"))?;

        let cipher = PemCipher::from_name(name.trim()).ok_or_else(|| {
            FormatError::UnsupportedPemCipher {
                path: path.to_path_buf(),
                cipher: name.trim().to_string(),
            }
        })?;

        let iv = hex::decode(iv_hex.trim()).map_err(|_| invalid("IV is not hex"))?;
        if iv.len() != cipher.iv_len() {
            return Err(invalid(&format!(
                "{} needs a {}-byte IV, got {}",
                cipher.name(),
                cipher.iv_len(),
                iv.len()
            ))
            .into());
        }

        Ok(Self { cipher, iv })
    }

    /// Header value for this cipher and IV.
    pub fn header_value(&self) -> String {
        format!("{},{}", self.cipher.name(), hex::encode_upper(&self.iv))
    }
}

/// OpenSSL `EVP_BytesToKey` with MD5 and a single iteration.
pub fn derive_key(passphrase: &[u8], salt: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(Vec::with_capacity(len + 16));
    let mut prev = Zeroizing::new(Vec::with_capacity(16));

    while key.len() < len {
        let mut hasher = Md5::new();
        hasher.update(prev.as_slice());
        hasher.update(passphrase);
        hasher.update(salt);
        let mut digest = hasher.finalize();

        key.extend_from_slice(&digest);
        prev.clear();
        prev.extend_from_slice(&digest);
        digest.as_mut_slice().zeroize();
    }

    key.truncate(len);
    key
}

/// Decrypt a legacy-encrypted payload.
///
/// Returns `None` when the padding check fails, which is what a wrong
/// passphrase looks like.
pub fn decrypt(dek: &DekInfo, passphrase: &[u8], ciphertext: &[u8]) -> Option<Vec<u8>> {
    let key = derive_key(passphrase, &dek.iv[..SALT_LEN], dek.cipher.key_len());
    match dek.cipher {
        PemCipher::DesCbc => cbc_decrypt::<des::Des>(&key, &dek.iv, ciphertext),
        PemCipher::DesEde3Cbc => cbc_decrypt::<des::TdesEde3>(&key, &dek.iv, ciphertext),
        PemCipher::Aes128Cbc => cbc_decrypt::<aes::Aes128>(&key, &dek.iv, ciphertext),
        PemCipher::Aes192Cbc => cbc_decrypt::<aes::Aes192>(&key, &dek.iv, ciphertext),
        PemCipher::Aes256Cbc => cbc_decrypt::<aes::Aes256>(&key, &dek.iv, ciphertext),
    }
}

/// Encrypt a payload for a legacy PEM block.
pub fn encrypt(dek: &DekInfo, passphrase: &[u8], plaintext: &[u8]) -> Vec<u8> {
    let key = derive_key(passphrase, &dek.iv[..SALT_LEN], dek.cipher.key_len());
    match dek.cipher {
        PemCipher::DesCbc => cbc_encrypt::<des::Des>(&key, &dek.iv, plaintext),
        PemCipher::DesEde3Cbc => cbc_encrypt::<des::TdesEde3>(&key, &dek.iv, plaintext),
        PemCipher::Aes128Cbc => cbc_encrypt::<aes::Aes128>(&key, &dek.iv, plaintext),
        PemCipher::Aes192Cbc => cbc_encrypt::<aes::Aes192>(&key, &dek.iv, plaintext),
        PemCipher::Aes256Cbc => cbc_encrypt::<aes::Aes256>(&key, &dek.iv, plaintext),
    }
}

fn cbc_decrypt<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Option<Vec<u8>>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    cbc::Decryptor::<C>::new_from_slices(key, iv)
        .ok()?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .ok()
}

fn cbc_encrypt<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Vec<u8>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    // Key and IV lengths come from PemCipher and always match C.
    match cbc::Encryptor::<C>::new_from_slices(key, iv) {
        Ok(enc) => enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        Err(_) => unreachable!("key/iv length mismatch for {}", std::any::type_name::<C>()),
    }
}
