//! Error types.
//!
//! Each concern has its own enum; [`Error`] wraps them all and
//! [`Error::kind`] projects any error onto a small, stable taxonomy.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for every bens operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("couldn't serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file was missing, unreadable or unwritable.
    Io,
    /// Input had the wrong shape (PEM blocks, base64, document schema).
    Format,
    /// Input was well formed but refused (unencrypted key, missing key half).
    Policy,
    /// A cryptographic operation failed.
    Crypto,
    /// A user-supplied value was rejected.
    Validation,
    /// Settings file could not be used.
    Config,
    /// Memory could not be locked under a strict lock policy.
    Memory,
    /// Interactive input failed.
    Prompt,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format(_) => ErrorKind::Format,
            Self::Policy(_) => ErrorKind::Policy,
            Self::Cipher(_) => ErrorKind::Crypto,
            Self::Key(_) | Self::Io(_) => ErrorKind::Io,
            Self::Document(e) => e.kind(),
            Self::Memory(_) => ErrorKind::Memory,
            Self::Config(_) => ErrorKind::Config,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Json(_) => ErrorKind::Format,
            Self::Prompt(_) => ErrorKind::Prompt,
        }
    }
}

/// Malformed input.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("{path}: PEM file doesn't contain any blocks")]
    NoPemBlock { path: PathBuf },

    #[error("{path}: PEM file contains {count} blocks, expected exactly one")]
    MultiplePemBlocks { path: PathBuf, count: usize },

    #[error("{path}: unexpected data after the PEM block")]
    TrailingData { path: PathBuf },

    #[error("{path}: malformed PEM: {source}")]
    Pem {
        path: PathBuf,
        #[source]
        source: pem::PemError,
    },

    #[error("{path}: expected a '{expected}' block, found '{found}'")]
    UnexpectedBlockType {
        path: PathBuf,
        expected: &'static str,
        found: String,
    },

    #[error("{path}: malformed DEK-Info header: {reason}")]
    InvalidDekInfo { path: PathBuf, reason: String },

    #[error("{path}: unsupported PEM cipher: {cipher}")]
    UnsupportedPemCipher { path: PathBuf, cipher: String },

    #[error("ciphertext is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Well-formed input that is refused.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("{path}: unencrypted private key used; encrypt it with a passphrase first")]
    UnencryptedPrivateKey { path: PathBuf },

    #[error("{path}: key must be an RSA public key, found algorithm {algorithm}")]
    NotRsaKey { path: PathBuf, algorithm: String },

    #[error("no public key associated")]
    NoPublicKey,

    #[error("no private key associated")]
    NoPrivateKey,
}

/// Cryptographic failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("{path}: couldn't decrypt private key (wrong passphrase?)")]
    KeyDecryptionFailed { path: PathBuf },

    #[error("{path}: couldn't parse private key: {reason}")]
    InvalidPrivateKey { path: PathBuf, reason: String },

    #[error("{path}: couldn't parse public key: {reason}")]
    InvalidPublicKey { path: PathBuf, reason: String },

    #[error("plaintext is {len} bytes, the key allows at most {max}")]
    PlaintextTooLong { len: usize, max: usize },

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),
}

/// Key file I/O.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("couldn't read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
}

/// Secret document errors.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("couldn't open {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't save to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse document: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("couldn't serialize document: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("entry {0} already exists")]
    DuplicateEntry(String),

    #[error("couldn't encrypt {name}: {source}")]
    EncryptFailed {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("couldn't decrypt {name}: {source}")]
    DecryptFailed {
        name: String,
        #[source]
        source: Box<Error>,
    },
}

impl DocumentError {
    /// Category of this error; entry failures report their cause's category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ReadFailed { .. } | Self::WriteFailed { .. } => ErrorKind::Io,
            Self::Parse(_) | Self::Serialize(_) => ErrorKind::Format,
            Self::DuplicateEntry(_) => ErrorKind::Validation,
            Self::EncryptFailed { source, .. } | Self::DecryptFailed { source, .. } => {
                source.kind()
            }
        }
    }
}

/// Page locking under a strict lock policy.
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("memory locking is not available on this platform")]
    LockUnavailable,

    #[error("couldn't lock sensitive memory: {0}")]
    LockFailed(#[source] std::io::Error),
}

/// Settings file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("couldn't read settings {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Rejected user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("entry name cannot be empty")]
    EmptyName,

    #[error("invalid entry name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("key size {bits} is not supported (use 1024 to 16384 bits)")]
    InvalidKeySize { bits: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
