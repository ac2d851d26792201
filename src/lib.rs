//! Bens - RSA-encrypted environment variables kept next to your code.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── add           # Encrypt and append a value
//! │   ├── environment   # Decrypt and print assignments
//! │   ├── keygen        # Generate a key pair
//! │   ├── format        # Shell/PowerShell/cmd/JSON renderers
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── memory/       # Page-locked, zeroed-on-drop buffers
//!     ├── keys/         # PEM decoding, legacy decryption, key pairs
//!     ├── cipher/       # Cipher trait and RSA-OAEP
//!     ├── document      # bens.yml load/add/decrypt/save
//!     ├── passphrase    # Pass file, environment and prompt sources
//!     └── config        # .bens.toml settings
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use bens::core::cipher::RsaOaep;
//! use bens::core::document::SecretDocument;
//! use bens::core::keys::KeyLoader;
//! use bens::core::memory::LockPolicy;
//! use bens::core::passphrase::PassFile;
//!
//! # fn main() -> bens::error::Result<()> {
//! let keys = KeyLoader::new(LockPolicy::BestEffort).build_key_pair(
//!     &PassFile::new("pass.txt"),
//!     Path::new("pri.key"),
//!     Path::new("pub.key"),
//! )?;
//! let doc = SecretDocument::load(Path::new("bens.yml"), RsaOaep::new(keys))?;
//! for entry in doc.decrypt_all()? {
//!     println!("{}={}", entry.name, entry.value.as_str());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
