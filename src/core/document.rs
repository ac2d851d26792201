//! Encrypted secret documents.
//!
//! A [`SecretDocument`] is a versioned, ordered list of `(name, ciphertext)`
//! entries persisted as YAML:
//!
//! ```yaml
//! version: 1
//! environment:
//!   - name: FOO
//!     encryptedValue: <base64>
//! ```
//!
//! A missing `version` reads as 0 and a missing `environment` as no entries;
//! an empty file is an empty version-0 document. Entry order is preserved
//! through load and save. Names are unique: a
//! document containing the same name twice is refused on load, and
//! [`SecretDocument::add`] refuses to append an existing name.

use std::collections::HashSet;
use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher::Cipher;
use crate::core::types::{EncryptedValue, EntryName, Version};
use crate::core::validation::validate_name;
use crate::error::{DocumentError, Result};

/// One persisted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: EntryName,
    #[serde(rename = "encryptedValue")]
    pub encrypted_value: EncryptedValue,
}

/// A decrypted entry. Never persisted; the value is wiped on drop.
pub struct DecryptedEntry {
    pub name: EntryName,
    pub value: Zeroizing<String>,
}

impl fmt::Debug for DecryptedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptedEntry")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct Schema {
    version: Version,
    environment: Vec<Entry>,
}

/// Named ciphertexts plus the cipher that produces and reads them.
pub struct SecretDocument<C: Cipher> {
    version: Version,
    entries: Vec<Entry>,
    cipher: C,
    modified: bool,
}

impl<C: Cipher> SecretDocument<C> {
    /// An empty document.
    pub fn new(version: Version, cipher: C) -> Self {
        Self {
            version,
            entries: Vec::new(),
            cipher,
            modified: false,
        }
    }

    /// Read and parse a document file.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::ReadFailed` if the file can't be read,
    /// `DocumentError::Parse` for a malformed document and
    /// `DocumentError::DuplicateEntry` if a name appears twice.
    pub fn load(path: &Path, cipher: C) -> Result<Self> {
        debug!(path = %path.display(), "loading document");
        let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents, cipher)
    }

    /// Parse a document from YAML text.
    ///
    /// # Errors
    ///
    /// Same as [`SecretDocument::load`], minus I/O.
    pub fn from_yaml(yaml: &str, cipher: C) -> Result<Self> {
        let schema: Schema = if yaml.trim().is_empty() {
            Schema::default()
        } else {
            serde_yaml::from_str(yaml).map_err(DocumentError::Parse)?
        };

        let mut seen = HashSet::with_capacity(schema.environment.len());
        for entry in &schema.environment {
            if !seen.insert(entry.name.as_str()) {
                return Err(DocumentError::DuplicateEntry(entry.name.clone()).into());
            }
        }

        debug!(
            version = schema.version,
            entries = schema.environment.len(),
            "document loaded"
        );
        Ok(Self {
            version: schema.version,
            entries: schema.environment,
            cipher,
            modified: false,
        })
    }

    /// Encrypt `plaintext` and append it under `name`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an invalid name,
    /// `DocumentError::DuplicateEntry` if `name` already exists and
    /// `DocumentError::EncryptFailed` wrapping the cipher's error.
    pub fn add(&mut self, name: &str, plaintext: &str) -> Result<()> {
        validate_name(name)?;
        if self.contains(name) {
            return Err(DocumentError::DuplicateEntry(name.to_string()).into());
        }

        let encrypted_value =
            self.cipher
                .encrypt(plaintext)
                .map_err(|e| DocumentError::EncryptFailed {
                    name: name.to_string(),
                    source: Box::new(e),
                })?;

        self.entries.push(Entry {
            name: name.to_string(),
            encrypted_value,
        });
        self.modified = true;
        debug!(name, cipher = self.cipher.name(), "entry added");
        Ok(())
    }

    /// Decrypt every entry in document order.
    ///
    /// Stops at the first failure; values decrypted before it are wiped and
    /// nothing is returned.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::DecryptFailed` naming the entry that failed.
    pub fn decrypt_all(&self) -> Result<Vec<DecryptedEntry>> {
        let mut out = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let value = self
                .cipher
                .decrypt(&entry.encrypted_value)
                .map_err(|e| DocumentError::DecryptFailed {
                    name: entry.name.clone(),
                    source: Box::new(e),
                })?;
            out.push(DecryptedEntry {
                name: entry.name.clone(),
                value,
            });
        }
        debug!(entries = out.len(), "document decrypted");
        Ok(out)
    }

    /// Replace the file at `path` with this document.
    ///
    /// The document is written to a temporary file next to `path` and
    /// renamed over it, so readers see either the old or the new contents.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::WriteFailed` if the file can't be written.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        let failed = |source| DocumentError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(failed)?;
        tmp.write_all(yaml.as_bytes()).map_err(failed)?;
        tmp.as_file().sync_all().map_err(failed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(failed)?;
        }

        tmp.persist(path).map_err(|e| failed(e.error))?;
        self.modified = false;

        debug!(path = %path.display(), entries = self.entries.len(), "document saved");
        Ok(())
    }

    /// YAML form of the document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Serialize` if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        let schema = SchemaRef {
            version: self.version,
            environment: &self.entries,
        };
        serde_yaml::to_string(&schema).map_err(|e| DocumentError::Serialize(e).into())
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether entries were added since the last load or save.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }
}

impl<C: Cipher> fmt::Debug for SecretDocument<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretDocument")
            .field("version", &self.version)
            .field("entries", &self.entries.len())
            .field("cipher", &self.cipher.name())
            .field("modified", &self.modified)
            .finish()
    }
}

#[derive(Serialize)]
struct SchemaRef<'a> {
    version: Version,
    environment: &'a [Entry],
}
