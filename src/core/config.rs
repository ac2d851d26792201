//! Settings file management.
//!
//! Reads the optional `.bens.toml` that sets default file locations. Every
//! value can be overridden on the command line; the merged [`Settings`] are
//! passed explicitly to whatever needs them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// File locations and runtime options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Secret document
    pub config_file: PathBuf,
    /// File holding the private key passphrase
    pub pass_file: PathBuf,
    pub private_key_file: PathBuf,
    pub public_key_file: PathBuf,
    /// Environment variable consulted for the passphrase before `pass_file`
    pub pass_env: String,
    /// Fail instead of warning when memory can't be locked
    pub strict_memory_lock: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(constants::DOCUMENT_FILE),
            pass_file: PathBuf::from(constants::PASS_FILE),
            private_key_file: PathBuf::from(constants::PRIVATE_KEY_FILE),
            public_key_file: PathBuf::from(constants::PUBLIC_KEY_FILE),
            pass_env: constants::PASS_ENV.to_string(),
            strict_memory_lock: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file gives the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFailed` if the file exists but can't be read
    /// and `ConfigError::Parse` if it isn't valid settings TOML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(path, &contents)?;
        debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }

    fn from_toml(path: &Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Default settings file in the current directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::SETTINGS_FILE)
    }
}
