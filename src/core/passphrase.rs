//! Passphrase sources.
//!
//! The key loader only needs raw bytes; where they come from (a file, an
//! environment variable, a terminal prompt) is decided here.

use std::fs;
use std::path::{Path, PathBuf};

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{KeyError, Result};

/// Supplies passphrase bytes.
pub trait PassphraseSource {
    /// The passphrase; may be empty.
    fn bytes(&self) -> Result<Zeroizing<Vec<u8>>>;

    /// Source name for logs.
    fn name(&self) -> &'static str;
}

/// Passphrase stored in a file; surrounding whitespace is trimmed.
#[derive(Debug, Clone)]
pub struct PassFile {
    path: PathBuf,
}

impl PassFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PassphraseSource for PassFile {
    fn bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        debug!(path = %self.path.display(), "reading pass file");
        let raw = Zeroizing::new(fs::read(&self.path).map_err(|source| KeyError::ReadFailed {
            path: self.path.clone(),
            source,
        })?);
        Ok(Zeroizing::new(trim_ascii_whitespace(&raw).to_vec()))
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Passphrase taken from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvPassphrase {
    var: String,
}

impl EnvPassphrase {
    /// `Some` only if `var` is set to a non-empty value.
    pub fn detect(var: &str) -> Option<Self> {
        match std::env::var_os(var) {
            Some(value) if !value.is_empty() => Some(Self {
                var: var.to_string(),
            }),
            _ => None,
        }
    }
}

impl PassphraseSource for EnvPassphrase {
    fn bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        let value = Zeroizing::new(std::env::var(&self.var).unwrap_or_default());
        Ok(Zeroizing::new(value.as_bytes().to_vec()))
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}

/// Interactive hidden-input prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptPassphrase {
    confirm: bool,
}

impl PromptPassphrase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask twice and require both entries to match.
    pub fn with_confirmation() -> Self {
        Self { confirm: true }
    }
}

impl PassphraseSource for PromptPassphrase {
    fn bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        let mut prompt = Password::new()
            .with_prompt("password")
            .allow_empty_password(true);
        if self.confirm {
            prompt = prompt.with_confirmation("confirm password", "passwords don't match");
        }
        let pass = Zeroizing::new(prompt.interact()?);
        Ok(Zeroizing::new(pass.as_bytes().to_vec()))
    }

    fn name(&self) -> &'static str {
        "prompt"
    }
}

/// Passphrase bytes already in memory.
pub struct StaticPassphrase(Zeroizing<Vec<u8>>);

impl StaticPassphrase {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }
}

impl PassphraseSource for StaticPassphrase {
    fn bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Pick a source: prompt if asked, else a non-empty environment variable,
/// else the pass file.
pub fn resolve(ask: bool, confirm: bool, env_var: &str, pass_file: &Path) -> Box<dyn PassphraseSource> {
    if ask {
        return if confirm {
            Box::new(PromptPassphrase::with_confirmation())
        } else {
            Box::new(PromptPassphrase::new())
        };
    }
    if let Some(env) = EnvPassphrase::detect(env_var) {
        return Box::new(env);
    }
    Box::new(PassFile::new(pass_file))
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
