//! Add command.
//!
//! Encrypt a value with the public key and append it to the document. The
//! private key and passphrase are never touched.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::cipher::RsaOaep;
use crate::core::config::Settings;
use crate::core::constants::DOCUMENT_VERSION;
use crate::core::document::SecretDocument;
use crate::core::keys::KeyLoader;
use crate::core::memory::LockPolicy;
use crate::core::validation::validate_name;
use crate::error::Result;

/// Add `name`, taking the value from the argument, piped stdin or a prompt.
///
/// A missing document is created.
pub fn execute(settings: &Settings, name: &str, value: Option<String>) -> Result<()> {
    validate_name(name)?;

    let value = Zeroizing::new(match value {
        Some(v) => v,
        None => read_value(name)?,
    });

    let loader = KeyLoader::new(LockPolicy::from_strict(settings.strict_memory_lock));
    let cipher = RsaOaep::new(loader.load_public_pair(&settings.public_key_file)?);

    let path = &settings.config_file;
    let mut doc = if path.exists() {
        SecretDocument::load(path, cipher)?
    } else {
        debug!(path = %path.display(), "document doesn't exist, creating");
        SecretDocument::new(DOCUMENT_VERSION, cipher)
    };

    doc.add(name, &value)?;
    doc.save(path)?;

    output::success(&format!(
        "added {} to {}",
        output::key(name),
        output::path(path)
    ));
    Ok(())
}

fn read_value(name: &str) -> Result<String> {
    if io::stdin().is_terminal() {
        return Ok(Password::new()
            .with_prompt(format!("value for {}", output::key(name)))
            .allow_empty_password(true)
            .interact()?);
    }

    let mut input = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut input)?;
    let value = input.strip_suffix('\n').unwrap_or(input.as_str());
    let value = value.strip_suffix('\r').unwrap_or(value);
    Ok(value.to_string())
}
