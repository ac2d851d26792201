//! Environment command.
//!
//! Decrypt every entry and print it in the chosen shell syntax.

use std::io::{self, Write};

use tracing::debug;

use crate::cli::Formatter;
use crate::core::cipher::RsaOaep;
use crate::core::config::Settings;
use crate::core::document::SecretDocument;
use crate::core::keys::KeyLoader;
use crate::core::memory::LockPolicy;
use crate::core::passphrase;
use crate::error::Result;

/// Print the decrypted document to stdout.
pub fn execute(settings: &Settings, formatter: Formatter, ask_pass: bool) -> Result<()> {
    let source = passphrase::resolve(
        ask_pass,
        false,
        &settings.pass_env,
        &settings.pass_file,
    );

    let loader = KeyLoader::new(LockPolicy::from_strict(settings.strict_memory_lock));
    let keys = loader.build_key_pair(
        &*source,
        &settings.private_key_file,
        &settings.public_key_file,
    )?;

    let doc = SecretDocument::load(&settings.config_file, RsaOaep::new(keys))?;
    let entries = doc.decrypt_all()?;
    let rendered = formatter.render(&entries)?;
    debug!(entries = entries.len(), ?formatter, "rendered environment");

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
