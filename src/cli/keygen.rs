//! Keygen command.
//!
//! Create the key pair `environment` and `add` read, with the private key
//! encrypted under the configured passphrase.

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::keys;
use crate::core::passphrase;
use crate::error::Result;

/// Generate and write a key pair.
pub fn execute(settings: &Settings, bits: usize, force: bool, ask_pass: bool) -> Result<()> {
    let source = passphrase::resolve(ask_pass, true, &settings.pass_env, &settings.pass_file);
    let pass = source.bytes()?;
    if pass.is_empty() {
        output::warn("the private key will be encrypted with an empty passphrase");
    }

    let generated = keys::generate(bits, &pass)?;
    generated.write(&settings.private_key_file, &settings.public_key_file, force)?;

    output::success(&format!(
        "wrote {} and {}",
        output::path(&settings.private_key_file),
        output::path(&settings.public_key_file)
    ));
    Ok(())
}
