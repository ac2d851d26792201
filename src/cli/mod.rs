//! Command-line interface.

pub mod add;
pub mod completions;
pub mod environment;
pub mod format;
pub mod keygen;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::Settings;
use crate::core::constants;
use crate::error::{CipherError, Error, KeyError, PolicyError, Result};

pub use format::Formatter;

/// Bens - build environment security.
#[derive(Parser)]
#[command(
    name = "bens",
    about = "Keep RSA-encrypted environment variables next to your code",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by every command; each overrides the settings file.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Secret document [default: bens.yml]
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// File holding the private key passphrase [default: pass.txt]
    #[arg(short = 'p', long, global = true, value_name = "PATH")]
    pub pass_file: Option<PathBuf>,

    /// Encrypted private key [default: pri.key]
    #[arg(long, global = true, value_name = "PATH")]
    pub private_key_file: Option<PathBuf>,

    /// Public key [default: pub.key]
    #[arg(long, global = true, value_name = "PATH")]
    pub public_key_file: Option<PathBuf>,

    /// Settings file
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "BENS_SETTINGS",
        default_value = constants::SETTINGS_FILE
    )]
    pub settings: PathBuf,

    /// Fail instead of warning when sensitive memory can't be locked
    #[arg(long, global = true)]
    pub strict_memory_lock: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Settings file values with command-line overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the settings file is unusable.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::load(&self.settings)?;
        if let Some(path) = &self.config_file {
            settings.config_file = path.clone();
        }
        if let Some(path) = &self.pass_file {
            settings.pass_file = path.clone();
        }
        if let Some(path) = &self.private_key_file {
            settings.private_key_file = path.clone();
        }
        if let Some(path) = &self.public_key_file {
            settings.public_key_file = path.clone();
        }
        settings.strict_memory_lock |= self.strict_memory_lock;
        Ok(settings)
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt a value and add it to the document
    Add {
        /// Variable name (e.g., DATABASE_URL)
        name: String,
        /// Value; read from stdin or a hidden prompt when omitted
        value: Option<String>,
    },

    /// Decrypt the document and print it as variable assignments
    Environment {
        /// Output syntax
        #[arg(long, value_enum, default_value_t = Formatter::Shell)]
        formatter: Formatter,
        /// Prompt for the passphrase instead of using BENS_PASS or the pass file
        #[arg(long)]
        ask_pass: bool,
    },

    /// Generate an encrypted key pair
    Keygen {
        /// Modulus size in bits
        #[arg(long, default_value_t = constants::DEFAULT_KEY_BITS)]
        bits: usize,
        /// Overwrite existing key files
        #[arg(short, long)]
        force: bool,
        /// Prompt for the passphrase instead of using BENS_PASS or the pass file
        #[arg(long)]
        ask_pass: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, global: &GlobalArgs) -> Result<()> {
    use Command::*;

    match command {
        Add { name, value } => add::execute(&global.resolve()?, &name, value),
        Environment {
            formatter,
            ask_pass,
        } => environment::execute(&global.resolve()?, formatter, ask_pass),
        Keygen {
            bits,
            force,
            ask_pass,
        } => keygen::execute(&global.resolve()?, bits, force, ask_pass),
        Completions { shell } => completions::execute(shell),
    }
}

/// Follow-up suggestion for an error, if there is an obvious one.
pub fn hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::Policy(PolicyError::UnencryptedPrivateKey { .. }) => {
            Some("encrypt it: openssl rsa -aes256 -in pri.key -out pri.key.enc")
        }
        Error::Cipher(CipherError::KeyDecryptionFailed { .. }) => {
            Some("check the pass file or BENS_PASS, or use --ask-pass")
        }
        Error::Cipher(CipherError::PlaintextTooLong { .. }) => {
            Some("values must fit in one RSA block; use a larger key")
        }
        Error::Key(KeyError::AlreadyExists(_)) => Some("run: bens keygen --force"),
        Error::Memory(_) => Some("raise the memlock limit (ulimit -l) or drop --strict-memory-lock"),
        _ => None,
    }
}
