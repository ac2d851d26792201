//! Core library: key material, value encryption and the secret document.
//!
//! Everything here is independent of the terminal; the `cli` module wires it
//! to flags, prompts and formatters.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod document;
pub mod keys;
pub mod memory;
pub mod passphrase;
pub mod types;
pub mod validation;
