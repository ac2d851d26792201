//! Input validation for bens operations.
//!
//! Validates entry names and key sizes before any cryptography runs.

use crate::error::{Result, ValidationError};

/// Smallest RSA modulus `keygen` will produce.
pub const MIN_KEY_BITS: usize = 1024;

/// Largest RSA modulus `keygen` will produce.
pub const MAX_KEY_BITS: usize = 16384;

/// Validate an entry name.
///
/// Entry names are rendered as environment variable names, so they must be:
/// - ASCII letters, digits, and underscore only
/// - Not starting with a digit
/// - Not empty
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidName {
            name: name.to_string(),
            reason: "cannot start with a digit".to_string(),
        }
        .into());
    }

    if let Some((i, ch)) = name
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric() && *ch != '_')
    {
        return Err(ValidationError::InvalidName {
            name: name.to_string(),
            reason: format!(
                "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                ch,
                i + 1
            ),
        }
        .into());
    }

    Ok(())
}

/// Validate an RSA key size for generation.
///
/// # Errors
///
/// Returns `ValidationError::InvalidKeySize` outside 1024..=16384 or when
/// not a multiple of 8.
pub fn validate_key_bits(bits: usize) -> Result<()> {
    if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) || bits % 8 != 0 {
        return Err(ValidationError::InvalidKeySize { bits }.into());
    }
    Ok(())
}
