//! Single-block PEM decoding.

use std::fs;
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{FormatError, KeyError, Result};

/// Header marking a legacy encrypted block.
const PROC_TYPE: &str = "Proc-Type";

/// Header naming the cipher and IV of a legacy encrypted block.
const DEK_INFO: &str = "DEK-Info";

const END_MARKER: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";

/// A decoded PEM block.
///
/// The payload is wiped when the block is dropped.
pub struct PemBlock {
    tag: String,
    contents: Zeroizing<Vec<u8>>,
    proc_type: Option<String>,
    dek_info: Option<String>,
}

impl PemBlock {
    /// Type label (`RSA PRIVATE KEY`, `PUBLIC KEY`, ...).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Raw payload bytes.
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn into_contents(self) -> Zeroizing<Vec<u8>> {
        self.contents
    }

    /// `DEK-Info` header value, if present.
    pub fn dek_info(&self) -> Option<&str> {
        self.dek_info.as_deref()
    }

    /// Whether the block carries legacy passphrase encryption headers.
    pub fn is_encrypted(&self) -> bool {
        self.dek_info.is_some()
            || self
                .proc_type
                .as_deref()
                .is_some_and(|v| v.ends_with("ENCRYPTED"))
    }
}

impl std::fmt::Debug for PemBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PemBlock")
            .field("tag", &self.tag)
            .field("len", &self.contents.len())
            .field("encrypted", &self.is_encrypted())
            .finish()
    }
}

/// Read `path` and decode exactly one PEM block from it.
///
/// # Errors
///
/// Returns `KeyError::ReadFailed` if the file can't be read and
/// `FormatError` if it holds zero blocks, more than one, malformed PEM or
/// anything other than whitespace after the block.
pub fn decode_single_block(path: &Path) -> Result<PemBlock> {
    debug!(path = %path.display(), "decoding PEM file");

    let data = Zeroizing::new(fs::read(path).map_err(|source| KeyError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?);

    decode_single_block_from(path, &data)
}

/// Decode exactly one PEM block from `data`; `path` is only used in errors.
pub fn decode_single_block_from(path: &Path, data: &[u8]) -> Result<PemBlock> {
    let mut blocks = pem::parse_many(data).map_err(|source| FormatError::Pem {
        path: path.to_path_buf(),
        source,
    })?;

    let block = match blocks.len() {
        0 => {
            return Err(FormatError::NoPemBlock {
                path: path.to_path_buf(),
            }
            .into())
        }
        1 => blocks.remove(0),
        count => {
            // Drop the extra payloads through Zeroizing as well.
            for extra in blocks {
                drop(Zeroizing::new(extra.into_contents()));
            }
            return Err(FormatError::MultiplePemBlocks {
                path: path.to_path_buf(),
                count,
            }
            .into());
        }
    };

    if has_trailing_data(data) {
        return Err(FormatError::TrailingData {
            path: path.to_path_buf(),
        }
        .into());
    }

    let tag = block.tag().to_string();
    let proc_type = block.headers().get(PROC_TYPE).map(|v| v.trim().to_string());
    let dek_info = block.headers().get(DEK_INFO).map(|v| v.trim().to_string());
    let contents = Zeroizing::new(block.into_contents());

    Ok(PemBlock {
        tag,
        contents,
        proc_type,
        dek_info,
    })
}

/// Whether anything but whitespace follows the last `-----END ...-----` line.
fn has_trailing_data(data: &[u8]) -> bool {
    let after_end = data
        .windows(END_MARKER.len())
        .rposition(|w| w == END_MARKER)
        .map(|i| &data[i + END_MARKER.len()..]);

    let rest = after_end.and_then(|tail| {
        tail.windows(DASHES.len())
            .position(|w| w == DASHES)
            .map(|i| &tail[i + DASHES.len()..])
    });

    rest.is_some_and(|rest| rest.iter().any(|b| !b.is_ascii_whitespace()))
}
