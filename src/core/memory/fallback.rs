//! Backend for platforms without page locking.

use std::io;

use super::PageLock;

/// Reports every lock request as unsupported.
///
/// Buffers guarded by this backend are still wiped on release; they can
/// simply be paged out while alive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLock;

impl PageLock for NoLock {
    fn name(&self) -> &'static str {
        "none"
    }

    fn lock(&self, _region: &[u8]) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "page locking is not available on this platform",
        ))
    }

    fn unlock(&self, _region: &[u8]) -> io::Result<()> {
        Ok(())
    }
}
