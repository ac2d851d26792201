//! `mlock(2)` page locking.

use std::io;

use super::PageLock;

/// Locks pages with `mlock`/`munlock`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mlock;

impl PageLock for Mlock {
    fn name(&self) -> &'static str {
        "mlock"
    }

    fn lock(&self, region: &[u8]) -> io::Result<()> {
        // SAFETY: `region` is a live allocation for the duration of the call;
        // mlock only changes residency, never contents.
        let rc = unsafe { libc::mlock(region.as_ptr().cast(), region.len()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn page_size(&self) -> usize {
        // SAFETY: sysconf has no preconditions.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        usize::try_from(size).ok().filter(|s| *s > 0).unwrap_or(4096)
    }

    fn unlock(&self, region: &[u8]) -> io::Result<()> {
        // SAFETY: as above.
        let rc = unsafe { libc::munlock(region.as_ptr().cast(), region.len()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}
