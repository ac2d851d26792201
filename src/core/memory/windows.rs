//! `VirtualLock` page locking.

use std::io;

use windows_sys::Win32::System::Memory;
use windows_sys::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};

use super::PageLock;

/// Locks pages into the working set with `VirtualLock`/`VirtualUnlock`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualLock;

impl PageLock for VirtualLock {
    fn name(&self) -> &'static str {
        "VirtualLock"
    }

    fn lock(&self, region: &[u8]) -> io::Result<()> {
        // SAFETY: `region` is a live allocation for the duration of the call.
        let ok = unsafe { Memory::VirtualLock(region.as_ptr().cast(), region.len()) };
        if ok != 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn page_size(&self) -> usize {
        // SAFETY: SYSTEM_INFO is plain data and GetSystemInfo fills all of it.
        let info = unsafe {
            let mut info: SYSTEM_INFO = std::mem::zeroed();
            GetSystemInfo(&mut info);
            info
        };
        match info.dwPageSize {
            0 => 4096,
            size => size as usize,
        }
    }

    fn unlock(&self, region: &[u8]) -> io::Result<()> {
        // SAFETY: as above.
        let ok = unsafe { Memory::VirtualUnlock(region.as_ptr().cast(), region.len()) };
        if ok != 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}
