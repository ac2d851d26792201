//! Sensitive buffer handling.
//!
//! [`SecureBuffer`] owns bytes that must never outlive their use: passphrases,
//! decrypted private-key DER, and anything derived from them. While alive the
//! pages are locked against swapping (where the platform allows); on drop the
//! bytes are overwritten with zeros before the pages are unlocked and the
//! allocation is returned. Dropping is the only release path, so the wipe
//! runs exactly once on every exit: normal return, `?` early return, or
//! unwinding.
//!
//! ## Backends
//!
//! - **unix**: `mlock`/`munlock`
//! - **windows**: `VirtualLock`/`VirtualUnlock`
//! - **fallback**: reports `Unsupported`; the buffer is still wiped
//!
//! Locks are reference counted per page (see `pages`), so releasing one
//! buffer never unlocks a page another live buffer still sits on.

use std::fmt;
use std::io;
use std::ops::Range;

use tracing::{trace, warn};
use zeroize::Zeroize;

use crate::error::{MemoryError, Result};

pub mod fallback;
mod pages;
#[cfg(unix)]
pub mod unix;
#[cfg(windows)]
pub mod windows;

/// Platform page-locking capability.
pub trait PageLock: Sync {
    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Prevent the pages spanning `region` from being swapped out.
    ///
    /// Backends without the capability return an error of kind
    /// [`io::ErrorKind::Unsupported`].
    fn lock(&self, region: &[u8]) -> io::Result<()>;

    /// Undo [`PageLock::lock`] for every page `region` touches.
    fn unlock(&self, region: &[u8]) -> io::Result<()>;

    /// Granularity of `lock`/`unlock`.
    fn page_size(&self) -> usize {
        4096
    }
}

/// Identity of a backend instance in the page table.
fn backend_id(backend: &'static dyn PageLock) -> usize {
    backend as *const dyn PageLock as *const () as usize
}

/// Page-locking backend for the current platform.
pub fn default_backend() -> &'static dyn PageLock {
    #[cfg(unix)]
    {
        &unix::Mlock
    }
    #[cfg(windows)]
    {
        &windows::VirtualLock
    }
    #[cfg(not(any(unix, windows)))]
    {
        &fallback::NoLock
    }
}

/// What to do when pages can't be locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPolicy {
    /// Warn and continue without locking.
    #[default]
    BestEffort,
    /// Fail the operation.
    Strict,
}

impl LockPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::BestEffort
        }
    }
}

/// Outcome of locking a buffer's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// Pages are locked.
    Locked,
    /// Nothing to lock.
    Empty,
    /// The platform has no page locking; proceeding without it.
    Unsupported,
    /// The platform refused (e.g. `RLIMIT_MEMLOCK`); proceeding without it.
    Failed,
}

/// A page-locked byte buffer that is zeroed when dropped.
pub struct SecureBuffer {
    bytes: Vec<u8>,
    status: LockStatus,
    backend: &'static dyn PageLock,
}

impl SecureBuffer {
    /// Take ownership of `bytes` and lock them with the platform backend.
    ///
    /// # Errors
    ///
    /// Under [`LockPolicy::Strict`], returns `MemoryError` if the pages
    /// can't be locked. The bytes are wiped before the error is returned.
    pub fn acquire(bytes: Vec<u8>, policy: LockPolicy) -> Result<Self> {
        Self::acquire_with(bytes, policy, default_backend())
    }

    /// Like [`SecureBuffer::acquire`] with an explicit backend.
    pub fn acquire_with(
        bytes: Vec<u8>,
        policy: LockPolicy,
        backend: &'static dyn PageLock,
    ) -> Result<Self> {
        let mut buf = Self {
            bytes,
            status: LockStatus::Empty,
            backend,
        };

        if buf.bytes.is_empty() {
            return Ok(buf);
        }

        let mut table = pages::table();
        match backend.lock(&buf.bytes) {
            Ok(()) => {
                pages::retain(&mut table, backend_id(backend), buf.pages());
                trace!(len = buf.bytes.len(), backend = backend.name(), "locked");
                buf.status = LockStatus::Locked;
            }
            Err(e) if e.kind() == io::ErrorKind::Unsupported => {
                buf.status = LockStatus::Unsupported;
                if policy == LockPolicy::Strict {
                    return Err(MemoryError::LockUnavailable.into());
                }
                warn!(
                    backend = backend.name(),
                    "memory locking unsupported, proceeding without locking"
                );
            }
            Err(e) => {
                buf.status = LockStatus::Failed;
                if policy == LockPolicy::Strict {
                    return Err(MemoryError::LockFailed(e).into());
                }
                warn!(
                    backend = backend.name(),
                    error = %e,
                    "couldn't lock memory, proceeding without locking"
                );
            }
        }

        Ok(buf)
    }

    /// The guarded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the pages were actually locked.
    pub fn lock_status(&self) -> LockStatus {
        self.status
    }

    /// Wipe and release now rather than at end of scope.
    pub fn release(self) {
        drop(self);
    }

    /// Page numbers spanned by the bytes; only meaningful when non-empty.
    fn pages(&self) -> Range<usize> {
        pages::span(
            self.bytes.as_ptr() as usize,
            self.bytes.len(),
            self.backend.page_size(),
        )
    }

    /// Zero the bytes in place, then unlock the pages no other buffer holds.
    fn wipe(&mut self) {
        self.bytes.as_mut_slice().zeroize();

        if self.status == LockStatus::Locked {
            let start = self.bytes.as_ptr() as usize;
            let end = start + self.bytes.len();
            let page_size = self.backend.page_size();
            let spanned = self.pages();

            let mut table = pages::table();
            for run in pages::release(&mut table, backend_id(self.backend), spanned) {
                // Our own bytes within the run; unlocking rounds out to exactly the run.
                let from = (run.start * page_size).max(start) - start;
                let to = (run.end * page_size).min(end) - start;
                if let Err(e) = self.backend.unlock(&self.bytes[from..to]) {
                    warn!(backend = self.backend.name(), error = %e, "couldn't unlock memory");
                }
            }
            self.status = LockStatus::Empty;
        }
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.wipe();
        // Clears length and zeroes spare capacity as well.
        self.bytes.zeroize();
    }
}

impl AsRef<[u8]> for SecureBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("len", &self.bytes.len())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
