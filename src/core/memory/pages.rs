//! Per-page lock reference counts.
//!
//! Page locks don't nest: a single `munlock`/`VirtualUnlock` releases a page
//! no matter how many buffers on it asked for the lock. Every locked buffer
//! registers the pages it spans here, and a page is only handed back for
//! unlocking once the last buffer on it has been released. Callers hold the
//! table guard across the matching `lock`/`unlock` call so a page can't be
//! unlocked between another buffer's lock and its registration.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// `(backend, page number)`
type Key = (usize, usize);

pub(crate) type Table = HashMap<Key, usize>;

pub(crate) fn table() -> MutexGuard<'static, Table> {
    static TABLE: OnceLock<Mutex<Table>> = OnceLock::new();
    TABLE
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Page numbers covered by `len > 0` bytes starting at `addr`.
pub(crate) fn span(addr: usize, len: usize, page_size: usize) -> Range<usize> {
    let first = addr / page_size;
    let last = (addr + len - 1) / page_size;
    first..last + 1
}

/// Take one reference on each page.
pub(crate) fn retain(table: &mut Table, backend: usize, pages: Range<usize>) {
    for page in pages {
        *table.entry((backend, page)).or_insert(0) += 1;
    }
}

/// Drop one reference on each page and return the runs of pages that no
/// other buffer holds any more.
pub(crate) fn release(table: &mut Table, backend: usize, pages: Range<usize>) -> Vec<Range<usize>> {
    let mut free: Vec<Range<usize>> = Vec::new();

    for page in pages {
        let remaining = match table.get_mut(&(backend, page)) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };
        if remaining > 0 {
            continue;
        }

        table.remove(&(backend, page));
        match free.last_mut() {
            Some(run) if run.end == page => run.end += 1,
            _ => free.push(page..page + 1),
        }
    }

    free
}

/// References currently held on `page`.
#[cfg(test)]
pub(crate) fn held(backend: usize, page: usize) -> usize {
    table().get(&(backend, page)).copied().unwrap_or(0)
}
