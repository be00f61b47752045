//! Advisory locking of the data file (fs2).
//!
//! The store holds the lock on its own data file handle for as long as it is open.
//! A second store on the same file fails with StoreError::Locked.
//! The lock is released on close() or when the handle is dropped.

use fs2::FileExt;
use std::fs::File;
use std::path::Path;

use crate::error::{Result, StoreError};

fn is_contended(e: &std::io::Error) -> bool {
    e.kind() == std::io::ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Try to take an exclusive lock without blocking.
pub fn try_lock_exclusive(file: &File, path: &Path) -> Result<()> {
    FileExt::try_lock_exclusive(file).map_err(|e| {
        if is_contended(&e) {
            StoreError::Locked(path.to_path_buf())
        } else {
            StoreError::io(format!("try_lock_exclusive {}", path.display()), e)
        }
    })
}

pub fn unlock(file: &File, path: &Path) -> Result<()> {
    FileExt::unlock(file)
        .map_err(|e| StoreError::io(format!("unlock {}", path.display()), e))
}
