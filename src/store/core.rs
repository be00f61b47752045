//! store/core — SlotStore: владеет файлом данных и зеркалом, открывает/закрывает,
//! пишет слоты по арифметическому смещению.
//!
//! Порядок мутации: запись слота в файл -> обновление зеркала -> notify.
//! Если запись в файл упала, зеркало не трогаем.

use log::{debug, error, info, warn};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::error::{IoContext, Result, StoreError};
use crate::lock;
use crate::metrics::record_slot_write;
use crate::mirror::Mirror;
use crate::record::codec::offset_of;
use crate::subs::{callback, ObserverHandle, ObserverRegistry};

/// Explicit position of a slot in the data file, returned by `create`.
/// Lets callers update/delete without recomputing or re-looking-up the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotHandle {
    pub identity: u32,
    pub offset: u64,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) enum FailPoint {
    /// Записать половину слота и вернуть ошибку.
    TornWrite,
    /// Записать слот целиком, затем ошибка (как при упавшем fsync).
    AfterWrite,
}

#[cfg(test)]
thread_local! {
    static FAILPOINT: std::cell::Cell<Option<FailPoint>> = const { std::cell::Cell::new(None) };
}

#[cfg(test)]
pub(crate) fn arm_failpoint(fp: FailPoint) {
    FAILPOINT.with(|c| c.set(Some(fp)));
}

pub struct SlotStore {
    pub(crate) path: PathBuf,
    pub(crate) file: File,
    pub(crate) cfg: StoreConfig,
    pub(crate) mirror: Mirror,
    pub(crate) subs: Arc<ObserverRegistry>,
    pub(crate) locked: bool,
    // были записи без fsync с момента последней синхронизации
    pub(crate) dirty: bool,
}

impl SlotStore {
    /// Open (or create) a store with default settings and the given geometry.
    pub fn open(path: &Path, capacity: u32, record_size: usize) -> Result<Self> {
        let cfg = StoreConfig::default()
            .with_capacity(capacity)
            .with_record_size(record_size);
        Self::open_with_config(path, cfg)
    }

    pub fn open_with_config(path: &Path, cfg: StoreConfig) -> Result<Self> {
        cfg.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .io_context(|| format!("create dir {}", parent.display()))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)
            .io_context(|| format!("open data file {}", path.display()))?;

        if cfg.exclusive_lock {
            lock::try_lock_exclusive(&file, path)?;
        }

        let locked = cfg.exclusive_lock;
        let mut store = Self {
            path: path.to_path_buf(),
            file,
            cfg,
            mirror: Mirror::default(),
            subs: ObserverRegistry::new(),
            locked,
            dirty: false,
        };

        store.ensure_len()?;
        let slots = store.load_slots()?;
        store.mirror = Mirror::from_slots(slots);

        info!(
            "store: opened {} ({} slots x {} B, {} occupied)",
            store.path.display(),
            store.cfg.capacity,
            store.cfg.record_size,
            store.mirror.len()
        );
        Ok(store)
    }

    /// Дополнить файл пустыми слотами до capacity * record_size.
    fn ensure_len(&mut self) -> Result<()> {
        let expected = self.cfg.file_len();
        let len = self
            .file
            .metadata()
            .io_context(|| format!("stat {}", self.path.display()))?
            .len();

        if len > expected {
            return Err(StoreError::FileTooLarge { len, expected });
        }
        if len == expected {
            return Ok(());
        }

        if len == 0 {
            debug!(
                "store: initializing {} with {} empty slots",
                self.path.display(),
                self.cfg.capacity
            );
        } else {
            warn!(
                "store: {} is {} B, extending to {} B with empty slots",
                self.path.display(),
                len,
                expected
            );
        }

        // Пустой слот кодируется нулями, поэтому хвост — это просто нули.
        let pad = vec![0u8; (expected - len) as usize];
        self.file
            .seek(SeekFrom::Start(len))
            .io_context(|| format!("seek {} to {}", self.path.display(), len))?;
        self.file
            .write_all(&pad)
            .io_context(|| format!("extend {}", self.path.display()))?;
        self.file
            .sync_all()
            .io_context(|| format!("sync {}", self.path.display()))?;
        Ok(())
    }

    /// Записать целый слот по смещению `off`.
    ///
    /// Прежнее содержимое слота читается заранее. Если запись или fsync
    /// упали, слот best-effort восстанавливается, и файл остаётся в
    /// состоянии до вызова.
    pub(crate) fn write_at(&mut self, off: u64, buf: &[u8]) -> Result<()> {
        debug_assert_eq!(buf.len(), self.cfg.record_size);
        let prev = self.read_slot(off)?;
        if let Err(e) = self.write_slot(off, buf) {
            match self.write_slot(off, &prev) {
                Ok(()) => warn!(
                    "store: write at {} in {} failed, slot restored",
                    off,
                    self.path.display()
                ),
                Err(re) => error!(
                    "store: write at {} in {} failed, restore failed too: {}",
                    off,
                    self.path.display(),
                    re
                ),
            }
            return Err(e);
        }
        record_slot_write(buf.len());
        Ok(())
    }

    fn read_slot(&self, off: u64) -> Result<Vec<u8>> {
        let mut prev = vec![0u8; self.cfg.record_size];
        let mut f = &self.file;
        f.seek(SeekFrom::Start(off))
            .io_context(|| format!("seek {} to {}", self.path.display(), off))?;
        f.read_exact(&mut prev)
            .io_context(|| format!("read slot at {} in {}", off, self.path.display()))?;
        Ok(prev)
    }

    fn write_slot(&mut self, off: u64, buf: &[u8]) -> Result<()> {
        self.file
            .seek(SeekFrom::Start(off))
            .io_context(|| format!("seek {} to {}", self.path.display(), off))?;
        self.failpoint(off, buf)?;
        self.file
            .write_all(buf)
            .io_context(|| format!("write slot at {} in {}", off, self.path.display()))?;
        if self.cfg.data_fsync {
            self.file
                .sync_data()
                .io_context(|| format!("sync {}", self.path.display()))?;
        } else {
            self.dirty = true;
        }
        Ok(())
    }

    #[cfg(not(test))]
    #[inline(always)]
    fn failpoint(&mut self, _off: u64, _buf: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Тестовая инъекция сбоя: одноразовая, взводится через `arm_failpoint`.
    #[cfg(test)]
    fn failpoint(&mut self, off: u64, buf: &[u8]) -> Result<()> {
        let Some(fp) = FAILPOINT.with(|c| c.take()) else {
            return Ok(());
        };
        let n = match fp {
            FailPoint::TornWrite => buf.len() / 2,
            FailPoint::AfterWrite => buf.len(),
        };
        self.file
            .write_all(&buf[..n])
            .io_context(|| format!("write slot at {} in {}", off, self.path.display()))?;
        Err(StoreError::io(
            format!("injected {:?} at {}", fp, off),
            std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
        ))
    }

    #[inline]
    pub(crate) fn offset_of(&self, identity: u32) -> u64 {
        offset_of(identity, self.cfg.record_size)
    }

    pub(crate) fn check_range(&self, identity: u32) -> Result<()> {
        if identity == 0 || identity > self.cfg.capacity {
            return Err(StoreError::OutOfRange {
                identity,
                capacity: self.cfg.capacity,
            });
        }
        Ok(())
    }

    // -------- accessors --------

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.cfg
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.cfg.capacity
    }

    #[inline]
    pub fn record_size(&self) -> usize {
        self.cfg.record_size
    }

    /// Read-only view of the cache mirror (for search strategies and navigation).
    #[inline]
    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.mirror.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirror.is_empty()
    }

    // -------- change notification --------

    /// Register an observer called after every successful mutation.
    pub fn subscribe<F>(&self, f: F) -> ObserverHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subs.subscribe(callback(f))
    }

    /// Shared registry, for embedders that register observers elsewhere.
    pub fn observers(&self) -> Arc<ObserverRegistry> {
        self.subs.clone()
    }

    // -------- shutdown --------

    /// Flush, release the lock and close the file.
    pub fn close(mut self) -> Result<()> {
        if self.dirty {
            self.file
                .sync_all()
                .io_context(|| format!("sync {}", self.path.display()))?;
            self.dirty = false;
        }
        if self.locked {
            lock::unlock(&self.file, &self.path)?;
            self.locked = false;
        }
        debug!("store: closed {}", self.path.display());
        Ok(())
    }
}

impl Drop for SlotStore {
    fn drop(&mut self) {
        // best-effort; close() уже всё сделал, если его вызвали
        if self.dirty {
            let _ = self.file.sync_all();
        }
        if self.locked {
            let _ = lock::unlock(&self.file, &self.path);
        }
    }
}
