//! store/scan — чтение слотов напрямую из файла.
//!
//! - load_slots: полная загрузка зеркала при open (в порядке смещений)
//! - scan_file:  линейный поиск по файлу с предикатом, возвращает SlotHandle
//! - verify:     сверка файла с зеркалом (doctor-style отчёт)
//!
//! Всё здесь читает файл; обычный путь чтения (read/search/навигация) идёт через зеркало.

use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Seek, SeekFrom};

use crate::error::{IoContext, Result};
use crate::record::codec::decode;
use crate::record::{Employee, Slot};

use super::core::{SlotHandle, SlotStore};

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub file_len: u64,
    pub expected_len: u64,
    pub slots: u32,
    pub occupied: u32,
    /// Identities whose file content differs from the mirror.
    pub mismatches: Vec<u32>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.file_len == self.expected_len && self.mismatches.is_empty()
    }
}

impl SlotStore {
    /// Прочитать и декодировать все слоты. Слот, чья identity не совпадает
    /// с позицией, считается пустым (с предупреждением).
    pub(crate) fn load_slots(&self) -> Result<Vec<Option<Employee>>> {
        let rs = self.cfg.record_size;
        let raw = self.read_raw()?;
        let mut out = Vec::with_capacity(self.cfg.capacity as usize);
        for (i, chunk) in raw.chunks_exact(rs).enumerate() {
            let slot_id = i as u32 + 1;
            out.push(match decode(chunk)? {
                Slot::Empty => None,
                Slot::Occupied(e) if e.identity == slot_id => Some(e),
                Slot::Occupied(e) => {
                    warn!(
                        "store: slot {} holds identity {}, treating as empty",
                        slot_id, e.identity
                    );
                    None
                }
            });
        }
        debug!("store: loaded {} slots from {}", out.len(), self.path.display());
        Ok(out)
    }

    /// Linear scan over the file itself, slot by slot, decoding each one.
    /// Returns the handle of the first occupied slot matching `pred`.
    pub fn scan_file<F>(&self, mut pred: F) -> Result<Option<SlotHandle>>
    where
        F: FnMut(&Employee) -> bool,
    {
        let rs = self.cfg.record_size;
        let mut buf = vec![0u8; rs];
        let mut f = &self.file;
        for i in 0..self.cfg.capacity {
            let off = i as u64 * rs as u64;
            f.seek(SeekFrom::Start(off))
                .io_context(|| format!("seek {} to {}", self.path.display(), off))?;
            f.read_exact(&mut buf)
                .io_context(|| format!("read slot at {} in {}", off, self.path.display()))?;
            if let Slot::Occupied(e) = decode(&buf)? {
                if pred(&e) {
                    return Ok(Some(SlotHandle {
                        identity: i + 1,
                        offset: off,
                    }));
                }
            }
        }
        Ok(None)
    }

    /// Re-read the file and compare every slot with the mirror.
    pub fn verify(&self) -> Result<VerifyReport> {
        let file_len = self
            .file
            .metadata()
            .io_context(|| format!("stat {}", self.path.display()))?
            .len();
        let mut report = VerifyReport {
            file_len,
            expected_len: self.cfg.file_len(),
            slots: self.cfg.capacity,
            ..Default::default()
        };

        let rs = self.cfg.record_size;
        let raw = self.read_raw()?;
        for (i, chunk) in raw.chunks_exact(rs).enumerate() {
            let slot_id = i as u32 + 1;
            let on_disk = decode(chunk)?.into_option();
            if on_disk.is_some() {
                report.occupied += 1;
            }
            if on_disk.as_ref() != self.mirror.get(slot_id) {
                report.mismatches.push(slot_id);
            }
        }
        Ok(report)
    }

    fn read_raw(&self) -> Result<Vec<u8>> {
        let len = self.cfg.file_len() as usize;
        let mut raw = vec![0u8; len];
        let mut f = &self.file;
        f.seek(SeekFrom::Start(0))
            .io_context(|| format!("seek {} to 0", self.path.display()))?;
        f.read_exact(&mut raw)
            .io_context(|| format!("read {}", self.path.display()))?;
        Ok(raw)
    }
}
