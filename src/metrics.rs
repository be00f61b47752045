//! Lightweight global metrics for StaffDB.
//!
//! Потокобезопасные атомарные счётчики для подсистем:
//! - Slot store (create/update/delete, запись слотов)
//! - Mirror reads
//! - Search (hit/miss)
//! - Change notification

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Slot store -----
static CREATES: AtomicU64 = AtomicU64::new(0);
static UPDATES: AtomicU64 = AtomicU64::new(0);
static DELETES: AtomicU64 = AtomicU64::new(0);
static SLOT_WRITES: AtomicU64 = AtomicU64::new(0);
static BYTES_WRITTEN: AtomicU64 = AtomicU64::new(0);

// ----- Mirror -----
static MIRROR_READS: AtomicU64 = AtomicU64::new(0);

// ----- Search -----
static SEARCH_HITS: AtomicU64 = AtomicU64::new(0);
static SEARCH_MISSES: AtomicU64 = AtomicU64::new(0);

// ----- Notifications -----
static NOTIFICATIONS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    pub creates: u64,
    pub updates: u64,
    pub deletes: u64,
    pub slot_writes: u64,
    pub bytes_written: u64,

    pub mirror_reads: u64,

    pub search_hits: u64,
    pub search_misses: u64,

    pub notifications: u64,
}

impl MetricsSnapshot {
    pub fn search_hit_ratio(&self) -> f64 {
        let total = self.search_hits + self.search_misses;
        if total == 0 {
            0.0
        } else {
            self.search_hits as f64 / total as f64
        }
    }
}

// ----- Recorders (store) -----
pub fn record_create() {
    CREATES.fetch_add(1, Ordering::Relaxed);
}
pub fn record_update() {
    UPDATES.fetch_add(1, Ordering::Relaxed);
}
pub fn record_delete() {
    DELETES.fetch_add(1, Ordering::Relaxed);
}
pub fn record_slot_write(len: usize) {
    SLOT_WRITES.fetch_add(1, Ordering::Relaxed);
    BYTES_WRITTEN.fetch_add(len as u64, Ordering::Relaxed);
}

// ----- Recorders (mirror/search) -----
pub fn record_mirror_read() {
    MIRROR_READS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_search(hit: bool) {
    if hit {
        SEARCH_HITS.fetch_add(1, Ordering::Relaxed);
    } else {
        SEARCH_MISSES.fetch_add(1, Ordering::Relaxed);
    }
}

// ----- Recorders (notifications) -----
pub fn record_notification() {
    NOTIFICATIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        creates: CREATES.load(Ordering::Relaxed),
        updates: UPDATES.load(Ordering::Relaxed),
        deletes: DELETES.load(Ordering::Relaxed),
        slot_writes: SLOT_WRITES.load(Ordering::Relaxed),
        bytes_written: BYTES_WRITTEN.load(Ordering::Relaxed),
        mirror_reads: MIRROR_READS.load(Ordering::Relaxed),
        search_hits: SEARCH_HITS.load(Ordering::Relaxed),
        search_misses: SEARCH_MISSES.load(Ordering::Relaxed),
        notifications: NOTIFICATIONS.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    for c in [
        &CREATES,
        &UPDATES,
        &DELETES,
        &SLOT_WRITES,
        &BYTES_WRITTEN,
        &MIRROR_READS,
        &SEARCH_HITS,
        &SEARCH_MISSES,
        &NOTIFICATIONS,
    ] {
        c.store(0, Ordering::Relaxed);
    }
}
