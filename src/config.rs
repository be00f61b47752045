//! Centralized configuration and builder for StaffDB.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - StoreConfig::from_env() reads SDB_* variables on top of defaults.
//! - StoreBuilder collects overrides and opens a SlotStore.
//!
//! Defaults:
//! - capacity = 100 slots (hard upper bound as well)
//! - record_size = 128 bytes per slot
//! - data_fsync = false (no fsync after every slot write; close() always syncs)
//! - exclusive_lock = true (advisory fs2 lock on the data file)

use std::fmt;
use std::path::Path;

use crate::consts::{DEFAULT_CAPACITY, DEFAULT_RECORD_SIZE, MAX_CAPACITY, PAYLOAD_SIZE};
use crate::error::{Result, StoreError};
use crate::store::SlotStore;

/// Top-level configuration for a SlotStore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of fixed slots in the file (1..=100).
    /// Env: SDB_CAPACITY (default 100)
    pub capacity: u32,

    /// Bytes per slot; must be >= the encoded payload size.
    /// Env: SDB_RECORD_SIZE (default 128)
    pub record_size: usize,

    /// Whether to fsync the data file after every slot write.
    /// Env: SDB_DATA_FSYNC (default false; "1|true|on|yes" => true)
    pub data_fsync: bool,

    /// Take an exclusive advisory lock on the data file while the store is open.
    /// Env: SDB_LOCK (default true; "0|false|off|no" => false)
    pub exclusive_lock: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            record_size: DEFAULT_RECORD_SIZE,
            data_fsync: false,
            exclusive_lock: true,
        }
    }
}

fn env_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SDB_CAPACITY") {
            if let Ok(n) = v.trim().parse::<u32>() {
                cfg.capacity = n;
            }
        }

        if let Ok(v) = std::env::var("SDB_RECORD_SIZE") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.record_size = n;
            }
        }

        if let Ok(v) = std::env::var("SDB_DATA_FSYNC") {
            if let Some(on) = env_flag(&v) {
                cfg.data_fsync = on;
            }
        }

        if let Ok(v) = std::env::var("SDB_LOCK") {
            if let Some(on) = env_flag(&v) {
                cfg.exclusive_lock = on;
            }
        }

        cfg
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_record_size(mut self, record_size: usize) -> Self {
        self.record_size = record_size;
        self
    }

    pub fn with_data_fsync(mut self, on: bool) -> Self {
        self.data_fsync = on;
        self
    }

    pub fn with_exclusive_lock(mut self, on: bool) -> Self {
        self.exclusive_lock = on;
        self
    }

    /// Check the capacity bound and that a slot can hold one encoded record.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(StoreError::InvalidConfig(format!(
                "capacity {} outside 1..={}",
                self.capacity, MAX_CAPACITY
            )));
        }
        if self.record_size < PAYLOAD_SIZE {
            return Err(StoreError::InvalidConfig(format!(
                "record_size {} below payload size {}",
                self.record_size, PAYLOAD_SIZE
            )));
        }
        Ok(())
    }

    /// Total file length implied by this config.
    #[inline]
    pub fn file_len(&self) -> u64 {
        self.capacity as u64 * self.record_size as u64
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreConfig {{ capacity: {}, record_size: {}, data_fsync: {}, exclusive_lock: {} }}",
            self.capacity, self.record_size, self.data_fsync, self.exclusive_lock,
        )
    }
}

/// Builder that collects a StoreConfig and opens the store.
#[derive(Clone, Debug)]
pub struct StoreBuilder {
    cfg: StoreConfig,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        // Start from env, then allow overrides.
        Self {
            cfg: StoreConfig::from_env(),
        }
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: StoreConfig::default(),
        }
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.cfg.capacity = capacity;
        self
    }

    pub fn record_size(mut self, record_size: usize) -> Self {
        self.cfg.record_size = record_size;
        self
    }

    pub fn data_fsync(mut self, on: bool) -> Self {
        self.cfg.data_fsync = on;
        self
    }

    pub fn exclusive_lock(mut self, on: bool) -> Self {
        self.cfg.exclusive_lock = on;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.cfg
    }

    pub fn open(self, path: &Path) -> Result<SlotStore> {
        SlotStore::open_with_config(path, self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = StoreConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.file_len(), 100 * 128);
    }

    #[test]
    fn capacity_bounds_are_enforced() {
        assert!(StoreConfig::default().with_capacity(0).validate().is_err());
        assert!(StoreConfig::default().with_capacity(101).validate().is_err());
        assert!(StoreConfig::default().with_capacity(1).validate().is_ok());
    }

    #[test]
    fn record_size_must_hold_payload() {
        let cfg = StoreConfig::default().with_record_size(PAYLOAD_SIZE - 1);
        assert!(matches!(cfg.validate(), Err(StoreError::InvalidConfig(_))));
        assert!(StoreConfig::default()
            .with_record_size(PAYLOAD_SIZE)
            .validate()
            .is_ok());
    }

    #[test]
    fn builder_overrides_fields() {
        let cfg = StoreBuilder::from_default()
            .capacity(10)
            .record_size(200)
            .data_fsync(true)
            .exclusive_lock(false)
            .build();
        assert_eq!(cfg.capacity, 10);
        assert_eq!(cfg.record_size, 200);
        assert!(cfg.data_fsync);
        assert!(!cfg.exclusive_lock);
    }

    #[test]
    fn env_flag_parsing() {
        assert_eq!(env_flag(" Yes "), Some(true));
        assert_eq!(env_flag("off"), Some(false));
        assert_eq!(env_flag("maybe"), None);
    }
}
