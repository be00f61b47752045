//! store — slot store: файл фиксированных слотов + in-memory зеркало (v1.0)
//!
//! Разделение по подмодулям:
//! - core.rs — структура SlotStore, open/close, запись слота, подписки
//! - ops.rs  — create/update/delete/read и fast-path по SlotHandle
//! - scan.rs — чтение слотов из файла: загрузка зеркала, scan_file, verify

pub mod core;
pub mod ops;
pub mod scan;

pub use self::core::{SlotHandle, SlotStore};
pub use self::scan::VerifyReport;
