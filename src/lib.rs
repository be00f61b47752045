#![allow(non_snake_case)]

// Базовые модули
pub mod consts;
pub mod error;
pub mod config;
pub mod metrics;
pub mod lock;

// Формат записи и codec
pub mod record;  // src/record/{mod,codec}.rs

// Зеркало, поиск, подписки
pub mod mirror;
pub mod search;
pub mod subs;

// Slot store
pub mod store;   // src/store/{mod,core,ops,scan}.rs

// Валидация входных записей (CLI / импорт)
pub mod validate;

// Удобные реэкспорты
pub use config::{StoreBuilder, StoreConfig};
pub use error::{Result, StoreError};
pub use mirror::Mirror;
pub use record::{Employee, Gender, Slot};
pub use search::SearchStrategy;
pub use store::{SlotHandle, SlotStore, VerifyReport};
pub use subs::{ObserverHandle, ObserverRegistry};
