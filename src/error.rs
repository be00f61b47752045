use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error ({context}): {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("identity {identity} out of range 1..={capacity}")]
    OutOfRange { identity: u32, capacity: u32 },
    #[error("slot {0} is already occupied")]
    SlotOccupied(u32),
    #[error("slot {0} is empty")]
    SlotEmpty(u32),
    #[error("malformed identity query {0:?}")]
    MalformedQuery(String),
    #[error("stale slot handle (identity={identity}, offset={offset})")]
    StaleHandle { identity: u32, offset: u64 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("data file is {len} bytes, larger than the configured {expected}")]
    FileTooLarge { len: u64, expected: u64 },
    #[error("data file {0} is locked by another store")]
    Locked(PathBuf),
    #[error("slot block too short (got {len}, need {need})")]
    ShortBlock { len: usize, need: usize },
}

impl StoreError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Extension in the spirit of `anyhow::Context` for raw io results.
pub(crate) trait IoContext<T> {
    fn io_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| StoreError::io(f(), e))
    }
}
