//! Highscore persistence
//!
//! Features:
//! - `HighscoreStore` trait so the core never touches the filesystem
//! - JSON file store (`{"highscore": n}`)
//! - In-memory store for tests and headless runs

pub mod file;

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::JsonFileStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable")]
    Unavailable,
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreRecord {
    #[serde(default)]
    pub highscore: u64,
}

/// Somewhere the highscore survives between sessions
pub trait HighscoreStore {
    /// Read the stored highscore; `Ok(None)` when nothing was ever saved
    fn load(&self) -> Result<Option<u64>, StoreError>;

    /// Replace the stored highscore
    fn save(&mut self, highscore: u64) -> Result<(), StoreError>;
}

/// Shared in-memory store. Clones see the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<Option<u64>>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_highscore(highscore: u64) -> Self {
        let store = Self::new();
        store.value.set(Some(highscore));
        store
    }

    /// A store whose reads and writes always fail
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Current stored value, bypassing failure mode
    pub fn stored(&self) -> Option<u64> {
        self.value.get()
    }
}

impl HighscoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u64>, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        Ok(self.value.get())
    }

    fn save(&mut self, highscore: u64) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        self.value.set(Some(highscore));
        Ok(())
    }
}
