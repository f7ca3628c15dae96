//! JSON file highscore store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HighscoreRecord, HighscoreStore, StoreError};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGHSCORE_FILE: &str = "save_highscore.json";

/// Stores `{"highscore": n}` in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighscoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u64>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: HighscoreRecord = serde_json::from_str(&json)?;
        Ok(Some(record.highscore))
    }

    fn save(&mut self, highscore: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighscoreRecord { highscore })?;
        fs::write(&self.path, json)?;
        log::info!("Highscore {} saved to {}", highscore, self.path.display());
        Ok(())
    }
}
