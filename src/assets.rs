//! Asset preflight
//!
//! Confirms the sprite and sound files exist before the game starts. Sounds
//! may be shipped as either `.mp3` or `.wav`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::audio::resolve_sound;

/// Required images, relative to the asset root
pub const REQUIRED_IMAGES: [&str; 4] = [
    "assets/ships/player.png",
    "assets/ships/EnemyEasy.png",
    "assets/ships/EnemyMedium.png",
    "assets/ships/EnemyHard.png",
];

/// Required sounds (without extension), relative to the asset root
pub const REQUIRED_SOUNDS: [&str; 5] = [
    "assets/sounds/gunplayer",
    "assets/sounds/deadplayer",
    "assets/sounds/deadenemy",
    "assets/sounds/gamestart",
    "assets/sounds/musicgame",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssetError {
    #[error("{} required asset file(s) missing", .0.len())]
    Missing(Vec<PathBuf>),
}

/// Every required file that is absent under `root`. A missing sound is
/// reported as `<stem>.mp3|.wav`.
pub fn missing_assets(root: &Path) -> Vec<PathBuf> {
    let mut missing: Vec<PathBuf> = REQUIRED_IMAGES
        .iter()
        .map(|rel| root.join(rel))
        .filter(|path| !path.exists())
        .collect();

    for rel in REQUIRED_SOUNDS {
        let base = root.join(rel);
        let (Some(dir), Some(stem)) = (base.parent(), base.file_name()) else {
            continue;
        };
        let stem = stem.to_string_lossy();
        if resolve_sound(dir, &stem).is_none() {
            missing.push(dir.join(format!("{}.mp3|.wav", stem)));
        }
    }

    missing
}

/// Fail with the full list of missing files
pub fn preflight(root: &Path) -> Result<(), AssetError> {
    let missing = missing_assets(root);
    if missing.is_empty() {
        log::info!("All required assets present under {}", root.display());
        Ok(())
    } else {
        for path in &missing {
            log::warn!("Missing asset: {}", path.display());
        }
        Err(AssetError::Missing(missing))
    }
}

/// Startup gate: missing assets are fatal unless explicitly allowed
pub fn startup_check(root: &Path, allow_missing: bool) -> Result<(), AssetError> {
    match preflight(root) {
        Err(AssetError::Missing(paths)) if allow_missing => {
            log::warn!("Starting with {} asset file(s) missing", paths.len());
            Ok(())
        }
        result => result,
    }
}
