//! Game settings and preferences
//!
//! Loaded from a JSON file next to the game. Any field may be omitted; a
//! missing or unreadable file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::persistence::file::DEFAULT_HIGHSCORE_FILE;
use crate::sim::{GameConfig, ScoringPolicy};

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Smallest field width or height handed to the simulation
pub const MIN_FIELD_EXTENT: f32 = 100.0;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,
    pub target_fps: u32,

    // === Player ===
    /// Pixels per tick at full lives
    pub player_speed: f32,
    pub player_cooldown_ms: u32,
    pub max_lives: u32,
    pub ship_size: f32,
    /// Speed and fire rate drop as lives are lost
    pub lives_scaling: bool,

    // === Rules ===
    pub scoring: ScoringPolicy,

    // === Background ===
    pub star_count: usize,

    // === Files ===
    pub highscore_file: PathBuf,
    /// Directory containing `assets/ships` and `assets/sounds`
    pub asset_root: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background loop volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            target_fps: TARGET_FPS,

            player_speed: PLAYER_SPEED,
            player_cooldown_ms: PLAYER_COOLDOWN_MS,
            max_lives: PLAYER_MAX_LIVES,
            ship_size: PLAYER_SIZE,
            lives_scaling: true,

            scoring: ScoringPolicy::Tiered,

            star_count: STAR_COUNT,

            highscore_file: PathBuf::from(DEFAULT_HIGHSCORE_FILE),
            asset_root: PathBuf::from("src"),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Read settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Simulation tunables
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            field_width: self.field_width.max(MIN_FIELD_EXTENT),
            field_height: self.field_height.max(MIN_FIELD_EXTENT),
            player_speed: self.player_speed,
            player_cooldown_ms: self.player_cooldown_ms,
            max_lives: self.max_lives.max(1),
            ship_size: self.ship_size,
            lives_scaling: self.lives_scaling,
            scoring: self.scoring,
            star_count: self.star_count,
        }
    }

    /// Effective sound effect volume (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective background loop volume (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_core() {
        let settings = Settings::default();
        assert_eq!(settings.game_config(), GameConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"max_lives": 4, "ship_size": 70, "scoring": {"kind": "flat", "points": 10}}"#,
        )
        .unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.max_lives, 4);
        assert_eq!(settings.ship_size, 70.0);
        assert_eq!(settings.scoring, ScoringPolicy::Flat { points: 10 });
        assert_eq!(settings.field_width, FIELD_WIDTH);
    }

    #[test]
    fn test_missing_or_bad_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("none.json")), Settings::default());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ nope").unwrap();
        assert!(matches!(Settings::try_load(&bad), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load(&bad), Settings::default());
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.24).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_zero_lives_clamped() {
        let settings = Settings {
            max_lives: 0,
            ..Default::default()
        };
        assert_eq!(settings.game_config().max_lives, 1);
    }

    #[test]
    fn test_bad_field_size_clamped() {
        let settings = Settings {
            field_width: -480.0,
            field_height: f32::NAN,
            ..Default::default()
        };
        let config = settings.game_config();
        assert_eq!(config.field_width, MIN_FIELD_EXTENT);
        assert_eq!(config.field_height, MIN_FIELD_EXTENT);

        // a session can start on the clamped field
        let session = crate::sim::GameSession::new(
            config,
            Box::new(crate::persistence::MemoryStore::new()),
            1,
        );
        assert!(session.starfield.stars.iter().all(|star| star.pos.x <= MIN_FIELD_EXTENT));
    }
}
