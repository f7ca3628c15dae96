//! Star Shooter - a single-screen vertical shoot-'em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, session state)
//! - `highscores`: Score keeping on top of the highscore store
//! - `persistence`: Highscore store (JSON file, in-memory)
//! - `settings`: Tunable game settings
//! - `audio`: Maps simulation effects to sound triggers
//! - `assets`: Preflight check for required image/sound files
//! - `platform`: Terminal input tracking and frame pacing
//! - `renderer`: Terminal renderer for the per-tick render frame

pub mod assets;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::ScoreKeeper;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 720.0;
    /// Horizontal margin the player may not cross, at the base field width
    pub const FIELD_MARGIN: f32 = 20.0;

    /// Target simulation rate
    pub const TARGET_FPS: u32 = 60;
    /// Largest elapsed-time delta fed into a single tick (ms)
    pub const MAX_FRAME_MS: u32 = 100;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 6.0; // pixels per tick
    pub const PLAYER_COOLDOWN_MS: u32 = 300;
    pub const PLAYER_MAX_LIVES: u32 = 3;
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Distance from the bottom edge to the ship's centre
    pub const PLAYER_BOTTOM_OFFSET: f32 = 70.0;
    pub const INVULNERABILITY_MS: u32 = 1200;

    /// Bullets travel upward
    pub const BULLET_SPEED: f32 = -9.0; // pixels per tick
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;

    /// Enemies spawn with their centre at least this far from either edge
    pub const ENEMY_SPAWN_INSET: f32 = 30.0;
    /// Enemies spawn with their bottom edge this far above the field
    pub const ENEMY_SPAWN_ABOVE: f32 = 10.0;
    /// Minimum time between two Hard spawns
    pub const HARD_SPAWN_COOLDOWN_MS: u64 = 5000;

    /// Decorative background
    pub const STAR_COUNT: usize = 40;
}
