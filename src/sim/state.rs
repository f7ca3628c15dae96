//! Session configuration, phases, effect events and the render frame
//!
//! Everything the simulation exposes to its collaborators lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Tier;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen by the pause toggle
    Paused,
    /// Lives exhausted; waiting for reset
    GameOver,
}

/// How destroyed enemies are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Easy=2, Medium=5, Hard=10
    #[default]
    Tiered,
    /// Same value for every tier
    Flat { points: u64 },
}

impl ScoringPolicy {
    pub fn points_for(self, tier: Tier) -> u64 {
        match self {
            ScoringPolicy::Tiered => tier.score_value(),
            ScoringPolicy::Flat { points } => points,
        }
    }
}

/// Tunables consumed by the simulation core
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    /// Base horizontal speed (pixels per tick)
    pub player_speed: f32,
    pub player_cooldown_ms: u32,
    pub max_lives: u32,
    pub ship_size: f32,
    /// Speed and fire rate degrade as lives are lost
    pub lives_scaling: bool,
    pub scoring: ScoringPolicy,
    pub star_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_cooldown_ms: PLAYER_COOLDOWN_MS,
            max_lives: PLAYER_MAX_LIVES,
            ship_size: PLAYER_SIZE,
            lives_scaling: true,
            scoring: ScoringPolicy::Tiered,
            star_count: STAR_COUNT,
        }
    }
}

impl GameConfig {
    /// Player margin, scaled with the field width
    pub fn margin(&self) -> f32 {
        FIELD_MARGIN * self.field_width / FIELD_WIDTH
    }
}

/// Side effects produced by a tick, consumed by audio/visual collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A session (re)started
    GameStarted,
    /// Start the background loop
    MusicStart,
    /// Stop the background loop
    MusicStop,
    ShotFired,
    /// An enemy was destroyed by a bullet (explosion at `pos`)
    EnemyDestroyed { tier: Tier, pos: Vec2, points: u64 },
    /// The player lost a life
    PlayerHit { lives: u32 },
    GameOver { score: u64 },
    /// The final score beat the stored highscore
    NewRecord { score: u64 },
}

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Star,
    Player,
    Bullet,
    Enemy(Tier),
}

/// A visible object in the render frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Top-left corner in field coordinates
    pub pos: Vec2,
    pub size: Vec2,
}

/// Per-tick snapshot handed to the renderer (back to front)
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub field: Vec2,
    pub sprites: Vec<Sprite>,
    pub lives: u32,
    pub max_lives: u32,
    pub score: u64,
    pub highscore: u64,
    pub paused: bool,
    pub game_over: bool,
    /// The finished game beat the stored highscore
    pub new_record: bool,
    /// Player is blinking after a hit
    pub player_invulnerable: bool,
    /// Session clock, for animation
    pub clock_ms: u64,
}
