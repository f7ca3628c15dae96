//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in explicitly, no hidden clock
//! - Seeded RNG only
//! - Effects (sounds, explosions) are returned as events, never performed
//! - No rendering or platform dependencies

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod session;
pub mod spawn;
pub mod starfield;
pub mod state;

pub use bullet::Bullet;
pub use collision::{CollisionOutcome, resolve};
pub use enemy::{Enemy, Population, Tier};
pub use entity::Entity;
pub use player::Player;
pub use session::{GameSession, TickInput};
pub use spawn::{SpawnDirector, spawn_interval_ms};
pub use starfield::{Star, StarField};
pub use state::{GameConfig, GameEvent, GamePhase, RenderFrame, ScoringPolicy, Sprite, SpriteKind};
