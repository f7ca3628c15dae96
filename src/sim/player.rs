//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::entity::Entity;
use super::session::TickInput;
use super::state::GameConfig;
use crate::consts::*;

/// Horizontally moving, cooldown-gated shooter with lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    pub lives: u32,
    pub max_lives: u32,
    /// Session time of the last shot (None = never fired)
    pub last_shot_ms: Option<u64>,
    /// Remaining invulnerability after a hit
    pub invulnerable_ms: u32,
    pub base_speed: f32,
    pub base_cooldown_ms: u32,
    /// Speed and cooldown degrade with lost lives
    pub lives_scaling: bool,
    /// Allowed horizontal range for the ship's edges
    min_x: f32,
    max_x: f32,
}

impl Player {
    /// Spawn centred horizontally near the bottom of the field
    pub fn new(config: &GameConfig) -> Self {
        let center = Vec2::new(
            config.field_width / 2.0,
            config.field_height - PLAYER_BOTTOM_OFFSET,
        );
        let margin = config.margin();
        Self {
            body: Entity::from_center(center, Vec2::splat(config.ship_size)),
            lives: config.max_lives,
            max_lives: config.max_lives,
            last_shot_ms: None,
            invulnerable_ms: 0,
            base_speed: config.player_speed,
            base_cooldown_ms: config.player_cooldown_ms,
            lives_scaling: config.lives_scaling,
            min_x: margin,
            max_x: config.field_width - margin,
        }
    }

    /// Current horizontal speed (pixels per tick)
    pub fn speed(&self) -> f32 {
        if self.lives_scaling {
            self.base_speed * (0.7 + 0.1 * self.lives as f32)
        } else {
            self.base_speed
        }
    }

    /// Current minimum time between shots
    pub fn cooldown_ms(&self) -> f32 {
        let base = self.base_cooldown_ms as f32;
        if self.lives_scaling {
            let lost = self.max_lives.saturating_sub(self.lives) as f32;
            base * (1.0 + 0.15 * lost)
        } else {
            base
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ms > 0
    }

    /// Move by one tick of input and run down the invulnerability timer
    pub fn update(&mut self, dt_ms: u32, input: &TickInput) {
        let mut dx = 0.0;
        if input.move_left {
            dx -= self.speed();
        }
        if input.move_right {
            dx += self.speed();
        }
        self.body.pos.x += dx;

        if self.body.left() < self.min_x {
            self.body.pos.x = self.min_x;
        }
        if self.body.right() > self.max_x {
            self.body.pos.x = self.max_x - self.body.size.x;
        }

        self.invulnerable_ms = self.invulnerable_ms.saturating_sub(dt_ms);
    }

    pub fn can_shoot(&self, now_ms: u64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) as f32 >= self.cooldown_ms(),
        }
    }

    /// Fire from the ship's nose if the cooldown allows
    pub fn shoot(&mut self, now_ms: u64) -> Option<Bullet> {
        if !self.can_shoot(now_ms) {
            return None;
        }
        self.last_shot_ms = Some(now_ms);
        Some(Bullet::new(Vec2::new(self.body.center().x, self.body.top())))
    }

    /// Take a hit. Returns true if a life was lost.
    pub fn hit(&mut self) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invulnerable_ms = INVULNERABILITY_MS;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}
