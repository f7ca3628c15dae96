//! Enemy ships and their tier table

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::consts::ENEMY_SPAWN_ABOVE;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    /// Hits needed to destroy
    pub fn health(self) -> u32 {
        match self {
            Tier::Easy => 1,
            Tier::Medium => 3,
            Tier::Hard => 5,
        }
    }

    /// Descent speed in pixels per tick
    pub fn speed(self) -> f32 {
        match self {
            Tier::Easy => 2.0,
            Tier::Medium => 2.0,
            Tier::Hard => 1.0,
        }
    }

    /// Square sprite edge length
    pub fn size(self) -> f32 {
        match self {
            Tier::Easy => 40.0,
            Tier::Medium => 55.0,
            Tier::Hard => 75.0,
        }
    }

    /// Points awarded under tiered scoring
    pub fn score_value(self) -> u64 {
        match self {
            Tier::Easy => 2,
            Tier::Medium => 5,
            Tier::Hard => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Easy => "Easy",
            Tier::Medium => "Medium",
            Tier::Hard => "Hard",
        }
    }
}

/// A descending enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Entity,
    pub tier: Tier,
    pub health: u32,
    /// Pixels per tick
    pub speed: f32,
}

impl Enemy {
    /// Spawn just above the field, horizontally centred on `center_x`
    pub fn spawn(tier: Tier, center_x: f32) -> Self {
        let size = tier.size();
        let pos = Vec2::new(center_x - size / 2.0, -ENEMY_SPAWN_ABOVE - size);
        Self::at(tier, pos)
    }

    /// Place an enemy with its top-left corner at `pos`
    pub fn at(tier: Tier, pos: Vec2) -> Self {
        Self {
            body: Entity::new(pos, Vec2::splat(tier.size())),
            tier,
            health: tier.health(),
            speed: tier.speed(),
        }
    }

    /// Descend one tick; expires (without score) once below the field
    pub fn update(&mut self, field_height: f32) {
        self.body.pos.y += self.speed;
        if self.body.top() > field_height {
            self.body.kill();
        }
    }

    /// Take one point of damage. Returns true if this destroyed the enemy.
    pub fn hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.body.kill();
            return true;
        }
        false
    }
}

/// Live enemy counts per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Population {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl Population {
    /// Count the live enemies in a collection
    pub fn count(enemies: &[Enemy]) -> Self {
        let mut population = Self::default();
        for enemy in enemies.iter().filter(|e| e.body.alive) {
            population.add(enemy.tier);
        }
        population
    }

    pub fn add(&mut self, tier: Tier) {
        match tier {
            Tier::Easy => self.easy += 1,
            Tier::Medium => self.medium += 1,
            Tier::Hard => self.hard += 1,
        }
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Easy => self.easy,
            Tier::Medium => self.medium,
            Tier::Hard => self.hard,
        }
    }
}
