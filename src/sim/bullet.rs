//! Player projectile

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::consts::*;

/// A bullet flying straight up at a fixed speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Entity,
    /// Vertical velocity in pixels per tick (negative = up)
    pub vel: f32,
}

impl Bullet {
    /// Spawn a bullet centred on the given point (the ship's nose)
    pub fn new(center: Vec2) -> Self {
        Self {
            body: Entity::from_center(center, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT)),
            vel: BULLET_SPEED,
        }
    }

    /// Advance one tick; expires once fully above the field
    pub fn update(&mut self) {
        self.body.pos.y += self.vel;
        if self.body.bottom() < 0.0 {
            self.body.kill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_moves_up_and_expires() {
        let mut bullet = Bullet::new(Vec2::new(100.0, 20.0));
        bullet.update();
        assert!(bullet.body.alive);
        assert_eq!(bullet.body.center().y, 11.0);

        // bottom is at 17 now; two more ticks put it below zero
        bullet.update();
        assert!(bullet.body.alive);
        bullet.update();
        assert!(!bullet.body.alive);
    }
}
