//! Decorative parallax starfield

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Radius in pixels (1 or 2); bigger stars fall faster
    pub size: u8,
    /// Pixels per tick
    pub speed: f32,
}

/// Scrolling background; has no effect on gameplay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarField {
    pub stars: Vec<Star>,
    width: f32,
    height: f32,
}

impl StarField {
    pub fn new(count: usize, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let (width, height) = (width.max(0.0), height.max(0.0));
        let stars = (0..count)
            .map(|_| {
                let size: u8 = rng.random_range(1..=2);
                Star {
                    pos: Vec2::new(
                        rng.random_range(0.0..=width),
                        rng.random_range(0.0..=height),
                    ),
                    size,
                    speed: rng.random_range(0.5..1.2) * size as f32,
                }
            })
            .collect();
        Self {
            stars,
            width,
            height,
        }
    }

    /// Scroll down; stars leaving the bottom wrap to a random column at the top
    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.pos.y += star.speed;
            if star.pos.y > self.height {
                star.pos.x = rng.random_range(0.0..=self.width);
                star.pos.y = -5.0;
            }
        }
    }
}
