//! Axis-aligned body shared by every movable object

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, bounding box and liveness of a simulated object.
///
/// `pos` is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            alive: true,
        }
    }

    /// Build a body centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict AABB overlap; touching edges do not count
    pub fn intersects(&self, other: &Entity) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Mark for removal at the end of the tick
    pub fn kill(&mut self) {
        self.alive = false;
    }
}
