//! Physics bodies
//!
//! A body is position + velocity + shape. Velocities are in units per physics
//! step, not per second.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bubble::GameBubble;

/// Stable body identifier (used to keep a body from colliding with itself)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle centered on the body position
    Circle { radius: f32 },
    /// Axis-aligned box extending `size` from the body position (its minimum corner)
    Box { size: Vec2 },
}

/// A body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub id: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub shape: Shape,
}

impl PhysicsBody {
    pub fn circle(id: u32, center: Vec2, radius: f32) -> Self {
        Self {
            id: BodyId(id),
            position: center,
            velocity: Vec2::ZERO,
            shape: Shape::Circle { radius },
        }
    }

    pub fn rect(id: u32, origin: Vec2, size: Vec2) -> Self {
        Self {
            id: BodyId(id),
            position: origin,
            velocity: Vec2::ZERO,
            shape: Shape::Box { size },
        }
    }

    /// Collision circle for a bubble, shrunk so neighbors in the grid do not touch
    pub fn bubble_hitbox(bubble: &GameBubble, center: Vec2, radius: f32, scale: f32) -> Self {
        Self::circle(bubble.id.0, center, radius * scale)
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Send the body off along `direction` at `speed` units per step
    pub fn launch(&mut self, direction: Vec2, speed: f32) {
        self.velocity = direction.normalize_or_zero() * speed;
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Move by one step of velocity; returns false (and stays put) when stationary
    pub fn advance(&mut self) -> bool {
        if !self.is_moving() {
            return false;
        }
        self.position += self.velocity;
        true
    }

    /// Geometric center
    pub fn center(&self) -> Vec2 {
        match self.shape {
            Shape::Circle { .. } => self.position,
            Shape::Box { size } => self.position + size / 2.0,
        }
    }
}
