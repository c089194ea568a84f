//! Deterministic simulation module
//!
//! All rules and physics logic lives here. This module must be pure and deterministic:
//! - Ordered sets/maps only (stable iteration by cell address)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod body;
pub mod bubble;
pub mod collision;
pub mod feed;
pub mod grid;
pub mod physics;
pub mod resolver;

pub use body::{BodyId, PhysicsBody, Shape};
pub use bubble::{BubbleColor, BubbleId, BubbleKind, CellAddress, GameBubble, PowerKind};
pub use collision::{
    bodies_collide, box_box_collision, circle_box_collision, circle_circle_collision, shapes_overlap,
};
pub use feed::BubbleFeed;
pub use grid::{GridError, GridModel, HexGrid};
pub use physics::{CollisionHandler, PhysicsWorld};
pub use resolver::{ChainResolver, Resolution};
