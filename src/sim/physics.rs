//! Fixed-step physics world
//!
//! Each `step` moves every moving body by its velocity and checks the bodies
//! that moved against everything else. The world does not own bodies; the host
//! passes the current slice in every step.

use std::collections::BTreeSet;

use super::body::{PhysicsBody, Shape};
use super::collision::shapes_overlap;

/// Receives contacts found during a step
///
/// For circle/box contacts the circle always comes first.
pub trait CollisionHandler {
    fn handle_collision(&mut self, a: &PhysicsBody, b: &PhysicsBody);
}

impl<F> CollisionHandler for F
where
    F: FnMut(&PhysicsBody, &PhysicsBody),
{
    fn handle_collision(&mut self, a: &PhysicsBody, b: &PhysicsBody) {
        self(a, b)
    }
}

/// Moves bodies and reports their collisions
#[derive(Default)]
pub struct PhysicsWorld {
    handler: Option<Box<dyn CollisionHandler>>,
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler contacts are reported to (replaces any previous one)
    pub fn set_collision_handler(&mut self, handler: impl CollisionHandler + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Unregister and return the current handler
    pub fn take_collision_handler(&mut self) -> Option<Box<dyn CollisionHandler>> {
        self.handler.take()
    }

    /// Advance the world by one step
    ///
    /// Bodies are processed in slice order: a moving body is advanced and then
    /// immediately tested against every body, so bodies later in the slice are
    /// seen at their previous position. Each colliding pair is reported at most
    /// once per step. Returns the number of distinct contacts, whether or not a
    /// handler is registered.
    pub fn step(&mut self, bodies: &mut [PhysicsBody]) -> usize {
        let mut reported: BTreeSet<(usize, usize)> = BTreeSet::new();

        for i in 0..bodies.len() {
            if !bodies[i].advance() {
                continue;
            }

            let view: &[PhysicsBody] = bodies;
            let mover = &view[i];
            for (j, other) in view.iter().enumerate() {
                // Identity is the slice index; ids may repeat across bodies
                if j == i || !shapes_overlap(mover, other) {
                    continue;
                }
                if !reported.insert((i.min(j), i.max(j))) {
                    continue;
                }

                let (a, b) = match (mover.shape, other.shape) {
                    (Shape::Box { .. }, Shape::Circle { .. }) => (other, mover),
                    _ => (mover, other),
                };
                log::trace!("Contact {:?} <-> {:?}", a.id, b.id);
                if let Some(handler) = self.handler.as_mut() {
                    handler.handle_collision(a, b);
                }
            }
        }

        reported.len()
    }
}
