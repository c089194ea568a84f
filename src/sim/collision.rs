//! Collision detection between circles and axis-aligned boxes
//!
//! Boundary handling differs per pair and is relied on by gameplay:
//! circles count as touching when exactly tangent (`<=`), a circle exactly
//! `radius` away from a box does not (`<`), and boxes sharing an edge do (`<=`).

use glam::Vec2;

use super::body::{PhysicsBody, Shape};

/// Two circles collide when their centers are no further apart than the sum of their radii
#[inline]
pub fn circle_circle_collision(a_center: Vec2, a_radius: f32, b_center: Vec2, b_radius: f32) -> bool {
    (a_center - b_center).length() <= a_radius + b_radius
}

/// A circle collides with a box when the nearest point of the box is strictly inside the circle
pub fn circle_box_collision(center: Vec2, radius: f32, box_origin: Vec2, box_size: Vec2) -> bool {
    // Closest point to the circle within the box
    let closest = box_origin.max(center.min(box_origin + box_size));
    (center - closest).length_squared() < radius * radius
}

/// Axis-aligned boxes collide when they overlap (or touch) on both axes
pub fn box_box_collision(a_origin: Vec2, a_size: Vec2, b_origin: Vec2, b_size: Vec2) -> bool {
    let a_max = a_origin + a_size;
    let b_max = b_origin + b_size;

    let overlap_x = a_max.x >= b_origin.x && b_max.x >= a_origin.x;
    let overlap_y = a_max.y >= b_origin.y && b_max.y >= a_origin.y;

    overlap_x && overlap_y
}

/// Raw shape test for two bodies, dispatching on both shapes
///
/// Ignores identity; callers that may pass a body against itself use
/// `bodies_collide` or exclude it themselves.
pub fn shapes_overlap(a: &PhysicsBody, b: &PhysicsBody) -> bool {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle_collision(a.position, ra, b.position, rb)
        }
        (Shape::Circle { radius }, Shape::Box { size }) => {
            circle_box_collision(a.position, radius, b.position, size)
        }
        (Shape::Box { size }, Shape::Circle { radius }) => {
            circle_box_collision(b.position, radius, a.position, size)
        }
        (Shape::Box { size: sa }, Shape::Box { size: sb }) => {
            box_box_collision(a.position, sa, b.position, sb)
        }
    }
}

/// Check two bodies against each other
///
/// A body never collides with itself (same `BodyId`).
pub fn bodies_collide(a: &PhysicsBody, b: &PhysicsBody) -> bool {
    a.id != b.id && shapes_overlap(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tangent_circles_collide() {
        // Radius 1 each, centers exactly 2 apart
        assert!(circle_circle_collision(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0));
        assert!(!circle_circle_collision(Vec2::ZERO, 1.0, Vec2::new(2.001, 0.0), 1.0));
    }

    #[test]
    fn test_circle_exactly_radius_from_box_misses() {
        // Box spans x in [2, 4]; circle edge just reaches x = 2
        let origin = Vec2::new(2.0, -1.0);
        let size = Vec2::new(2.0, 2.0);
        assert!(!circle_box_collision(Vec2::ZERO, 1.0, Vec2::new(1.0, -1.0), size));
        assert!(!circle_box_collision(Vec2::new(1.0, 0.0), 1.0, origin, size));
        assert!(circle_box_collision(Vec2::new(1.001, 0.0), 1.0, origin, size));
    }

    #[test]
    fn test_tangency_asymmetry_between_pairs() {
        // Same geometric situation, different verdicts
        let circle_touch = circle_circle_collision(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0);
        let box_touch = circle_box_collision(Vec2::ZERO, 1.0, Vec2::new(1.0, -1.0), Vec2::new(2.0, 2.0));
        assert!(circle_touch);
        assert!(!box_touch);
    }

    #[test]
    fn test_circle_inside_box() {
        assert!(circle_box_collision(
            Vec2::new(5.0, 5.0),
            1.0,
            Vec2::ZERO,
            Vec2::new(10.0, 10.0)
        ));
    }

    #[test]
    fn test_circle_near_box_corner() {
        let origin = Vec2::ZERO;
        let size = Vec2::new(1.0, 1.0);
        // Diagonal distance to corner (1, 1) is sqrt(0.5) ~ 0.707
        assert!(circle_box_collision(Vec2::new(1.5, 1.5), 0.75, origin, size));
        assert!(!circle_box_collision(Vec2::new(1.5, 1.5), 0.7, origin, size));
    }

    #[test]
    fn test_boxes_sharing_edge_collide() {
        let size = Vec2::new(2.0, 2.0);
        assert!(box_box_collision(Vec2::ZERO, size, Vec2::new(2.0, 0.0), size));
        assert!(!box_box_collision(Vec2::ZERO, size, Vec2::new(2.5, 0.0), size));
        // Overlap on x only
        assert!(!box_box_collision(Vec2::ZERO, size, Vec2::new(1.0, 3.0), size));
    }

    #[test]
    fn test_body_never_collides_with_itself() {
        let circle = PhysicsBody::circle(1, Vec2::ZERO, 5.0);
        let rect = PhysicsBody::rect(2, Vec2::ZERO, Vec2::ONE);
        assert!(!bodies_collide(&circle, &circle));
        assert!(!bodies_collide(&rect, &rect));
    }

    #[test]
    fn test_shapes_overlap_ignores_ids() {
        let a = PhysicsBody::circle(7, Vec2::ZERO, 1.0);
        let b = PhysicsBody::circle(7, Vec2::new(1.5, 0.0), 1.0);
        assert!(shapes_overlap(&a, &b));
        assert!(!bodies_collide(&a, &b));
    }

    #[test]
    fn test_bodies_collide_dispatch_is_symmetric() {
        let circle = PhysicsBody::circle(1, Vec2::new(0.5, 2.0), 1.5);
        let rect = PhysicsBody::rect(2, Vec2::ZERO, Vec2::ONE);
        assert!(bodies_collide(&circle, &rect));
        assert!(bodies_collide(&rect, &circle));

        let far = PhysicsBody::circle(3, Vec2::new(10.0, 10.0), 1.0);
        assert!(!bodies_collide(&far, &rect));
        assert!(!bodies_collide(&rect, &far));
    }
}
