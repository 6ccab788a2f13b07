//! Collision detection
//!
//! Everything in the runner collides as a point against an axis-aligned box:
//! an entity's location must fall inside the player's sprite frame.

use glam::Vec2;

/// Axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box centered at `center` covering a `size` frame
    pub fn from_frame(center: Vec2, size: Vec2) -> Self {
        Self::new(center, size * 0.5)
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Inclusive containment test on both axes
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        (min.x..=max.x).contains(&point.x) && (min.y..=max.y).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_center_and_edges() {
        let aabb = Aabb::from_frame(Vec2::new(100.0, 100.0), Vec2::new(48.0, 48.0));
        assert!(aabb.contains_point(Vec2::new(100.0, 100.0)));
        // Edges are inclusive
        assert!(aabb.contains_point(Vec2::new(124.0, 76.0)));
        assert!(aabb.contains_point(Vec2::new(76.0, 124.0)));
    }

    #[test]
    fn test_requires_both_axes() {
        let aabb = Aabb::from_frame(Vec2::new(100.0, 100.0), Vec2::new(48.0, 48.0));
        // Inside horizontally, outside vertically
        assert!(!aabb.contains_point(Vec2::new(100.0, 130.0)));
        // Inside vertically, outside horizontally
        assert!(!aabb.contains_point(Vec2::new(60.0, 100.0)));
    }

    #[test]
    fn test_non_finite_point_never_collides() {
        let aabb = Aabb::from_frame(Vec2::ZERO, Vec2::splat(48.0));
        assert!(!aabb.contains_point(Vec2::new(f32::NAN, 0.0)));
    }
}
