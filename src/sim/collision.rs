//! Axis-aligned bounding boxes
//!
//! Everything in the runner is a rectangle, so collision is a strict
//! interval overlap on both axes. Touching edges do not count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in play-field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn from_pos_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        aabb_overlap(self, other)
    }
}

/// Check if two boxes overlap.
///
/// Uses strict inequalities: boxes sharing an edge are adjacent, not overlapping.
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_overlap() {
        let player = Aabb::new(10.0, 10.0, 40.0, 40.0);
        let obstacle = Aabb::new(40.0, 10.0, 40.0, 40.0);
        assert!(aabb_overlap(&player, &obstacle));
        assert!(obstacle.overlaps(&player));
    }

    #[test]
    fn test_adjacent_is_not_overlap() {
        let player = Aabb::new(10.0, 10.0, 40.0, 40.0);
        let obstacle = Aabb::new(50.0, 10.0, 40.0, 40.0);
        assert!(!aabb_overlap(&player, &obstacle));
        assert!(!obstacle.overlaps(&player));
    }

    #[test]
    fn test_vertical_edge_contact() {
        // Player standing exactly on top of a box
        let player = Aabb::new(100.0, 320.0, 40.0, 40.0);
        let obstacle = Aabb::new(90.0, 360.0, 40.0, 40.0);
        assert!(!player.overlaps(&obstacle));

        // One pixel lower and they touch
        let player = Aabb::new(100.0, 321.0, 40.0, 40.0);
        assert!(player.overlaps(&obstacle));
    }

    #[test]
    fn test_containment() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(25.0, 25.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_center_and_max() {
        let b = Aabb::new(10.0, 20.0, 40.0, 80.0);
        assert_eq!(b.max(), Vec2::new(50.0, 100.0));
        assert_eq!(b.center(), Vec2::new(30.0, 60.0));
    }
}
