//! Static obstacle contours subtracted from the walkable area.

use nav_graph::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A convex obstacle contour. At bake time the contour is inflated by the
/// agent clearance radius and punched into the walkable polygon as a hole.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    points: Vec<Vec2>,
}

impl Obstacle {
    pub fn convex(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle, the common case for wall colliders.
    pub fn rect(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            points: vec![
                Vec2::new(center.x - half_extents.x, center.y - half_extents.y),
                Vec2::new(center.x + half_extents.x, center.y - half_extents.y),
                Vec2::new(center.x + half_extents.x, center.y + half_extents.y),
                Vec2::new(center.x - half_extents.x, center.y + half_extents.y),
            ],
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Minkowski-style inflation: every vertex is pushed away from the
    /// contour centroid by `radius`, so an agent of that radius keeps
    /// clearance from the original shape.
    pub fn inflated(&self, radius: f32) -> Vec<Vec2> {
        if self.points.is_empty() {
            return Vec::new();
        }
        let mut centroid = Vec2::ZERO;
        for &p in &self.points {
            centroid += p;
        }
        let centroid = centroid / self.points.len() as f32;

        self.points
            .iter()
            .map(|&p| p + (p - centroid).normalized_or_zero() * radius)
            .collect()
    }
}
