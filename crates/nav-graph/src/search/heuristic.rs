//! Distance heuristics for A*.
//!
//! All of these are admissible for graphs whose connection costs are
//! Euclidean distances between node positions: Euclidean is the true
//! straight-line lower bound, and Manhattan/Chebyshev as used here are
//! scaled to stay below it.

use crate::math::Vec2;

/// Manhattan distance, scaled down so it never exceeds the Euclidean
/// distance (|dx| + |dy| <= sqrt(2) * straight-line distance).
pub fn manhattan(a: Vec2, b: Vec2) -> f32 {
    ((b.x - a.x).abs() + (b.y - a.y).abs()) * core::f32::consts::FRAC_1_SQRT_2
}

/// Straight-line distance.
pub fn euclidean(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Chessboard distance: max(|dx|, |dy|). Always a lower bound on the
/// Euclidean distance.
pub fn chebyshev(a: Vec2, b: Vec2) -> f32 {
    (b.x - a.x).abs().max((b.y - a.y).abs())
}

/// No estimate; turns A* into Dijkstra.
pub fn zero(_a: Vec2, _b: Vec2) -> f32 {
    0.0
}
