//! Portal extraction and funnel path smoothing.
//!
//! A node path through the mesh crosses one internal line per step; each
//! crossing is a portal, oriented left/right relative to the direction of
//! travel. The funnel pass then collapses the portal sequence into the
//! shortest polyline that stays inside the corridor.

use nav_graph::{GraphView, NodeIndex, Vec2};

use crate::polygon::Polygon;

/// An oriented crossing segment. Degenerate portals (both endpoints equal)
/// bound the path at the true start and goal positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portal {
    pub left: Vec2,
    pub right: Vec2,
}

impl Portal {
    pub fn point(p: Vec2) -> Self {
        Self { left: p, right: p }
    }

    pub fn is_degenerate(&self) -> bool {
        self.left == self.right
    }
}

/// Converts a node path into its portal sequence.
///
/// The first and last path nodes are taken by position (they are the
/// synthetic start/end splices); every interior node contributes its source
/// line, oriented by the travel direction from the previous path position.
pub fn find_portals<G: GraphView>(node_path: &[NodeIndex], graph: &G, polygon: &Polygon) -> Vec<Portal> {
    let (Some(&first), Some(&last)) = (node_path.first(), node_path.last()) else {
        return Vec::new();
    };
    let (Some(start), Some(goal)) = (graph.node_position(first), graph.node_position(last)) else {
        return Vec::new();
    };

    let mut portals = Vec::with_capacity(node_path.len() + 1);
    portals.push(Portal::point(start));

    let mut previous = start;
    let interior = node_path
        .get(1..node_path.len().saturating_sub(1))
        .unwrap_or(&[]);
    for &index in interior {
        let Some(node) = graph.node(index) else {
            continue;
        };
        let Some(line) = node.line_index().and_then(|l| polygon.line(l)) else {
            continue;
        };

        // Orient the crossing so left/right match the travel direction.
        let dir = line.midpoint() - previous;
        let s1 = dir.perp_dot(line.p1 - previous);
        let s2 = dir.perp_dot(line.p2 - previous);
        let (left, right) = if s1 >= s2 {
            (line.p1, line.p2)
        } else {
            (line.p2, line.p1)
        };
        portals.push(Portal { left, right });

        previous = node.position();
    }

    // Degenerate end portal forces the funnel to emit the goal.
    portals.push(Portal::point(goal));
    portals
}

/// Funnel pass: collapses a portal sequence into the minimal polyline
/// through it. The first portal is expected to be the degenerate start, the
/// last the degenerate goal.
pub fn string_pull(portals: &[Portal]) -> Vec<Vec2> {
    let Some(first) = portals.first() else {
        return Vec::new();
    };
    let start = first.left;
    let mut path = vec![start];

    let mut apex = start;
    let mut left = first.left;
    let mut right = first.right;
    let mut left_index = 0usize;
    let mut right_index = 0usize;

    let mut i = 1;
    while i < portals.len() {
        let p_left = portals[i].left;
        let p_right = portals[i].right;

        // Tighten the right leg: the new right endpoint narrows the funnel
        // when it sits on or left of the current right leg.
        if area2(apex, right, p_right) >= 0.0 {
            if apex == right || area2(apex, left, p_right) < 0.0 {
                right = p_right;
                right_index = i;
            } else {
                // Right leg crossed the left leg: the left corner is a
                // path vertex; restart the funnel from it.
                path.push(left);
                apex = left;
                let restart = left_index;
                left = apex;
                right = apex;
                left_index = restart;
                right_index = restart;
                i = restart + 1;
                continue;
            }
        }

        // Tighten the left leg, symmetrically.
        if area2(apex, left, p_left) <= 0.0 {
            if apex == left || area2(apex, right, p_left) > 0.0 {
                left = p_left;
                left_index = i;
            } else {
                path.push(right);
                apex = right;
                let restart = right_index;
                left = apex;
                right = apex;
                left_index = restart;
                right_index = restart;
                i = restart + 1;
                continue;
            }
        }

        i += 1;
    }

    if let Some(goal) = portals.last().map(|p| p.left) {
        if path.last().copied() != Some(goal) {
            path.push(goal);
        }
    }
    path
}

fn area2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}
