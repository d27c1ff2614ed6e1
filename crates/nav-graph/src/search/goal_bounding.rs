//! Goal-bounding precomputation.
//!
//! For every node `s` and every connection out of `s`, precomputes the
//! axis-aligned bounding box of all destinations whose cheapest path from
//! `s` takes that connection first. At query time a search can skip any
//! connection whose box does not contain the goal position, shrinking the
//! open-set branching factor without giving up optimality.

use std::collections::{BTreeMap, BinaryHeap};

use super::{quantize, OpenRecord};
use crate::graph::{GraphView, NodeIndex};
use crate::math::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_point(p: Vec2) -> Self {
        Self { min: p, max: p }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn union_point(&mut self, p: Vec2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn union(&mut self, other: &Aabb) {
        self.union_point(other.min);
        self.union_point(other.max);
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}

/// Per-source-node table of first-step bounding boxes, keyed by the
/// neighbor the first connection leads to.
#[derive(Debug, Clone, Default)]
pub struct GoalBounds {
    boxes: Vec<BTreeMap<NodeIndex, Aabb>>,
}

impl GoalBounds {
    /// Runs a destination-less floodfill from every valid node and groups
    /// settled destinations by the first connection of their cheapest path.
    pub fn compute<G: GraphView>(graph: &G) -> Self {
        Self::compute_with(graph, |_| None)
    }

    /// [`compute`](Self::compute), additionally unioning each destination's
    /// surrounding region extent into its group box. The navmesh passes the
    /// extents of the triangles adjacent to each node here, so that any
    /// goal position inside a triangle next to a covered node stays inside
    /// the box and pruning cannot cut off the last step of a path.
    pub fn compute_with<G, F>(graph: &G, destination_extent: F) -> Self
    where
        G: GraphView,
        F: Fn(NodeIndex) -> Option<Aabb>,
    {
        let n = graph.node_count();
        let mut boxes = vec![BTreeMap::new(); n];

        for source in 0..n {
            if !graph.is_node_valid(source) {
                continue;
            }
            let roots = first_step_floodfill(graph, source);
            let table = &mut boxes[source];
            for (destination, root) in roots.into_iter().enumerate() {
                let Some(root) = root else { continue };
                let Some(position) = graph.node_position(destination) else {
                    continue;
                };
                let entry = table
                    .entry(root)
                    .and_modify(|aabb: &mut Aabb| aabb.union_point(position))
                    .or_insert_with(|| Aabb::from_point(position));
                if let Some(extent) = destination_extent(destination) {
                    entry.union(&extent);
                }
            }
        }

        Self { boxes }
    }

    /// Number of source-node slots covered by the table.
    pub fn source_count(&self) -> usize {
        self.boxes.len()
    }

    /// Total number of stored (source, first-step) boxes.
    pub fn box_count(&self) -> usize {
        self.boxes.iter().map(BTreeMap::len).sum()
    }

    /// The box stored for the connection `from -> to`, if any.
    pub fn bounds(&self, from: NodeIndex, to: NodeIndex) -> Option<&Aabb> {
        self.boxes.get(from)?.get(&to)
    }

    /// Whether taking the connection `from -> to` is still consistent with
    /// optimally reaching `target`.
    ///
    /// Conservative on unknown input: nodes outside the precomputed table
    /// (synthetic start/end splices) and connections with no recorded box
    /// answer `true`, so pruning on this predicate can never lose a path.
    pub fn is_within_bounds(&self, from: NodeIndex, to: NodeIndex, target: Vec2) -> bool {
        if from >= self.boxes.len() || to >= self.boxes.len() {
            return true;
        }
        match self.boxes[from].get(&to) {
            Some(aabb) => aabb.contains(target),
            None => true,
        }
    }

    /// Grows every box whose corner lies inside some region of the host
    /// geometry to that region's extent, via the caller-provided lookup.
    /// The navmesh passes a triangle-extent lookup here so that goal
    /// positions anywhere inside a covered triangle stay inside the box.
    pub fn refine_with<F>(&mut self, region_extent: F)
    where
        F: Fn(Vec2) -> Option<Aabb>,
    {
        for table in &mut self.boxes {
            for aabb in table.values_mut() {
                for corner in aabb.corners() {
                    if let Some(extent) = region_extent(corner) {
                        aabb.union(&extent);
                    }
                }
            }
        }
    }
}

/// Dijkstra floodfill from `source` that labels every settled node with the
/// first step (the neighbor entered from `source`) of its cheapest path.
/// The label propagates from parent to child as nodes are relaxed.
fn first_step_floodfill<G: GraphView>(graph: &G, source: NodeIndex) -> Vec<Option<NodeIndex>> {
    let n = graph.node_count();
    let mut roots: Vec<Option<NodeIndex>> = vec![None; n];
    let mut g_score = vec![u32::MAX; n];
    let mut open = BinaryHeap::new();
    let mut tie: u64 = 0;

    g_score[source] = 0;
    open.push(OpenRecord {
        f: 0,
        g: 0,
        node: source,
        tie,
    });
    tie += 1;

    while let Some(record) = open.pop() {
        if record.g != g_score[record.node] {
            continue;
        }

        for connection in graph.connections_from(record.node) {
            if !graph.is_node_valid(connection.to) {
                continue;
            }
            let tentative_g = record.g.saturating_add(quantize(connection.cost));
            if tentative_g >= g_score[connection.to] {
                continue;
            }

            g_score[connection.to] = tentative_g;
            roots[connection.to] = if record.node == source {
                Some(connection.to)
            } else {
                roots[record.node]
            };
            open.push(OpenRecord {
                f: tentative_g,
                g: tentative_g,
                node: connection.to,
                tie,
            });
            tie += 1;
        }
    }

    roots[source] = None;
    roots
}
