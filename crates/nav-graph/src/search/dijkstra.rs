//! Dijkstra search: the heuristic-free special case of A*, plus a
//! source-only floodfill.

use std::collections::BinaryHeap;

use super::{dequantize, quantize, OpenRecord};
use crate::graph::{GraphView, NodeIndex};
use crate::search::{astar, heuristic};

/// Finds the cheapest path from `start` to `goal`, inclusive of both.
///
/// Returns `None` when the goal is unreachable.
pub fn find_path<G: GraphView>(graph: &G, start: NodeIndex, goal: NodeIndex) -> Option<Vec<NodeIndex>> {
    astar::find_path(graph, start, goal, heuristic::zero)
}

/// Floodfill with no destination: settles every node reachable from
/// `source` and returns the cheapest cost to each, indexed by node slot.
/// `None` marks nodes that are invalid or unreachable.
///
/// Costs round-trip through the quantized search ordering, so they carry a
/// fixed-point granularity of 1/1024.
pub fn distance_map<G: GraphView>(graph: &G, source: NodeIndex) -> Vec<Option<f32>> {
    let n = graph.node_count();
    let mut distances = vec![None; n];
    if !graph.is_node_valid(source) {
        debug_assert!(false, "floodfill source must be a valid node");
        return distances;
    }

    let mut open = BinaryHeap::new();
    let mut g_score = vec![u32::MAX; n];
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
            open.push(OpenRecord {
                f: tentative_g,
                g: tentative_g,
                node: connection.to,
                tie,
            });
            tie += 1;
        }
    }

    for (index, g) in g_score.into_iter().enumerate() {
        if g != u32::MAX {
            distances[index] = Some(dequantize(g));
        }
    }
    distances
}
