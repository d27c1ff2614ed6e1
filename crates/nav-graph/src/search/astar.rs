//! A* best-first search.

use std::collections::BinaryHeap;

use super::{quantize, OpenRecord};
use crate::graph::{Connection, GraphView, NodeIndex};
use crate::math::Vec2;

/// Finds the cheapest path from `start` to `goal`, inclusive of both.
///
/// `heuristic` estimates the remaining cost between two positions. It must
/// never overestimate the true remaining cost if the result is required to
/// be optimal; [`heuristic::manhattan`](super::heuristic::manhattan) and
/// [`heuristic::euclidean`](super::heuristic::euclidean) both qualify for
/// graphs whose connection costs are Euclidean distances.
///
/// Returns `None` when the goal is unreachable or either endpoint is not a
/// valid node. An unreachable goal is an expected outcome, not an error.
pub fn find_path<G, H>(graph: &G, start: NodeIndex, goal: NodeIndex, heuristic: H) -> Option<Vec<NodeIndex>>
where
    G: GraphView,
    H: Fn(Vec2, Vec2) -> f32,
{
    find_path_filtered(graph, start, goal, heuristic, |_| true)
}

/// [`find_path`] with a connection filter: connections for which `allow`
/// returns false are never expanded. Used by goal bounding to prune
/// provably useless branches; the filter must keep at least one optimal
/// path intact for the result to stay optimal.
pub fn find_path_filtered<G, H, F>(
    graph: &G,
    start: NodeIndex,
    goal: NodeIndex,
    heuristic: H,
    mut allow: F,
) -> Option<Vec<NodeIndex>>
where
    G: GraphView,
    H: Fn(Vec2, Vec2) -> f32,
    F: FnMut(&Connection) -> bool,
{
    if !graph.is_node_valid(start) || !graph.is_node_valid(goal) {
        debug_assert!(false, "search endpoints must be valid nodes");
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let goal_pos = graph.node_position(goal)?;
    let h = |node: NodeIndex| -> u32 {
        graph
            .node_position(node)
            .map_or(0, |p| quantize(heuristic(p, goal_pos)))
    };

    let n = graph.node_count();
    let mut open = BinaryHeap::new();
    let mut g_score = vec![u32::MAX; n];
    let mut came_from: Vec<Option<NodeIndex>> = vec![None; n];
    let mut tie: u64 = 0;

    g_score[start] = 0;
    open.push(OpenRecord {
        f: h(start),
        g: 0,
        node: start,
        tie,
    });
    tie += 1;

    while let Some(record) = open.pop() {
        if record.node == goal {
            return Some(reconstruct(&came_from, goal));
        }

        if record.g != g_score[record.node] {
            // Stale heap entry; a cheaper route was found after this push.
            continue;
        }

        for connection in graph.connections_from(record.node) {
            if !graph.is_node_valid(connection.to) || !allow(connection) {
                continue;
            }

            let tentative_g = record.g.saturating_add(quantize(connection.cost));
            if tentative_g >= g_score[connection.to] {
                continue;
            }

            came_from[connection.to] = Some(record.node);
            g_score[connection.to] = tentative_g;
            open.push(OpenRecord {
                f: tentative_g.saturating_add(h(connection.to)),
                g: tentative_g,
                node: connection.to,
                tie,
            });
            tie += 1;
        }
    }

    None
}

fn reconstruct(came_from: &[Option<NodeIndex>], goal: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        current = prev;
        path.push(current);
    }
    path.reverse();
    path
}
