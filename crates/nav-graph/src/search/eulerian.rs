//! Eulerian path classification and circuit construction.
//!
//! Standalone graph-theory utility; shares only the graph abstraction with
//! the navigation code. Connections are expected to come in mirrored
//! directed pairs (the navigation convention) and are treated as single
//! undirected edges here.

use crate::graph::{GraphEdit, GraphView, NodeIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eulerianity {
    /// Disconnected, or more than two odd-degree nodes: no walk covers
    /// every edge exactly once.
    NotEulerian,
    /// Exactly two odd-degree nodes: an Eulerian trail exists, starting and
    /// ending at those two nodes.
    SemiEulerian,
    /// Every node has even degree: a closed Eulerian circuit exists.
    Eulerian,
}

/// Classifies a graph by connectivity and odd-degree count.
pub fn classify<G: GraphView>(graph: &G) -> Eulerianity {
    if !is_connected(graph) {
        return Eulerianity::NotEulerian;
    }

    let odd_count = (0..graph.node_count())
        .filter(|&i| graph.is_node_valid(i) && graph.connections_from(i).len() % 2 == 1)
        .count();

    match odd_count {
        0 => Eulerianity::Eulerian,
        2 => Eulerianity::SemiEulerian,
        _ => Eulerianity::NotEulerian,
    }
}

/// Builds an Eulerian trail or circuit with Hierholzer's algorithm, walking
/// an edge-consuming clone of the graph. Returns the node sequence in
/// travel order, or `None` for a [`Eulerianity::NotEulerian`] graph.
pub fn find_circuit<G>(graph: &G) -> Option<Vec<NodeIndex>>
where
    G: GraphView + GraphEdit + Clone,
{
    let eulerianity = classify(graph);

    // Semi-Eulerian trails must start at one of the two odd-degree nodes;
    // a full circuit can start anywhere with edges.
    let start = match eulerianity {
        Eulerianity::NotEulerian => return None,
        Eulerianity::SemiEulerian => (0..graph.node_count()).find(|&i| {
            graph.is_node_valid(i) && graph.connections_from(i).len() % 2 == 1
        })?,
        Eulerianity::Eulerian => (0..graph.node_count())
            .find(|&i| graph.is_node_valid(i) && !graph.connections_from(i).is_empty())?,
    };

    let mut scratch = graph.clone();
    let mut stack: Vec<NodeIndex> = Vec::new();
    let mut circuit: Vec<NodeIndex> = Vec::new();
    let mut location = start;

    loop {
        if scratch.connections_from(location).is_empty() {
            circuit.push(location);
            match stack.pop() {
                Some(previous) => location = previous,
                None => break,
            }
        } else {
            stack.push(location);
            let neighbor = scratch.connections_from(location)[0].to;
            // Consume the undirected edge: both mirrored directions go.
            scratch.remove_connection(location, neighbor).ok()?;
            let _ = scratch.remove_connection(neighbor, location);
            location = neighbor;
        }
    }

    circuit.reverse();
    Some(circuit)
}

fn is_connected<G: GraphView>(graph: &G) -> bool {
    let n = graph.node_count();
    let mut visited = vec![false; n];

    // Start from the first valid node that has connections.
    let Some(start) = (0..n).find(|&i| graph.is_node_valid(i) && !graph.connections_from(i).is_empty())
    else {
        return false;
    };

    let mut stack = vec![start];
    visited[start] = true;
    while let Some(current) = stack.pop() {
        for connection in graph.connections_from(current) {
            let to = connection.to;
            if graph.is_node_valid(to) && !visited[to] {
                visited[to] = true;
                stack.push(to);
            }
        }
    }

    // Every valid node must be reached, isolated nodes included.
    (0..n).all(|i| !graph.is_node_valid(i) || visited[i])
}
