//! Navigation-graph construction from a triangulated polygon.

use nav_graph::{Graph, GraphError, GraphView, NavNode, NodeIndex};
use tracing::debug;

use crate::polygon::Polygon;

pub(crate) struct BuiltGraph {
    pub graph: Graph,
    /// Node index per line index; `None` for boundary lines.
    pub line_nodes: Vec<Option<NodeIndex>>,
}

/// Builds the navigation graph: one node per internal line at its midpoint,
/// and per triangle a connection between each pair of its internal-edge
/// nodes, costed by Euclidean distance.
pub(crate) fn build_nav_graph(polygon: &Polygon) -> Result<BuiltGraph, GraphError> {
    let mut graph = Graph::new();
    let mut line_nodes = vec![None; polygon.lines().len()];

    for line in polygon.lines() {
        if polygon.triangles_from_line(line.index).len() > 1 {
            let index = graph.next_node_index();
            graph.add_node(NavNode::with_line(index, line.index, line.midpoint()))?;
            line_nodes[line.index] = Some(index);
        }
    }

    let mut connection_pairs = 0usize;
    for triangle in polygon.triangles() {
        let nodes: Vec<NodeIndex> = triangle
            .lines
            .iter()
            .filter_map(|&line| line_nodes[line])
            .collect();

        // Triangles with fewer than two internal edges contribute nothing.
        match *nodes.as_slice() {
            [a, b] => {
                connect(&mut graph, a, b)?;
                connection_pairs += 1;
            }
            [a, b, c] => {
                connect(&mut graph, a, b)?;
                connect(&mut graph, b, c)?;
                connect(&mut graph, c, a)?;
                connection_pairs += 3;
            }
            _ => {}
        }
    }

    debug!(
        lines = polygon.lines().len(),
        nodes = graph.live_node_count(),
        connection_pairs,
        "built navigation graph"
    );

    Ok(BuiltGraph { graph, line_nodes })
}

fn connect(graph: &mut Graph, a: NodeIndex, b: NodeIndex) -> Result<(), GraphError> {
    let pa = graph.node_position(a).ok_or(GraphError::InvalidNode(a))?;
    let pb = graph.node_position(b).ok_or(GraphError::InvalidNode(b))?;
    graph.add_connection_pair(a, b, pa.distance(pb))
}
