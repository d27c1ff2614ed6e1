//! Arena-backed graph of navigation nodes and weighted connections.
//!
//! Nodes live in a dense slot array addressed by [`NodeIndex`]. Removing a
//! node leaves its slot empty; indices are never compacted or reused within
//! one graph instance, so an index handed out once stays meaningful for the
//! lifetime of the graph (it merely turns invalid). Cloning a graph is a
//! plain value copy, which is what lets path queries splice temporary nodes
//! into a private copy without touching the canonical graph.

use thiserror::Error;

use crate::math::Vec2;

/// Index of a node slot inside a [`Graph`].
pub type NodeIndex = usize;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("node index {got} does not match next free index {expected}")]
    IndexMismatch { expected: NodeIndex, got: NodeIndex },

    #[error("node index {0} is out of range or removed")]
    InvalidNode(NodeIndex),

    #[error("no connection from {from} to {to}")]
    MissingConnection { from: NodeIndex, to: NodeIndex },
}

pub type Result<T> = core::result::Result<T, GraphError>;

/// A graph node: a stable index, an optional source-line tag, and a world
/// position.
///
/// Nodes created by the navmesh builder carry the index of the mesh line
/// they sit on; synthetic start/end nodes spliced in by a path query carry
/// `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavNode {
    index: NodeIndex,
    line_index: Option<usize>,
    position: Vec2,
}

impl NavNode {
    pub fn new(index: NodeIndex, position: Vec2) -> Self {
        Self {
            index,
            line_index: None,
            position,
        }
    }

    pub fn with_line(index: NodeIndex, line_index: usize, position: Vec2) -> Self {
        Self {
            index,
            line_index: Some(line_index),
            position,
        }
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn line_index(&self) -> Option<usize> {
        self.line_index
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

/// A directed connection with a non-negative traversal cost.
///
/// Mesh connections are added as mirrored pairs, so the graph behaves as
/// undirected for navigation purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub cost: f32,
}

impl Connection {
    pub fn new(from: NodeIndex, to: NodeIndex, cost: f32) -> Self {
        debug_assert!(cost >= 0.0, "connection cost must be non-negative");
        Self { from, to, cost }
    }
}

/// Read access to a graph, as required by the search algorithms.
pub trait GraphView {
    /// Number of allocated node slots, including removed ones. Valid indices
    /// are always `< node_count()`.
    fn node_count(&self) -> usize;

    fn is_node_valid(&self, index: NodeIndex) -> bool;

    fn node(&self, index: NodeIndex) -> Option<&NavNode>;

    /// Outgoing connections of a node in insertion order. Empty for invalid
    /// indices.
    fn connections_from(&self, index: NodeIndex) -> &[Connection];

    fn node_position(&self, index: NodeIndex) -> Option<Vec2> {
        self.node(index).map(NavNode::position)
    }
}

/// Connection removal, as required by edge-consuming algorithms.
pub trait GraphEdit: GraphView {
    fn remove_connection(&mut self, from: NodeIndex, to: NodeIndex) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Option<NavNode>>,
    // Outgoing adjacency, parallel to `nodes`.
    connections: Vec<Vec<Connection>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index the next [`add_node`](Self::add_node) call must carry.
    /// Monotonically increasing; indices of removed nodes are never handed
    /// out again.
    pub fn next_node_index(&self) -> NodeIndex {
        self.nodes.len()
    }

    /// Appends a node. The node's index must equal
    /// [`next_node_index`](Self::next_node_index).
    pub fn add_node(&mut self, node: NavNode) -> Result<NodeIndex> {
        let expected = self.next_node_index();
        if node.index() != expected {
            return Err(GraphError::IndexMismatch {
                expected,
                got: node.index(),
            });
        }
        self.nodes.push(Some(node));
        self.connections.push(Vec::new());
        Ok(expected)
    }

    /// Appends an outgoing connection. Both endpoints must be valid nodes.
    /// No duplicate check is performed; callers own that invariant.
    pub fn add_connection(&mut self, connection: Connection) -> Result<()> {
        if !self.is_node_valid(connection.from) {
            return Err(GraphError::InvalidNode(connection.from));
        }
        if !self.is_node_valid(connection.to) {
            return Err(GraphError::InvalidNode(connection.to));
        }
        self.connections[connection.from].push(connection);
        Ok(())
    }

    /// Adds the mirrored pair of directed connections between two nodes.
    pub fn add_connection_pair(&mut self, a: NodeIndex, b: NodeIndex, cost: f32) -> Result<()> {
        self.add_connection(Connection::new(a, b, cost))?;
        self.add_connection(Connection::new(b, a, cost))
    }

    pub fn remove_connection(&mut self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        let list = self
            .connections
            .get_mut(from)
            .ok_or(GraphError::InvalidNode(from))?;
        let before = list.len();
        list.retain(|c| c.to != to);
        if list.len() == before {
            return Err(GraphError::MissingConnection { from, to });
        }
        Ok(())
    }

    /// Removes a node and every connection incident to it, in either
    /// direction. The slot stays allocated and the index invalid from here
    /// on.
    pub fn remove_node(&mut self, index: NodeIndex) -> Result<NavNode> {
        let node = self
            .nodes
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(GraphError::InvalidNode(index))?;
        self.connections[index].clear();
        for list in &mut self.connections {
            list.retain(|c| c.to != index);
        }
        Ok(node)
    }

    pub fn find_connection(&self, from: NodeIndex, to: NodeIndex) -> Option<&Connection> {
        self.connections.get(from)?.iter().find(|c| c.to == to)
    }

    /// Iterator over the live nodes, in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &NavNode> {
        self.nodes.iter().flatten()
    }

    /// Number of live (non-removed) nodes.
    pub fn live_node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Total number of directed connections.
    pub fn connection_count(&self) -> usize {
        self.connections.iter().map(Vec::len).sum()
    }
}

impl GraphView for Graph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn is_node_valid(&self, index: NodeIndex) -> bool {
        self.nodes.get(index).is_some_and(Option::is_some)
    }

    fn node(&self, index: NodeIndex) -> Option<&NavNode> {
        self.nodes.get(index)?.as_ref()
    }

    fn connections_from(&self, index: NodeIndex) -> &[Connection] {
        self.connections.get(index).map_or(&[], Vec::as_slice)
    }
}

impl GraphEdit for Graph {
    fn remove_connection(&mut self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        Graph::remove_connection(self, from, to)
    }
}
