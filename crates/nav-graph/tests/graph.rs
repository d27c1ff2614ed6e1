use nav_graph::{Connection, Graph, GraphError, GraphView, NavNode, Vec2};

fn three_node_graph() -> Graph {
    let mut graph = Graph::new();
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)] {
        let index = graph.next_node_index();
        graph
            .add_node(NavNode::new(index, Vec2::new(x, y)))
            .expect("add node");
    }
    graph
}

#[test]
fn graph_add_node_rejects_mismatched_index() {
    let mut graph = three_node_graph();
    let err = graph
        .add_node(NavNode::new(7, Vec2::ZERO))
        .expect_err("index 7 is not the next free index");
    assert_eq!(err, GraphError::IndexMismatch { expected: 3, got: 7 });
}

#[test]
fn graph_connections_keep_insertion_order() {
    let mut graph = three_node_graph();
    graph
        .add_connection(Connection::new(0, 2, 2.0))
        .expect("add 0->2");
    graph
        .add_connection(Connection::new(0, 1, 1.0))
        .expect("add 0->1");

    let targets: Vec<_> = graph.connections_from(0).iter().map(|c| c.to).collect();
    assert_eq!(targets, vec![2, 1]);
}

#[test]
fn graph_add_connection_rejects_invalid_endpoints() {
    let mut graph = three_node_graph();
    assert_eq!(
        graph.add_connection(Connection::new(0, 9, 1.0)),
        Err(GraphError::InvalidNode(9))
    );
    assert_eq!(
        graph.add_connection(Connection::new(9, 0, 1.0)),
        Err(GraphError::InvalidNode(9))
    );
}

#[test]
fn graph_remove_node_strips_incident_connections() {
    let mut graph = three_node_graph();
    graph.add_connection_pair(0, 1, 1.0).expect("pair 0-1");
    graph.add_connection_pair(1, 2, 1.0).expect("pair 1-2");

    graph.remove_node(1).expect("remove node 1");

    assert!(!graph.is_node_valid(1));
    assert!(graph.connections_from(1).is_empty());
    // No dangling connection may reference the removed node.
    for index in 0..graph.node_count() {
        assert!(graph.connections_from(index).iter().all(|c| c.to != 1));
    }
}

#[test]
fn graph_removed_indices_are_never_reused() {
    let mut graph = three_node_graph();
    graph.remove_node(2).expect("remove node 2");

    let next = graph.next_node_index();
    assert_eq!(next, 3, "removed slot must not be handed out again");

    graph
        .add_node(NavNode::new(next, Vec2::new(5.0, 5.0)))
        .expect("add node");
    assert!(graph.is_node_valid(3));
    assert!(!graph.is_node_valid(2));
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.live_node_count(), 3);
}

#[test]
fn graph_invalid_index_accessors_are_empty() {
    let graph = three_node_graph();
    assert!(graph.node(17).is_none());
    assert!(graph.node_position(17).is_none());
    assert!(graph.connections_from(17).is_empty());
    assert!(!graph.is_node_valid(17));
}

#[test]
fn graph_clone_is_a_deep_copy() {
    let mut graph = three_node_graph();
    graph.add_connection_pair(0, 1, 1.0).expect("pair 0-1");

    let mut clone = graph.clone();
    let index = clone.next_node_index();
    clone
        .add_node(NavNode::new(index, Vec2::new(9.0, 9.0)))
        .expect("add node to clone");
    clone.remove_connection(0, 1).expect("remove 0->1 on clone");

    assert_eq!(graph.node_count(), 3);
    assert!(graph.find_connection(0, 1).is_some());
    assert_eq!(clone.node_count(), 4);
    assert!(clone.find_connection(0, 1).is_none());
}

#[test]
fn graph_remove_missing_connection_is_an_error() {
    let mut graph = three_node_graph();
    assert_eq!(
        graph.remove_connection(0, 1),
        Err(GraphError::MissingConnection { from: 0, to: 1 })
    );
}

#[test]
fn graph_line_tags_round_trip() {
    let mut graph = Graph::new();
    let index = graph.next_node_index();
    graph
        .add_node(NavNode::with_line(index, 4, Vec2::new(2.0, 3.0)))
        .expect("add node");

    let node = graph.node(index).expect("node");
    assert_eq!(node.line_index(), Some(4));
    assert_eq!(node.position(), Vec2::new(2.0, 3.0));

    let synthetic = NavNode::new(1, Vec2::ZERO);
    assert_eq!(synthetic.line_index(), None);
}
