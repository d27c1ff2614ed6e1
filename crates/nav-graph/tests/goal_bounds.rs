use nav_graph::search::{astar, heuristic};
use nav_graph::{Aabb, GoalBounds, Graph, GraphView, NavNode, NodeIndex, Vec2};

fn metric_graph(positions: &[(f32, f32)], edges: &[(NodeIndex, NodeIndex)]) -> Graph {
    let mut graph = Graph::new();
    for &(x, y) in positions {
        let index = graph.next_node_index();
        graph
            .add_node(NavNode::new(index, Vec2::new(x, y)))
            .expect("add node");
    }
    for &(a, b) in edges {
        let cost = graph
            .node_position(a)
            .expect("pos a")
            .distance(graph.node_position(b).expect("pos b"));
        graph.add_connection_pair(a, b, cost).expect("add edge");
    }
    graph
}

/// Four straight arms around a central hub.
fn plus_graph() -> Graph {
    metric_graph(
        &[
            (0.0, 0.0),   // 0 hub
            (2.0, 0.0),   // 1 east
            (4.0, 0.0),   // 2 far east
            (-2.0, 0.0),  // 3 west
            (-4.0, 0.0),  // 4 far west
            (0.0, 2.0),   // 5 north
            (0.0, 4.0),   // 6 far north
        ],
        &[(0, 1), (1, 2), (0, 3), (3, 4), (0, 5), (5, 6)],
    )
}

#[test]
fn first_step_boxes_cover_each_arm() {
    let graph = plus_graph();
    let bounds = GoalBounds::compute(&graph);

    // From the hub, the east connection's box spans exactly the east arm.
    let east = bounds.bounds(0, 1).expect("east box");
    assert!(east.contains(Vec2::new(2.0, 0.0)));
    assert!(east.contains(Vec2::new(4.0, 0.0)));
    assert!(!east.contains(Vec2::new(-2.0, 0.0)));
    assert!(!east.contains(Vec2::new(0.0, 4.0)));

    // Every neighbor of the hub has a recorded first-step box.
    for connection in graph.connections_from(0) {
        assert!(bounds.bounds(0, connection.to).is_some());
    }
}

#[test]
fn cross_arm_targets_are_pruned() {
    let graph = plus_graph();
    let bounds = GoalBounds::compute(&graph);

    let far_north = Vec2::new(0.0, 4.0);
    assert!(bounds.is_within_bounds(0, 5, far_north));
    assert!(!bounds.is_within_bounds(0, 1, far_north));
    assert!(!bounds.is_within_bounds(0, 3, far_north));
}

#[test]
fn spliced_indices_are_never_pruned() {
    let graph = plus_graph();
    let bounds = GoalBounds::compute(&graph);
    let beyond = graph.node_count();

    // Indices outside the precomputed table act as wildcards.
    assert!(bounds.is_within_bounds(beyond, 0, Vec2::ZERO));
    assert!(bounds.is_within_bounds(0, beyond, Vec2::ZERO));
}

#[test]
fn pruned_search_stays_optimal_everywhere() {
    // A mesh-like graph with alternative routes, not just trees.
    let graph = metric_graph(
        &[
            (0.0, 0.0),
            (2.0, 1.0),
            (2.0, -1.0),
            (4.0, 0.0),
            (6.0, 1.5),
            (6.0, -1.5),
            (8.0, 0.0),
        ],
        &[
            (0, 1),
            (0, 2),
            (1, 3),
            (2, 3),
            (3, 4),
            (3, 5),
            (4, 6),
            (5, 6),
            (1, 4),
            (2, 5),
        ],
    );
    let bounds = GoalBounds::compute(&graph);

    for start in 0..graph.node_count() {
        for goal in 0..graph.node_count() {
            let target = graph.node_position(goal).expect("goal pos");
            let plain = astar::find_path(&graph, start, goal, heuristic::euclidean)
                .expect("plain path");
            let pruned = astar::find_path_filtered(&graph, start, goal, heuristic::euclidean, |c| {
                bounds.is_within_bounds(c.from, c.to, target)
            })
            .expect("pruned path");

            let cost = |path: &[NodeIndex]| -> f32 {
                path.windows(2)
                    .map(|w| graph.find_connection(w[0], w[1]).expect("edge").cost)
                    .sum()
            };
            let diff = (cost(&plain) - cost(&pruned)).abs();
            assert!(diff < 1e-3, "pruning lost optimality {start}->{goal}");
        }
    }
}

#[test]
fn refine_grows_boxes_to_region_extents() {
    let graph = plus_graph();
    let mut bounds = GoalBounds::compute(&graph);

    let east_before = *bounds.bounds(0, 1).expect("east box");
    assert!(!east_before.contains(Vec2::new(4.0, 1.0)));

    // Pretend every point belongs to a region spanning one unit upward.
    bounds.refine_with(|p| {
        Some(Aabb {
            min: p,
            max: p + Vec2::new(0.0, 1.0),
        })
    });

    let east_after = bounds.bounds(0, 1).expect("east box");
    assert!(east_after.contains(Vec2::new(4.0, 1.0)));
}

#[test]
fn box_count_reflects_hub_degree() {
    let graph = plus_graph();
    let bounds = GoalBounds::compute(&graph);
    assert_eq!(bounds.source_count(), graph.node_count());
    // The hub has three outgoing first steps; arm tips have one; middle
    // arm nodes have two.
    assert_eq!(bounds.bounds(0, 1).is_some() as usize
        + bounds.bounds(0, 3).is_some() as usize
        + bounds.bounds(0, 5).is_some() as usize, 3);
    assert_eq!(bounds.box_count(), 3 + 3 * 2 + 3 * 1);
}
