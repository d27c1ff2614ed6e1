use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nav_graph::search::{astar, dijkstra, heuristic};
use nav_graph::{GoalBounds, Graph, GraphView, NavNode, Vec2};

/// Lattice graph with 4-neighborhood connections, costs by distance.
fn lattice_graph(width: usize, height: usize, spacing: f32) -> Graph {
    let mut graph = Graph::new();
    for y in 0..height {
        for x in 0..width {
            let index = graph.next_node_index();
            graph
                .add_node(NavNode::new(
                    index,
                    Vec2::new(x as f32 * spacing, y as f32 * spacing),
                ))
                .expect("add node");
        }
    }
    for y in 0..height {
        for x in 0..width {
            let index = y * width + x;
            if x + 1 < width {
                graph
                    .add_connection_pair(index, index + 1, spacing)
                    .expect("add east edge");
            }
            if y + 1 < height {
                graph
                    .add_connection_pair(index, index + width, spacing)
                    .expect("add north edge");
            }
        }
    }
    graph
}

fn bench_search(c: &mut Criterion) {
    let graph = lattice_graph(32, 32, 1.0);
    let start = 0;
    let goal = graph.node_count() - 1;

    let mut group = c.benchmark_group("nav-graph/search");

    group.bench_function("astar_manhattan", |b| {
        b.iter(|| {
            let path = astar::find_path(&graph, start, goal, heuristic::manhattan).expect("path");
            black_box(path.len());
        })
    });

    group.bench_function("astar_euclidean", |b| {
        b.iter(|| {
            let path = astar::find_path(&graph, start, goal, heuristic::euclidean).expect("path");
            black_box(path.len());
        })
    });

    group.bench_function("dijkstra", |b| {
        b.iter(|| {
            let path = dijkstra::find_path(&graph, start, goal).expect("path");
            black_box(path.len());
        })
    });

    let bounds = GoalBounds::compute(&graph);
    let target = graph.node_position(goal).expect("goal pos");
    group.bench_function("astar_goal_bounded", |b| {
        b.iter(|| {
            let path = astar::find_path_filtered(&graph, start, goal, heuristic::euclidean, |c| {
                bounds.is_within_bounds(c.from, c.to, target)
            })
            .expect("path");
            black_box(path.len());
        })
    });

    group.finish();
}

fn bench_precompute(c: &mut Criterion) {
    let graph = lattice_graph(16, 16, 1.0);

    let mut group = c.benchmark_group("nav-graph/precompute");
    group.bench_function("goal_bounds_16x16", |b| {
        b.iter(|| {
            let bounds = GoalBounds::compute(&graph);
            black_box(bounds.box_count());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_search, bench_precompute);
criterion_main!(benches);
