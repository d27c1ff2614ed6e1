//! Baked navigation mesh and path queries.

use nav_graph::search::{astar, heuristic};
use nav_graph::{Aabb, GoalBounds, Graph, GraphError, GraphView, NavNode, NodeIndex, Vec2};
use tracing::{debug, info};

use crate::builder;
use crate::funnel;
use crate::obstacle::Obstacle;
use crate::polygon::Polygon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bake-time parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BakeConfig {
    /// Clearance radius obstacles are inflated by.
    pub agent_radius: f32,
    /// Precompute goal-bounding boxes to prune path searches.
    pub goal_bounds: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            agent_radius: 1.0,
            goal_bounds: false,
        }
    }
}

/// An ordered sequence of world positions. Empty means "no path found",
/// which is an expected query outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec2>,
}

impl NavPath {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

enum Route {
    SameTriangle,
    Corridor {
        scratch: Graph,
        node_path: Vec<NodeIndex>,
    },
}

/// A baked navigation mesh: the triangulated walkable polygon, the graph
/// over its internal edges, and (optionally) the goal-bounding table.
///
/// The canonical graph is read-only shared state; every query works on a
/// private clone, so a `NavMesh` can serve queries from multiple owners
/// without coordination.
#[derive(Debug, Clone)]
pub struct NavMesh {
    polygon: Polygon,
    graph: Graph,
    line_nodes: Vec<Option<NodeIndex>>,
    goal_bounds: Option<GoalBounds>,
}

impl NavMesh {
    /// Bakes a mesh from a contour and obstacle set: obstacles are inflated
    /// by the clearance radius, subtracted as holes, and the rest is
    /// triangulated and wired into a graph.
    pub fn bake(
        contour: &[Vec2],
        obstacles: &[Obstacle],
        config: &BakeConfig,
    ) -> crate::Result<Self> {
        let holes = obstacles
            .iter()
            .map(|o| o.inflated(config.agent_radius))
            .collect();
        let polygon = Polygon::with_holes(contour.to_vec(), holes)?;
        let built = builder::build_nav_graph(&polygon)?;

        info!(
            triangles = polygon.triangles().len(),
            nodes = built.graph.live_node_count(),
            connections = built.graph.connection_count(),
            "baked navigation mesh"
        );

        let goal_bounds = config.goal_bounds.then(|| {
            // Each destination absorbs the extents of its adjacent
            // triangles, so goals anywhere inside those triangles stay
            // inside the box; the corner pass then snaps box corners that
            // landed mid-triangle out to the full triangle extent.
            let mut bounds = GoalBounds::compute_with(&built.graph, |node| {
                let line = built.graph.node(node)?.line_index()?;
                let mut extent: Option<Aabb> = None;
                for &tri in polygon.triangles_from_line(line) {
                    if let Some(tri_extent) = polygon.triangle_extent(tri) {
                        match &mut extent {
                            Some(aabb) => aabb.union(&tri_extent),
                            None => extent = Some(tri_extent),
                        }
                    }
                }
                extent
            });
            bounds.refine_with(|p| {
                polygon
                    .triangle_containing(p)
                    .and_then(|t| polygon.triangle_extent(t))
            });
            debug!(boxes = bounds.box_count(), "computed goal bounds");
            bounds
        });

        Ok(Self {
            polygon,
            graph: built.graph,
            line_nodes: built.line_nodes,
            goal_bounds,
        })
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn goal_bounds(&self) -> Option<&GoalBounds> {
        self.goal_bounds.as_ref()
    }

    /// Graph node sitting on a mesh line, if the line is internal.
    pub fn node_for_line(&self, line_index: usize) -> Option<NodeIndex> {
        self.line_nodes.get(line_index).copied().flatten()
    }

    /// Funnel-smoothed path between two world positions.
    ///
    /// Empty when either position is outside the mesh or the goal is
    /// unreachable; the single goal position when both share a triangle.
    pub fn find_path(&self, start: Vec2, goal: Vec2) -> NavPath {
        match self.try_find_path(start, goal) {
            Ok(path) => path,
            Err(err) => {
                debug_assert!(false, "path query corrupted its scratch graph: {err}");
                NavPath::default()
            }
        }
    }

    /// Unsmoothed node-to-node polyline for the same query, including the
    /// start and goal positions. Useful for debugging and visualization.
    pub fn find_node_path(&self, start: Vec2, goal: Vec2) -> NavPath {
        let route = match self.route(start, goal) {
            Ok(Some(route)) => route,
            Ok(None) => return NavPath::default(),
            Err(err) => {
                debug_assert!(false, "path query corrupted its scratch graph: {err}");
                return NavPath::default();
            }
        };
        match route {
            Route::SameTriangle => NavPath::new(vec![goal]),
            Route::Corridor { scratch, node_path } => NavPath::new(
                node_path
                    .iter()
                    .filter_map(|&index| scratch.node_position(index))
                    .collect(),
            ),
        }
    }

    fn try_find_path(&self, start: Vec2, goal: Vec2) -> Result<NavPath, GraphError> {
        let Some(route) = self.route(start, goal)? else {
            return Ok(NavPath::default());
        };
        match route {
            Route::SameTriangle => Ok(NavPath::new(vec![goal])),
            Route::Corridor { scratch, node_path } => {
                let portals = funnel::find_portals(&node_path, &scratch, &self.polygon);
                Ok(NavPath::new(funnel::string_pull(&portals)))
            }
        }
    }

    fn route(&self, start: Vec2, goal: Vec2) -> Result<Option<Route>, GraphError> {
        let Some(start_triangle) = self.polygon.triangle_containing(start) else {
            return Ok(None);
        };
        let Some(goal_triangle) = self.polygon.triangle_containing(goal) else {
            return Ok(None);
        };
        if start_triangle == goal_triangle {
            return Ok(Some(Route::SameTriangle));
        }

        // Splice temporary endpoints into a private copy; the canonical
        // graph stays untouched.
        let mut scratch = self.graph.clone();
        let start_index = self.splice(&mut scratch, start, start_triangle)?;
        let goal_index = self.splice(&mut scratch, goal, goal_triangle)?;

        let node_path = match &self.goal_bounds {
            Some(bounds) => astar::find_path_filtered(
                &scratch,
                start_index,
                goal_index,
                heuristic::manhattan,
                |c| bounds.is_within_bounds(c.from, c.to, goal),
            ),
            None => astar::find_path(&scratch, start_index, goal_index, heuristic::manhattan),
        };

        Ok(node_path.map(|node_path| Route::Corridor { scratch, node_path }))
    }

    /// Adds a synthetic node at `position` and connects it to every
    /// internal-edge node of its containing triangle, costed by distance.
    fn splice(
        &self,
        scratch: &mut Graph,
        position: Vec2,
        triangle: usize,
    ) -> Result<NodeIndex, GraphError> {
        let index = scratch.add_node(NavNode::new(scratch.next_node_index(), position))?;
        if let Some(tri) = self.polygon.triangle(triangle) {
            for &line_index in &tri.lines {
                if let Some(node) = self.node_for_line(line_index) {
                    let node_position = scratch
                        .node_position(node)
                        .ok_or(GraphError::InvalidNode(node))?;
                    scratch.add_connection_pair(index, node, node_position.distance(position))?;
                }
            }
        }
        Ok(index)
    }
}
