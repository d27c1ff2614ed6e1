//! Navigation-mesh baking and path queries over a triangulated walkable
//! region.
//!
//! A [`NavMesh`] is baked once from a contour polygon and a set of
//! obstacles: obstacles are inflated by the agent clearance radius and
//! subtracted as holes, the remaining area is triangulated, and a graph is
//! built with one node per internal triangle edge. Path queries clone that
//! graph, splice in temporary start/end nodes, search it, and smooth the
//! resulting corridor with the funnel algorithm.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod builder;
pub mod funnel;
pub mod mesh;
pub mod obstacle;
pub mod polygon;

use thiserror::Error;

pub use funnel::Portal;
pub use mesh::{BakeConfig, NavMesh, NavPath};
pub use obstacle::Obstacle;
pub use polygon::{Line, Polygon, Triangle};

pub use nav_graph::{Aabb, GoalBounds, Graph, GraphError, GraphView, NodeIndex, Vec2};

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("contour needs at least 3 points, got {0}")]
    DegenerateContour(usize),

    #[error("triangulation failed: {0}")]
    Triangulation(String),

    #[error("triangulation produced no triangles")]
    EmptyMesh,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = core::result::Result<T, MeshError>;
