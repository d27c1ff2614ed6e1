//! Deterministic graph container and search algorithms for 2D navigation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod graph;
pub mod math;
pub mod search;

pub use graph::{Connection, Graph, GraphEdit, GraphError, GraphView, NavNode, NodeIndex};
pub use math::Vec2;
pub use search::eulerian::Eulerianity;
pub use search::goal_bounding::{Aabb, GoalBounds};
