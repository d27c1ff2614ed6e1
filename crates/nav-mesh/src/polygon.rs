//! Triangulated polygon with stable line indices and triangle adjacency.
//!
//! The triangulation comes from earcut; on top of it this module derives the
//! data the graph builder and the funnel need: unique undirected edges
//! ("lines") with stable indices, per-triangle line references, and the
//! line-to-triangle adjacency that distinguishes internal portals (two
//! triangles) from the mesh boundary (one triangle).

use std::collections::BTreeMap;

use nav_graph::{Aabb, Vec2};

use crate::MeshError;

/// A unique undirected edge of the triangulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub index: usize,
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Line {
    pub fn midpoint(&self) -> Vec2 {
        (self.p1 + self.p2) / 2.0
    }

    pub fn length(&self) -> f32 {
        self.p1.distance(self.p2)
    }
}

/// A triangle of the mesh, referencing its three bounding lines by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vec2; 3],
    pub lines: [usize; 3],
}

impl Triangle {
    /// Boundary-inclusive containment test via signed areas. The epsilon
    /// is an area tolerance, so points within a hair of an edge still
    /// count as inside.
    pub fn contains(&self, p: Vec2) -> bool {
        let eps = 1e-4;
        let [a, b, c] = self.points;
        let ab = area2(a, b, p);
        let bc = area2(b, c, p);
        let ca = area2(c, a, p);
        let has_neg = ab < -eps || bc < -eps || ca < -eps;
        let has_pos = ab > eps || bc > eps || ca > eps;
        !(has_neg && has_pos)
    }

    pub fn extent(&self) -> Aabb {
        let mut aabb = Aabb::from_point(self.points[0]);
        aabb.union_point(self.points[1]);
        aabb.union_point(self.points[2]);
        aabb
    }

    pub fn centroid(&self) -> Vec2 {
        (self.points[0] + self.points[1] + self.points[2]) / 3.0
    }
}

fn area2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

#[derive(Debug, Clone)]
pub struct Polygon {
    outer: Vec<Vec2>,
    holes: Vec<Vec<Vec2>>,
    lines: Vec<Line>,
    triangles: Vec<Triangle>,
    // Adjacent triangle indices per line; length 1 marks the mesh boundary,
    // length 2 an internal portal.
    line_triangles: Vec<Vec<usize>>,
}

impl Polygon {
    pub fn new(outer: Vec<Vec2>) -> crate::Result<Self> {
        Self::with_holes(outer, Vec::new())
    }

    /// Triangulates `outer` minus the `holes` and derives lines, triangles,
    /// and adjacency. Holes are expected to lie inside the outer contour
    /// and not overlap each other.
    pub fn with_holes(outer: Vec<Vec2>, holes: Vec<Vec<Vec2>>) -> crate::Result<Self> {
        if outer.len() < 3 {
            return Err(MeshError::DegenerateContour(outer.len()));
        }
        // Degenerate holes are skipped, not errors.
        let holes: Vec<Vec<Vec2>> = holes.into_iter().filter(|h| h.len() >= 3).collect();

        let mut vertices = outer.clone();
        let mut hole_starts = Vec::with_capacity(holes.len());
        for hole in &holes {
            hole_starts.push(vertices.len());
            vertices.extend_from_slice(hole);
        }

        let mut coords = Vec::with_capacity(vertices.len() * 2);
        for v in &vertices {
            coords.push(v.x as f64);
            coords.push(v.y as f64);
        }

        let indices = earcutr::earcut(&coords, &hole_starts, 2)
            .map_err(|err| MeshError::Triangulation(format!("{err:?}")))?;
        if indices.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        // Dedupe undirected edges into stable line indices, in the order
        // the triangulation first produces them.
        let mut line_ids: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        let mut lines: Vec<Line> = Vec::new();
        let mut triangles = Vec::new();
        let mut line_triangles: Vec<Vec<usize>> = Vec::new();

        for tri in indices.chunks_exact(3) {
            let tri_index = triangles.len();
            let corners = [tri[0], tri[1], tri[2]];
            let mut tri_lines = [0usize; 3];

            for (slot, (u, v)) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]
                .into_iter()
                .enumerate()
            {
                let key = (u.min(v), u.max(v));
                let line_index = *line_ids.entry(key).or_insert_with(|| {
                    lines.push(Line {
                        index: lines.len(),
                        p1: vertices[key.0],
                        p2: vertices[key.1],
                    });
                    line_triangles.push(Vec::new());
                    lines.len() - 1
                });
                tri_lines[slot] = line_index;
                line_triangles[line_index].push(tri_index);
            }

            triangles.push(Triangle {
                points: [
                    vertices[corners[0]],
                    vertices[corners[1]],
                    vertices[corners[2]],
                ],
                lines: tri_lines,
            });
        }

        Ok(Self {
            outer,
            holes,
            lines,
            triangles,
            line_triangles,
        })
    }

    pub fn outer(&self) -> &[Vec2] {
        &self.outer
    }

    pub fn holes(&self) -> &[Vec<Vec2>] {
        &self.holes
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle(&self, index: usize) -> Option<&Triangle> {
        self.triangles.get(index)
    }

    /// Indices of the triangles bordering a line: one for boundary lines,
    /// two for internal portals.
    pub fn triangles_from_line(&self, line_index: usize) -> &[usize] {
        self.line_triangles
            .get(line_index)
            .map_or(&[], Vec::as_slice)
    }

    /// Index of the first triangle containing `p`, if any. Linear scan.
    pub fn triangle_containing(&self, p: Vec2) -> Option<usize> {
        self.triangles.iter().position(|t| t.contains(p))
    }

    pub fn triangle_extent(&self, index: usize) -> Option<Aabb> {
        self.triangles.get(index).map(Triangle::extent)
    }
}
