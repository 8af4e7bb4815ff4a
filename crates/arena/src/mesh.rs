use crate::arena::MeshArena;
use crate::{Facep, Vertp, NO_INDEX};
use meshbool_geom::{Plane, Vec3Exact, Vec3F};
use std::collections::HashSet;

/// A point owned by an [`crate::Arena`].
///
/// `co_exact` is the coordinate every predicate operates on; `co` is a
/// lossy float copy kept around only for length-based heuristics (the
/// detriangulator's longest-edge-first dissolve order, convex-hull
/// tie-breaks in the ambient-cell finder).
#[derive(Clone, Debug)]
pub struct Vertex {
    pub co_exact: Vec3Exact,
    pub co: Vec3F,
    /// Stable integer identity, assigned in creation order. Used for
    /// hashing and for the canonical (smaller-id-first) ordering of
    /// edges.
    pub id: u32,
    /// Index of the input vertex this came from, or [`NO_INDEX`] if the
    /// vertex is synthetic (introduced by triangulation, intersection,
    /// or the ambient-cell finder's probe point).
    pub orig: i64,
}

/// A face owned by an [`crate::Arena`]: a triangle if `verts.len() == 3`,
/// otherwise a general polygon.
#[derive(Clone, Debug)]
pub struct Face {
    pub verts: Vec<Vertp>,
    /// Index of the input face this came from, or [`NO_INDEX`] if
    /// synthetic.
    pub orig: i64,
    /// `edge_orig[i]` is the input-edge index for the side from
    /// `verts[i]` to `verts[(i + 1) % verts.len()]`, or [`NO_INDEX`] for
    /// an edge introduced by triangulation or intersection.
    pub edge_orig: Vec<i64>,
    /// The face's support plane, cached at construction time.
    pub plane: Plane,
}

impl Face {
    pub fn is_triangle(&self) -> bool {
        self.verts.len() == 3
    }

    /// Reverses vertex order (and the parallel `edge_orig` sequence) so
    /// the face's normal points the other way. Used by the extractor
    /// (§4.7) to flip boundary triangles so they face away from the kept
    /// volume.
    pub fn flipped(&self) -> Face {
        let mut verts = self.verts.clone();
        verts.reverse();
        // `edge_orig[i]` described the edge starting at `verts[i]`; once
        // the vertex order is reversed that same edge now starts one
        // slot earlier (and runs the other way), so the origin sequence
        // has to be rotated by one in addition to being reversed.
        let mut edge_orig = self.edge_orig.clone();
        edge_orig.reverse();
        edge_orig.rotate_left(1);
        Face {
            verts,
            orig: self.orig,
            edge_orig,
            plane: Plane {
                normal: Vec3Exact::new(
                    -self.plane.normal.x.clone(),
                    -self.plane.normal.y.clone(),
                    -self.plane.normal.z.clone(),
                ),
                offset: -self.plane.offset.clone(),
            },
        }
    }
}

/// An ordered sequence of faces: a read-only view over a set of faces
/// already present in an arena. Meshes are value-typed and cheap to
/// clone — they own nothing but the list of handles.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub faces: Vec<Facep>,
}

impl Mesh {
    pub fn new(faces: Vec<Facep>) -> Mesh {
        Mesh { faces }
    }

    pub fn empty() -> Mesh {
        Mesh { faces: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// The distinct vertices referenced by this mesh's faces, in order
    /// of first appearance. Built on demand (lazily, per the spec) since
    /// not every consumer needs it.
    pub fn vertex_index(&self, arena: &dyn MeshArena) -> Vec<Vertp> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for &f in &self.faces {
            for &v in &arena.face(f).verts {
                if seen.insert(v) {
                    out.push(v);
                }
            }
        }
        out
    }
}
