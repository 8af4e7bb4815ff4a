//! An exact-rational boolean engine for triangle and polygon meshes.
//!
//! This crate is the facade over the workspace: [`meshbool_geom`] supplies
//! the exact arithmetic, [`meshbool_arena`] owns vertices and faces,
//! [`meshbool_cdt`] triangulates polygonal input, and [`meshbool_topo`]
//! does the actual topological work (patches, cells, winding, extraction,
//! detriangulation). [`boolean_trimesh`] and [`boolean_mesh`] are the two
//! entry points an application calls.

pub use meshbool_arena::{Arena, Face, Facep, Mesh, MeshArena, Vertex, Vertp, NO_INDEX};
pub use meshbool_cdt::TriangulateError;
pub use meshbool_topo::{BooleanOp, CellError, ValidationError};

use meshbool_cdt::{trimesh_nary_intersect, trimesh_self_intersect, triangulate_mesh};
use meshbool_topo::{
    detriangulate, extract_surface, find_ambient_cell, patch_cell_graph_ok, propagate_winding, CellsInfo,
    PatchesInfo, TriMeshTopology,
};

/// Combines `tm_in`'s triangles under `op` (§6).
///
/// `shape_of(t)` must classify every triangle of the (possibly
/// already-intersected) mesh into `[0, nshapes)`. If `use_self` is set,
/// `tm_in` is treated as a single self-intersecting shape rather than
/// `nshapes` separate ones.
///
/// Never fails outright: an empty mesh, a `None` operator, or any of the
/// non-fatal failure modes in the crate's error taxonomy all produce a
/// best-effort mesh instead, with the reason logged at `error` level
/// under the `meshbool` target.
pub fn boolean_trimesh(
    tm_in: &Mesh,
    op: BooleanOp,
    nshapes: usize,
    shape_of: &dyn Fn(usize) -> usize,
    use_self: bool,
    arena: &mut dyn MeshArena,
) -> Mesh {
    if tm_in.is_empty() {
        return tm_in.clone();
    }

    let intersected = if use_self {
        trimesh_self_intersect(tm_in, arena)
    } else {
        trimesh_nary_intersect(tm_in, nshapes, shape_of, use_self, arena)
    };

    if op == BooleanOp::None {
        return intersected;
    }

    let topo = TriMeshTopology::build(&intersected.faces, arena);
    let mut patches = PatchesInfo::build(&intersected.faces, &topo, arena);

    let mut cells = match CellsInfo::build(&intersected.faces, &topo, &mut patches, arena) {
        Ok(cells) => cells,
        Err(CellError::MergeRequired(p, q)) => {
            debug_assert!(false, "cell builder needs to merge patches {p} and {q}, which is unsupported");
            log::error!(target: "meshbool", "cell merge required between patches {p} and {q}; returning input unchanged");
            return tm_in.clone();
        }
    };

    if let Err(err) = patch_cell_graph_ok(&patches, &cells) {
        log::error!(target: "meshbool", "patch/cell graph validation failed: {err}; returning input unchanged");
        return tm_in.clone();
    }

    let ambient = find_ambient_cell(&intersected.faces, &topo, &patches, arena);
    if ambient == NO_INDEX {
        log::error!(target: "meshbool", "ambient cell not found; returning the intersected mesh unchanged");
        return intersected;
    }

    propagate_winding(&patches, &mut cells, ambient, nshapes, op, shape_of);
    extract_surface(&intersected.faces, &patches, &cells, arena)
}

/// Combines `pm`'s polygons under `op`, returning a polygonal mesh (§6).
///
/// `pm` is triangulated first (or `pm_triangulated` is used as a
/// caller-supplied pre-triangulation of it, when the caller already has
/// one on hand), the triangulated combination runs through
/// [`boolean_trimesh`], and the result is detriangulated back against
/// `pm`'s original face structure.
pub fn boolean_mesh(
    pm: &Mesh,
    op: BooleanOp,
    nshapes: usize,
    shape_of: &dyn Fn(usize) -> usize,
    use_self: bool,
    pm_triangulated: Option<&Mesh>,
    arena: &mut dyn MeshArena,
) -> Mesh {
    let triangulated = match pm_triangulated {
        Some(tm) => tm.clone(),
        None => triangulate_mesh(pm, arena),
    };
    let tm_out = boolean_trimesh(&triangulated, op, nshapes, shape_of, use_self, arena);
    detriangulate(&tm_out, pm, arena)
}
