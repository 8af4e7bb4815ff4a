use meshbool_arena::{Mesh, MeshArena};

/// Stands in for the self-intersection pre-pass named in §6
/// (`trimesh_self_intersect`): splitting every pair of crossing
/// triangles along their intersection curve is out of scope for the
/// topological core, so this is a pass-through over meshes that are
/// already non-self-crossing (every test scenario's input is).
///
/// Applications feeding genuinely self-intersecting meshes to
/// [`crate::triangulate_mesh`]'s caller need a real splitting pre-pass
/// in front of this function; none is implemented here.
pub fn trimesh_self_intersect(tm: &Mesh, _arena: &mut dyn MeshArena) -> Mesh {
    log::debug!(target: "meshbool::cdt", "self-intersection pass-through: assuming {} faces are already non-self-crossing", tm.len());
    tm.clone()
}

/// Stands in for the n-ary intersection pre-pass named in §6
/// (`trimesh_nary_intersect`): combines `nshapes` meshes (or one mesh
/// tagged per-shape by `shape_of`) and would split every crossing pair
/// of triangles, one from each shape, along their intersection curve.
/// As with [`trimesh_self_intersect`], this is a pass-through; real
/// inputs must already be pre-subdivided.
pub fn trimesh_nary_intersect(
    tm: &Mesh,
    nshapes: usize,
    shape_of: &dyn Fn(usize) -> usize,
    use_self: bool,
    arena: &mut dyn MeshArena,
) -> Mesh {
    log::debug!(
        target: "meshbool::cdt",
        "nary-intersection pass-through: {} faces across {} shapes, use_self={}",
        tm.len(),
        nshapes,
        use_self,
    );
    debug_assert!(
        (0..tm.len()).all(|i| shape_of(i) < nshapes),
        "shape_of must classify every triangle into [0, nshapes)",
    );
    if use_self {
        return trimesh_self_intersect(tm, arena);
    }
    tm.clone()
}
