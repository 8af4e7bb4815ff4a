use crate::edge::Edge;
use crate::topology::TriMeshTopology;
use meshbool_arena::{Facep, MeshArena, NO_INDEX};
use std::collections::HashMap;

/// A maximal set of triangles connected through manifold edges.
///
/// `tris[0]` is the seed triangle the patch was grown from; per the data
/// model, the patch's "above" side is the half-space the seed's CCW
/// normal points into.
#[derive(Debug, Clone)]
pub struct Patch {
    pub tris: Vec<usize>,
    pub cell_above: i64,
    pub cell_below: i64,
}

impl Patch {
    fn seeded_at(seed: usize) -> Patch {
        Patch { tris: vec![seed], cell_above: NO_INDEX, cell_below: NO_INDEX }
    }

    pub fn seed_tri(&self) -> usize {
        self.tris[0]
    }
}

/// The patch partition of a triangle mesh, plus the patch-pair incidence
/// needed by the cell builder.
#[derive(Debug, Default)]
pub struct PatchesInfo {
    pub patches: Vec<Patch>,
    /// `tri_patch[t]` is the patch index of triangle `t`.
    pub tri_patch: Vec<i64>,
    /// A representative non-manifold edge shared by each ordered pair of
    /// distinct patches that are adjacent. Stored symmetrically: both
    /// `(p, q)` and `(q, p)` map to the same edge.
    pub pp_edge: HashMap<(usize, usize), Edge>,
}

impl PatchesInfo {
    /// Grow-and-seed patch finder (§4.2). Scans triangles in ascending
    /// index order; each unassigned triangle seeds a new patch, grown by
    /// a depth-first walk along manifold edges only. Non-manifold edges
    /// encountered along the way are recorded as `pp_edge` representatives
    /// the first time they're seen connecting two already-distinct
    /// patches.
    pub fn build(tris: &[Facep], topo: &TriMeshTopology, arena: &dyn MeshArena) -> PatchesInfo {
        let n = tris.len();
        let mut tri_patch = vec![NO_INDEX; n];
        let mut patches: Vec<Patch> = Vec::new();
        let mut pp_edge: HashMap<(usize, usize), Edge> = HashMap::new();

        for seed in 0..n {
            if tri_patch[seed] != NO_INDEX {
                continue;
            }
            let patch_id = patches.len() as i64;
            tri_patch[seed] = patch_id;
            patches.push(Patch::seeded_at(seed));

            let mut stack = vec![seed];
            while let Some(t) = stack.pop() {
                let face = arena.face(tris[t]);
                let mut fresh_neighbors: Vec<usize> = Vec::new();
                for i in 0..3 {
                    let a = face.verts[i];
                    let b = face.verts[(i + 1) % 3];
                    let edge = Edge::canonical(arena, a, b);
                    let on_edge = &topo.edge_tri[&edge];

                    if on_edge.len() == 2 {
                        let other = if on_edge[0] == t { on_edge[1] } else { on_edge[0] };
                        if tri_patch[other] == NO_INDEX {
                            tri_patch[other] = patch_id;
                            fresh_neighbors.push(other);
                        }
                        continue;
                    }

                    for &t2 in on_edge {
                        if t2 == t || tri_patch[t2] == NO_INDEX {
                            continue;
                        }
                        let p2 = tri_patch[t2];
                        if p2 == patch_id {
                            continue;
                        }
                        let p2 = p2 as usize;
                        let p1 = patch_id as usize;
                        pp_edge.entry((p1, p2)).or_insert(edge);
                        pp_edge.entry((p2, p1)).or_insert(edge);
                    }
                }
                // Ascending tie-break keeps the traversal reproducible
                // across runs independent of hash-map iteration order.
                fresh_neighbors.sort_unstable();
                let patch = &mut patches[patch_id as usize];
                for nb in fresh_neighbors {
                    patch.tris.push(nb);
                    stack.push(nb);
                }
            }
        }

        PatchesInfo { patches, tri_patch, pp_edge }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshbool_arena::Arena;
    use meshbool_geom::Vec3Exact;

    /// Two coplanar triangles sharing a manifold edge form one patch;
    /// a lone triangle away from them forms a second.
    #[test]
    fn manifold_neighbors_join_one_patch() {
        let mut arena = Arena::new();
        let a = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 0), 0);
        let b = arena.add_or_find_vert(Vec3Exact::from_i64(1, 0, 0), 1);
        let c = arena.add_or_find_vert(Vec3Exact::from_i64(0, 1, 0), 2);
        let d = arena.add_or_find_vert(Vec3Exact::from_i64(1, 1, 0), 3);
        let e = arena.add_or_find_vert(Vec3Exact::from_i64(5, 5, 5), 4);
        let f = arena.add_or_find_vert(Vec3Exact::from_i64(6, 5, 5), 5);
        let g = arena.add_or_find_vert(Vec3Exact::from_i64(5, 6, 5), 6);

        let t0 = arena.add_face(vec![a, b, c], 0, vec![-1, -1, -1]);
        let t1 = arena.add_face(vec![b, d, c], 1, vec![-1, -1, -1]);
        let t2 = arena.add_face(vec![e, f, g], 2, vec![-1, -1, -1]);
        let tris = vec![t0, t1, t2];

        let topo = TriMeshTopology::build(&tris, &arena);
        let patches = PatchesInfo::build(&tris, &topo, &arena);

        assert_eq!(patches.patches.len(), 2);
        assert_eq!(patches.tri_patch[0], patches.tri_patch[1]);
        assert_ne!(patches.tri_patch[0], patches.tri_patch[2]);
    }
}
