use crate::edge::Edge;
use meshbool_arena::{Facep, MeshArena, Vertp};
use std::collections::HashMap;

/// The edge/vertex adjacency of a triangle mesh, keyed by the
/// position of each triangle in the `tris` slice it was built from
/// (its "triangle index" — the index space every later stage shares).
#[derive(Debug, Default)]
pub struct TriMeshTopology {
    /// Canonical edge -> the triangle indices that contain it, in
    /// ascending order of discovery. Length 1 = boundary, 2 = manifold,
    /// >= 3 = non-manifold.
    pub edge_tri: HashMap<Edge, Vec<usize>>,
    /// Vertex -> the distinct edges incident to it.
    pub vert_edges: HashMap<Vertp, Vec<Edge>>,
}

impl TriMeshTopology {
    /// Builds the topology of `tris`. Every entry of `tris` must name a
    /// triangle (`Face::is_triangle()`); this is the topological core's
    /// one hard precondition, asserted rather than reported as an error.
    pub fn build(tris: &[Facep], arena: &dyn MeshArena) -> TriMeshTopology {
        let mut edge_tri: HashMap<Edge, Vec<usize>> = HashMap::with_capacity(tris.len() * 2);
        let mut vert_edges: HashMap<Vertp, Vec<Edge>> = HashMap::with_capacity(tris.len());

        for (t, &facep) in tris.iter().enumerate() {
            let face = arena.face(facep);
            debug_assert!(face.is_triangle(), "topology builder expects an all-triangle mesh");
            for i in 0..3 {
                let a = face.verts[i];
                let b = face.verts[(i + 1) % 3];
                let edge = Edge::canonical(arena, a, b);

                let bucket = edge_tri.entry(edge).or_default();
                if !bucket.contains(&t) {
                    bucket.push(t);
                }
                for v in [a, b] {
                    let edges = vert_edges.entry(v).or_default();
                    if !edges.contains(&edge) {
                        edges.push(edge);
                    }
                }
            }
        }

        TriMeshTopology { edge_tri, vert_edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshbool_arena::Arena;
    use meshbool_geom::Vec3Exact;

    fn two_triangle_mesh() -> (Arena, Vec<Facep>) {
        let mut arena = Arena::new();
        let a = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 0), 0);
        let b = arena.add_or_find_vert(Vec3Exact::from_i64(1, 0, 0), 1);
        let c = arena.add_or_find_vert(Vec3Exact::from_i64(0, 1, 0), 2);
        let d = arena.add_or_find_vert(Vec3Exact::from_i64(1, 1, 0), 3);
        let t0 = arena.add_face(vec![a, b, c], 0, vec![-1, -1, -1]);
        let t1 = arena.add_face(vec![b, d, c], 1, vec![-1, -1, -1]);
        (arena, vec![t0, t1])
    }

    #[test]
    fn shared_edge_lists_both_triangles() {
        let (arena, tris) = two_triangle_mesh();
        let topo = TriMeshTopology::build(&tris, &arena);
        let b = arena.vertex(arena.face(tris[0]).verts[1]).id;
        let c = arena.vertex(arena.face(tris[0]).verts[2]).id;
        let shared = topo
            .edge_tri
            .values()
            .find(|tris_on_edge| tris_on_edge.len() == 2)
            .expect("the two triangles share exactly one edge");
        assert_eq!(shared, &vec![0, 1]);
        // sanity: the shared edge really is (b, c) by id, not a boundary one.
        assert!(b != c);
    }

    #[test]
    fn boundary_edges_list_a_single_triangle() {
        let (arena, tris) = two_triangle_mesh();
        let topo = TriMeshTopology::build(&tris, &arena);
        let boundary_count = topo.edge_tri.values().filter(|v| v.len() == 1).count();
        assert_eq!(boundary_count, 4);
    }

    #[test]
    fn total_edge_triangle_incidences_is_three_per_triangle() {
        let (arena, tris) = two_triangle_mesh();
        let topo = TriMeshTopology::build(&tris, &arena);
        let total: usize = topo.edge_tri.values().map(|v| v.len()).sum();
        assert_eq!(total, 3 * tris.len());
    }
}
