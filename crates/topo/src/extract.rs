use crate::cell::CellsInfo;
use crate::patch::PatchesInfo;
use meshbool_arena::{Facep, Mesh, MeshArena};

/// Extracts the boolean result (§4.7): a patch survives into the output
/// iff its two bounding cells disagree on whether they're kept. The
/// surviving triangle is emitted facing away from the kept cell — if
/// that's `cell_below` rather than `cell_above` (the side the triangle's
/// vertex order already faces), the triangle is flipped.
pub fn extract_surface(
    tris: &[Facep],
    patches: &PatchesInfo,
    cells: &CellsInfo,
    arena: &mut dyn MeshArena,
) -> Mesh {
    let mut out = Vec::new();

    for patch in &patches.patches {
        let above = cells.cells[patch.cell_above as usize].flag;
        let below = cells.cells[patch.cell_below as usize].flag;
        if above == below {
            continue;
        }
        // `above == true, below == false`: the volume above is kept, and
        // the triangle's own vertex order already faces away from it
        // (normals point from below to above), so it's emitted unchanged.
        // Otherwise the kept volume is below, and the triangle must be
        // flipped so it still faces away from what's kept.
        let flip = below;
        for &t in &patch.tris {
            let face = arena.face(tris[t]);
            if flip {
                let flipped = face.flipped();
                out.push(arena.add_face(flipped.verts, flipped.orig, flipped.edge_orig));
            } else {
                out.push(tris[t]);
            }
        }
    }

    Mesh::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::PatchesInfo;
    use crate::topology::TriMeshTopology;
    use crate::winding::{propagate_winding, BooleanOp};
    use meshbool_arena::Arena;
    use meshbool_geom::Vec3Exact;

    fn tetrahedron() -> (Arena, Vec<Facep>) {
        let mut arena = Arena::new();
        let a = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 0), 0);
        let b = arena.add_or_find_vert(Vec3Exact::from_i64(1, 0, 0), 1);
        let c = arena.add_or_find_vert(Vec3Exact::from_i64(0, 1, 0), 2);
        let d = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 1), 3);
        let tris = vec![
            arena.add_face(vec![a, c, b], 0, vec![-1, -1, -1]),
            arena.add_face(vec![a, b, d], 1, vec![-1, -1, -1]),
            arena.add_face(vec![a, d, c], 2, vec![-1, -1, -1]),
            arena.add_face(vec![b, c, d], 3, vec![-1, -1, -1]),
        ];
        (arena, tris)
    }

    /// A single solid kept under union should pass through unchanged (its
    /// interior is kept, its exterior isn't, so every patch survives).
    #[test]
    fn a_single_kept_solid_extracts_all_its_triangles() {
        let (mut arena, tris) = tetrahedron();
        let topo = TriMeshTopology::build(&tris, &arena);
        let mut patches = PatchesInfo::build(&tris, &topo, &arena);
        let mut cells = crate::cell::CellsInfo::build(&tris, &topo, &mut patches, &arena).unwrap();
        let ambient = crate::ambient::find_ambient_cell(&tris, &topo, &patches, &mut arena);
        propagate_winding(&patches, &mut cells, ambient, 1, BooleanOp::Union, &|_| 0);

        let result = extract_surface(&tris, &patches, &cells, &mut arena);
        assert_eq!(result.len(), tris.len());
    }
}
