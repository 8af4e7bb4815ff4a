use crate::edge::Edge;
use crate::patch::PatchesInfo;
use crate::radial::{radial_sort, TriRef};
use crate::topology::TriMeshTopology;
use meshbool_arena::{Face, Facep, MeshArena, Vertp, NO_INDEX};
use meshbool_geom::{Plane, Vec3Exact};
use num_traits::{Signed, Zero};
use std::cmp::Ordering;

/// Finds the unbounded cell (§4.5): the vertex with the maximum
/// x-coordinate is necessarily on the convex hull, as is its steepest
/// incident edge in the xy-projection; radially sorting that edge's
/// triangles together with a synthetic probe triangle pointing further
/// out in `+x` locates the cell containing points at infinity.
///
/// Returns `NO_INDEX` if the radial sort disagrees with itself about
/// which cell lies outside — the malformed-input case named in §4.5's
/// failure clause, not a Rust-level error, since the caller (the
/// facade) reports it and falls back to the unchanged mesh rather than
/// unwinding.
pub fn find_ambient_cell(
    tris: &[Facep],
    topo: &TriMeshTopology,
    patches: &PatchesInfo,
    arena: &mut dyn MeshArena,
) -> i64 {
    debug_assert!(!tris.is_empty(), "ambient-cell finder requires a non-empty mesh");

    let v_star = max_x_vertex(topo, arena);
    let hull_edge = steepest_incident_edge(topo, v_star, arena);

    let p_co = {
        let v = arena.vertex(v_star);
        &v.co_exact + &Vec3Exact::from_i64(1, 0, 0)
    };
    let p = arena.add_or_find_vert(p_co, NO_INDEX);

    let extra_face = {
        let a = arena.vertex(hull_edge.v0).co_exact.clone();
        let b = arena.vertex(hull_edge.v1).co_exact.clone();
        let c = arena.vertex(p).co_exact.clone();
        Face {
            verts: vec![hull_edge.v0, hull_edge.v1, p],
            orig: NO_INDEX,
            edge_orig: vec![NO_INDEX, NO_INDEX, NO_INDEX],
            plane: Plane::from_triangle(&a, &b, &c),
        }
    };

    let on_edge = &topo.edge_tri[&hull_edge];
    let mut span: Vec<TriRef> = on_edge.iter().map(|&t| TriRef::Real(t)).collect();
    let pivot = span[0];
    span.push(TriRef::Extra);

    let sorted = radial_sort(tris, arena, hull_edge, &span, pivot, Some(&extra_face));
    let n = sorted.len();
    let extra_pos = sorted.iter().position(|&r| r == TriRef::Extra).expect("extra triangle was part of the span");
    let prev = sorted[(extra_pos + n - 1) % n];
    let next = sorted[(extra_pos + 1) % n];

    let patch_of = |r: TriRef| match r {
        TriRef::Real(t) => patches.tri_patch[t] as usize,
        TriRef::Extra => unreachable!("the synthetic triangle cannot be its own neighbor"),
    };

    let prev_above = patches.patches[patch_of(prev)].cell_above;
    let next_above = patches.patches[patch_of(next)].cell_above;
    if prev_above == next_above {
        prev_above
    } else {
        NO_INDEX
    }
}

fn max_x_vertex(topo: &TriMeshTopology, arena: &dyn MeshArena) -> Vertp {
    let mut best: Option<Vertp> = None;
    for &v in topo.vert_edges.keys() {
        best = Some(match best {
            None => v,
            Some(b) => {
                let vv = arena.vertex(v);
                let bv = arena.vertex(b);
                match vv.co_exact.x.cmp(&bv.co_exact.x) {
                    Ordering::Greater => v,
                    Ordering::Less => b,
                    Ordering::Equal => {
                        if vv.id < bv.id {
                            v
                        } else {
                            b
                        }
                    }
                }
            }
        });
    }
    best.expect("ambient-cell finder requires a non-empty mesh")
}

fn steepest_incident_edge(topo: &TriMeshTopology, v_star: Vertp, arena: &dyn MeshArena) -> Edge {
    let edges = &topo.vert_edges[&v_star];
    debug_assert!(!edges.is_empty(), "the max-x vertex must be incident to at least one edge");

    let sx = arena.vertex(v_star).co_exact.x.clone();
    let sy = arena.vertex(v_star).co_exact.y.clone();

    let mut best_edge = edges[0];
    let mut best_dx = meshbool_geom::rat(0);
    let mut best_dy = meshbool_geom::rat(0);
    let mut have_best = false;

    for &edge in edges {
        let other = if edge.v0 == v_star { edge.v1 } else { edge.v0 };
        let ox = arena.vertex(other).co_exact.x.clone();
        let oy = arena.vertex(other).co_exact.y.clone();
        let dx = ox - sx.clone();
        let dy = oy - sy.clone();
        if !have_best || steeper(&dx, &dy, &best_dx, &best_dy) {
            best_edge = edge;
            best_dx = dx;
            best_dy = dy;
            have_best = true;
        }
    }
    best_edge
}

/// True iff `|dy1 / dx1| > |dy2 / dx2|`, treating a zero `dx` as an
/// infinitely steep edge.
fn steeper(dx1: &meshbool_geom::Rat, dy1: &meshbool_geom::Rat, dx2: &meshbool_geom::Rat, dy2: &meshbool_geom::Rat) -> bool {
    let inf1 = dx1.is_zero();
    let inf2 = dx2.is_zero();
    match (inf1, inf2) {
        (true, true) => false,
        (true, false) => true,
        (false, true) => false,
        (false, false) => {
            let lhs = dy1.clone().abs() * dx2.clone().abs();
            let rhs = dy2.clone().abs() * dx1.clone().abs();
            lhs > rhs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellsInfo;
    use meshbool_arena::Arena;

    fn tetrahedron() -> (Arena, Vec<Facep>) {
        let mut arena = Arena::new();
        let a = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 0), 0);
        let b = arena.add_or_find_vert(Vec3Exact::from_i64(2, 0, 0), 1);
        let c = arena.add_or_find_vert(Vec3Exact::from_i64(0, 2, 0), 2);
        let d = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 2), 3);
        let tris = vec![
            arena.add_face(vec![a, c, b], 0, vec![-1, -1, -1]),
            arena.add_face(vec![a, b, d], 1, vec![-1, -1, -1]),
            arena.add_face(vec![a, d, c], 2, vec![-1, -1, -1]),
            arena.add_face(vec![b, c, d], 3, vec![-1, -1, -1]),
        ];
        (arena, tris)
    }

    #[test]
    fn finds_the_outer_cell_of_a_tetrahedron() {
        let (mut arena, tris) = tetrahedron();
        let topo = TriMeshTopology::build(&tris, &arena);
        let mut patches = PatchesInfo::build(&tris, &topo, &arena);
        let cells = CellsInfo::build(&tris, &topo, &mut patches, &arena).unwrap();
        assert_eq!(cells.cells.len(), 2);

        let ambient = find_ambient_cell(&tris, &topo, &patches, &mut arena);
        assert_ne!(ambient, NO_INDEX);
        // The ambient cell must be the one not fully enclosed by the solid:
        // exactly one of the two cells should be selected, consistently.
        assert!(ambient == patches.patches[0].cell_above || ambient == patches.patches[0].cell_below);
    }
}
