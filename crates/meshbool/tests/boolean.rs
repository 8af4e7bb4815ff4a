use meshbool::{boolean_mesh, boolean_trimesh, Arena, BooleanOp, Facep, Mesh, MeshArena};
use meshbool_geom::Vec3Exact;

fn tetrahedron(arena: &mut Arena, offset: (i64, i64, i64)) -> Vec<Facep> {
    let (ox, oy, oz) = offset;
    let p = |x: i64, y: i64, z: i64| Vec3Exact::from_i64(x + ox, y + oy, z + oz);
    let a = arena.add_or_find_vert(p(0, 0, 0), 0);
    let b = arena.add_or_find_vert(p(1, 0, 0), 1);
    let c = arena.add_or_find_vert(p(0, 1, 0), 2);
    let d = arena.add_or_find_vert(p(0, 0, 1), 3);
    vec![
        arena.add_face(vec![a, c, b], 0, vec![-1, -1, -1]),
        arena.add_face(vec![a, b, d], 1, vec![-1, -1, -1]),
        arena.add_face(vec![a, d, c], 2, vec![-1, -1, -1]),
        arena.add_face(vec![b, c, d], 3, vec![-1, -1, -1]),
    ]
}

/// A unit cube's 6 quad faces, consistent outward winding.
fn cube_quads(arena: &mut Arena) -> Vec<Facep> {
    let v = |x: i64, y: i64, z: i64| arena.add_or_find_vert(Vec3Exact::from_i64(x, y, z), -1);
    let v0 = v(0, 0, 0);
    let v1 = v(1, 0, 0);
    let v2 = v(1, 1, 0);
    let v3 = v(0, 1, 0);
    let v4 = v(0, 0, 1);
    let v5 = v(1, 0, 1);
    let v6 = v(1, 1, 1);
    let v7 = v(0, 1, 1);

    let no_orig = vec![-1, -1, -1, -1];
    vec![
        arena.add_face(vec![v0, v3, v2, v1], 0, no_orig.clone()),
        arena.add_face(vec![v4, v5, v6, v7], 1, no_orig.clone()),
        arena.add_face(vec![v0, v1, v5, v4], 2, no_orig.clone()),
        arena.add_face(vec![v3, v7, v6, v2], 3, no_orig.clone()),
        arena.add_face(vec![v0, v4, v7, v3], 4, no_orig.clone()),
        arena.add_face(vec![v1, v2, v6, v5], 5, no_orig),
    ]
}

/// A single closed solid, run through `Union` against nothing else,
/// should emit exactly its own boundary: the topological core has
/// nothing to subtract or merge away.
#[test]
fn a_single_solid_survives_union_unchanged() {
    let mut arena = Arena::new();
    let tris = tetrahedron(&mut arena, (0, 0, 0));
    let tm_in = Mesh::new(tris);

    let result = boolean_trimesh(&tm_in, BooleanOp::Union, 1, &|_| 0, false, &mut arena);
    assert_eq!(result.len(), tm_in.len());
}

/// `Difference` of a single shape against nothing (`nshapes == 1`) keeps
/// every cell with nonzero winding in shape 0, which for one solid is
/// the same outcome as `Union`.
#[test]
fn difference_of_a_lone_shape_against_nothing_is_itself() {
    let mut arena = Arena::new();
    let tris = tetrahedron(&mut arena, (0, 0, 0));
    let tm_in = Mesh::new(tris);

    let result = boolean_trimesh(&tm_in, BooleanOp::Difference, 1, &|_| 0, false, &mut arena);
    assert_eq!(result.len(), tm_in.len());
}

/// Two tetrahedra that don't touch at all form two independent
/// patch/cell components with nothing linking them — the cell builder
/// has no way to tell whether they sit in the same ambient space, so
/// validation catches the disconnected graph and the combination backs
/// off to the unchanged input rather than guessing.
#[test]
fn disjoint_shapes_fall_back_to_the_unchanged_input() {
    let mut arena = Arena::new();
    let mut tris = tetrahedron(&mut arena, (0, 0, 0));
    tris.extend(tetrahedron(&mut arena, (10, 10, 10)));
    let tm_in = Mesh::new(tris);

    let result = boolean_trimesh(&tm_in, BooleanOp::Union, 2, &|t| if t < 4 { 0 } else { 1 }, false, &mut arena);
    assert_eq!(result.faces, tm_in.faces);
}

#[test]
fn empty_input_is_returned_unchanged() {
    let mut arena = Arena::new();
    let tm_in = Mesh::empty();
    let result = boolean_trimesh(&tm_in, BooleanOp::Union, 1, &|_| 0, false, &mut arena);
    assert!(result.is_empty());
}

#[test]
fn none_operator_skips_extraction_and_returns_the_intersected_mesh() {
    let mut arena = Arena::new();
    let tris = tetrahedron(&mut arena, (0, 0, 0));
    let tm_in = Mesh::new(tris);
    let result = boolean_trimesh(&tm_in, BooleanOp::None, 1, &|_| 0, false, &mut arena);
    assert_eq!(result.len(), tm_in.len());
}

/// A polygonal cube run through `boolean_mesh` with `Union` against
/// nothing: triangulation splits each quad on a diagonal, the boolean
/// core keeps the whole solid, and detriangulation should dissolve
/// every diagonal straight back into the original 6 quads.
#[test]
fn boolean_mesh_round_trips_a_cube_through_triangulation_and_detriangulation() {
    let mut arena = Arena::new();
    let quads = cube_quads(&mut arena);
    let pm_in = Mesh::new(quads);

    let result = boolean_mesh(&pm_in, BooleanOp::Union, 1, &|_| 0, false, None, &mut arena);
    assert_eq!(result.len(), pm_in.len());
    for &f in &result.faces {
        assert_eq!(arena.face(f).verts.len(), 4);
    }
}
