use crate::error::TriangulateError;
use meshbool_arena::{Face, Mesh, MeshArena, NO_INDEX};
use meshbool_geom::{Axis, Orientation, Vec2Exact, Vec3Exact};
use num_traits::{Signed, Zero};

/// Triangulates every face of `pm`, following §4.9: triangles pass
/// through unchanged, quads split on their `0-2` diagonal, and larger
/// polygons are projected to 2D and ear-clipped.
///
/// Ear-clipping (rather than a true constrained Delaunay triangulation)
/// is what stands in here for the external 2D-triangulation collaborator:
/// the topological core doesn't care whether a face's triangulation is
/// Delaunay, only that it's a valid triangulation with `edge_orig`
/// recovered correctly, and ear-clipping gives that with the same exact
/// predicate (`orient2d`) the rest of the crate already depends on.
pub fn triangulate_mesh(pm: &Mesh, arena: &mut dyn MeshArena) -> Mesh {
    let mut out_faces = Vec::with_capacity(pm.faces.len());
    for &f in &pm.faces {
        let face = arena.face(f).clone();
        let n = face.verts.len();
        if n == 3 {
            out_faces.push(f);
            continue;
        }
        if n == 4 {
            let (v0, v1, v2, v3) = (face.verts[0], face.verts[1], face.verts[2], face.verts[3]);
            let (e0, e1, e2, e3) =
                (face.edge_orig[0], face.edge_orig[1], face.edge_orig[2], face.edge_orig[3]);
            out_faces.push(arena.add_face(vec![v0, v1, v2], face.orig, vec![e0, e1, NO_INDEX]));
            out_faces.push(arena.add_face(vec![v0, v2, v3], face.orig, vec![NO_INDEX, e2, e3]));
            continue;
        }

        let axis = face.plane.normal.dominant_axis();
        let points2d: Vec<Vec2Exact> = face
            .verts
            .iter()
            .map(|&v| project(&arena.vertex(v).co_exact, axis))
            .collect();

        match triangulate_polygon_2d(&points2d) {
            Ok(tris) => {
                for [i, j, k] in tris {
                    let verts = vec![face.verts[i], face.verts[j], face.verts[k]];
                    let edge_orig = vec![
                        recover_edge_orig(&face, i, j, n),
                        recover_edge_orig(&face, j, k, n),
                        recover_edge_orig(&face, k, i, n),
                    ];
                    out_faces.push(arena.add_face(verts, face.orig, edge_orig));
                }
            }
            Err(err) => {
                log::warn!(
                    target: "meshbool::cdt",
                    "face (orig {}) could not be ear-clipped ({}), falling back to a fan triangulation",
                    face.orig,
                    err,
                );
                for k in 1..n - 1 {
                    let verts = vec![face.verts[0], face.verts[k], face.verts[k + 1]];
                    let edge_orig = vec![
                        recover_edge_orig(&face, 0, k, n),
                        recover_edge_orig(&face, k, k + 1, n),
                        recover_edge_orig(&face, k + 1, 0, n),
                    ];
                    out_faces.push(arena.add_face(verts, face.orig, edge_orig));
                }
            }
        }
    }
    Mesh::new(out_faces)
}

/// `i -> j` is a side of the original polygon (rather than a diagonal
/// introduced by triangulation) iff the two indices are cyclically
/// adjacent; in that case the original polygon's `edge_orig` at that
/// position is the answer, otherwise it's a synthetic edge.
fn recover_edge_orig(face: &Face, i: usize, j: usize, n: usize) -> i64 {
    if j == (i + 1) % n {
        face.edge_orig[i]
    } else if i == (j + 1) % n {
        face.edge_orig[j]
    } else {
        NO_INDEX
    }
}

/// Projects a point onto the plane orthogonal to `axis`, using the axis
/// ordering that keeps the projection's handedness matching the face's
/// own winding. Dropping `y` naively (keeping `(z, x)`) flips handedness
/// relative to dropping `x` or `z`, so the `y` case keeps `(x, z)`
/// instead to undo that flip.
fn project(p: &Vec3Exact, axis: Axis) -> Vec2Exact {
    match axis {
        Axis::X => Vec2Exact::new(p.y.clone(), p.z.clone()),
        Axis::Y => Vec2Exact::new(p.x.clone(), p.z.clone()),
        Axis::Z => Vec2Exact::new(p.x.clone(), p.y.clone()),
    }
}

/// Triangulates a simple 2D polygon (no holes, no self-intersections) by
/// ear-clipping. Returns triangles as index triples into `points`.
pub fn triangulate_polygon_2d(points: &[Vec2Exact]) -> Result<Vec<[usize; 3]>, TriangulateError> {
    let n = points.len();
    if n < 3 {
        return Err(TriangulateError::TooFewVertices(n));
    }
    if n == 3 {
        return Ok(vec![[0, 1, 2]]);
    }

    let area2 = signed_area2(points);
    if area2.is_zero() {
        return Err(TriangulateError::NoEarFound);
    }
    let ccw = area2.is_positive();

    let mut active: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while active.len() > 3 {
        let m = active.len();
        let mut found = None;
        for i in 0..m {
            let prev = active[(i + m - 1) % m];
            let cur = active[i];
            let next = active[(i + 1) % m];
            if !is_convex_corner(&points[prev], &points[cur], &points[next], ccw) {
                continue;
            }
            let mut blocked = false;
            for &r in &active {
                if r == prev || r == cur || r == next {
                    continue;
                }
                if point_in_triangle(&points[r], &points[prev], &points[cur], &points[next], ccw) {
                    blocked = true;
                    break;
                }
            }
            if !blocked {
                found = Some(i);
                break;
            }
        }
        let i = found.ok_or(TriangulateError::NoEarFound)?;
        let prev = active[(i + m - 1) % m];
        let cur = active[i];
        let next = active[(i + 1) % m];
        triangles.push([prev, cur, next]);
        active.remove(i);
    }
    triangles.push([active[0], active[1], active[2]]);
    Ok(triangles)
}

fn signed_area2(points: &[Vec2Exact]) -> meshbool_geom::Rat {
    let n = points.len();
    let mut sum = meshbool_geom::rat(0);
    for i in 0..n {
        let j = (i + 1) % n;
        sum = sum + (&points[i].x * &points[j].y - &points[j].x * &points[i].y);
    }
    sum
}

fn is_convex_corner(prev: &Vec2Exact, cur: &Vec2Exact, next: &Vec2Exact, ccw: bool) -> bool {
    match meshbool_geom::orient2d(prev, cur, next) {
        Orientation::Positive => ccw,
        Orientation::Negative => !ccw,
        Orientation::Zero => false,
    }
}

/// True if `p` is inside (or on the boundary of) the triangle `(a, b, c)`,
/// which winds `ccw` if `ccw` else clockwise.
fn point_in_triangle(p: &Vec2Exact, a: &Vec2Exact, b: &Vec2Exact, c: &Vec2Exact, ccw: bool) -> bool {
    let matches = |o: Orientation| match o {
        Orientation::Positive => ccw,
        Orientation::Negative => !ccw,
        Orientation::Zero => true,
    };
    matches(meshbool_geom::orient2d(a, b, p))
        && matches(meshbool_geom::orient2d(b, c, p))
        && matches(meshbool_geom::orient2d(c, a, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshbool_geom::rat;

    fn v(x: i64, y: i64) -> Vec2Exact {
        Vec2Exact::new(rat(x), rat(y))
    }

    #[test]
    fn triangulates_a_convex_pentagon() {
        let pts = vec![v(0, 0), v(2, 0), v(3, 2), v(1, 3), v(-1, 1)];
        let tris = triangulate_polygon_2d(&pts).unwrap();
        assert_eq!(tris.len(), 3);
        let mut seen: std::collections::HashSet<usize> = std::collections::HashSet::new();
        for t in &tris {
            seen.insert(t[0]);
            seen.insert(t[1]);
            seen.insert(t[2]);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn triangulates_an_l_shape_with_a_reflex_corner() {
        // An L-shaped hexagon: reflex corner at index 3.
        let pts = vec![v(0, 0), v(2, 0), v(2, 1), v(1, 1), v(1, 2), v(0, 2)];
        let tris = triangulate_polygon_2d(&pts).unwrap();
        assert_eq!(tris.len(), 4);
    }

    #[test]
    fn collinear_polygon_is_rejected() {
        let pts = vec![v(0, 0), v(1, 0), v(2, 0), v(3, 0)];
        assert!(triangulate_polygon_2d(&pts).is_err());
    }

    #[test]
    fn triangle_passes_through_unchanged() {
        let pts = vec![v(0, 0), v(1, 0), v(0, 1)];
        assert_eq!(triangulate_polygon_2d(&pts).unwrap(), vec![[0, 1, 2]]);
    }
}
