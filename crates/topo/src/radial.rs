use crate::edge::Edge;
use meshbool_arena::{Face, Facep, MeshArena, Vertp};
use meshbool_geom::{orient3d, Orientation};

/// Sentinel triangle index for the synthetic triangle the ambient-cell
/// finder adds to a radial sort (§4.5, §9's "polymorphism of triangle
/// with optional synthetic extra" note). Matches the external interface's
/// `EXTRA_TRI_INDEX = INT_MAX`.
pub const EXTRA_TRI_INDEX: i64 = i64::MAX;

/// One entry of a radial sort's input or output: either a real triangle
/// (by its position in the driver's triangle-index space) or the
/// ambient-cell finder's synthetic probe triangle. A tagged variant
/// rather than a raw index-plus-sentinel, per the design note: the type
/// itself rules out confusing a real triangle with the synthetic one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriRef {
    Real(usize),
    Extra,
}

impl TriRef {
    fn raw_index(self) -> i64 {
        match self {
            TriRef::Real(i) => i as i64,
            TriRef::Extra => EXTRA_TRI_INDEX,
        }
    }
}

fn verts_of(r: TriRef, tris: &[Facep], extra: Option<&Face>, arena: &dyn MeshArena) -> [Vertp; 3] {
    let face = match r {
        TriRef::Real(i) => arena.face(tris[i]),
        TriRef::Extra => extra.expect("radial sort was given TriRef::Extra without an extra triangle"),
    };
    debug_assert!(face.is_triangle(), "radial sort only orders triangles");
    [face.verts[0], face.verts[1], face.verts[2]]
}

/// A triangle's relationship to the edge being sorted around: which of
/// its vertices isn't on the edge (the "flap"), and whether the edge
/// runs `v1 -> v0` in the triangle's own vertex order rather than
/// `v0 -> v1`.
struct TriGeom {
    flap: Vertp,
    rev: bool,
}

fn classify(verts: &[Vertp; 3], v0: Vertp, v1: Vertp) -> TriGeom {
    let ia = verts.iter().position(|&v| v == v0).expect("triangle must contain v0");
    let ib = verts.iter().position(|&v| v == v1).expect("triangle must contain v1");
    debug_assert_ne!(ia, ib);
    let rev = (ib + 1) % 3 == ia;
    debug_assert!(rev || (ia + 1) % 3 == ib, "triangle doesn't contain the edge in either orientation");
    // Indices are a permutation of {0, 1, 2}, which sum to 3, so the
    // third (flap) index falls out without a branch.
    let flap_idx = 3 - ia - ib;
    TriGeom { flap: verts[flap_idx], rev }
}

fn signed_key(r: TriRef, rev: bool) -> i64 {
    if rev {
        -r.raw_index()
    } else {
        r.raw_index()
    }
}

/// Sorts every triangle in `span` clockwise as seen looking along `e`
/// from `v0` to `v1` (§4.3). `pivot` must occur exactly once in `span`
/// and anchors the quicksort-style partition; the merge order depends on
/// whether `pivot` is literally `span[0]`, matching the spec's stated
/// rule for the top-level call (recursive calls always pass their own
/// first element as the pivot, so this only matters for the driver's
/// initial call).
pub fn radial_sort(
    tris: &[Facep],
    arena: &dyn MeshArena,
    e: Edge,
    span: &[TriRef],
    pivot: TriRef,
    extra: Option<&Face>,
) -> Vec<TriRef> {
    debug_assert!(span.contains(&pivot), "pivot must be part of the span being sorted");
    if span.len() <= 1 {
        return span.to_vec();
    }

    let pivot_verts = verts_of(pivot, tris, extra, arena);
    let TriGeom { flap: flap0, rev: rev0 } = classify(&pivot_verts, e.v0, e.v1);

    let mut g1: Vec<(TriRef, bool)> = Vec::new();
    let mut g2: Vec<(TriRef, bool)> = Vec::new();
    let mut g3: Vec<TriRef> = Vec::new();
    let mut g4: Vec<TriRef> = Vec::new();

    for &r in span {
        if r == pivot {
            continue;
        }
        let verts = verts_of(r, tris, extra, arena);
        let TriGeom { flap, rev } = classify(&verts, e.v0, e.v1);

        if flap == flap0 {
            g1.push((r, rev));
            continue;
        }

        let a = arena.vertex(pivot_verts[0]);
        let b = arena.vertex(pivot_verts[1]);
        let c = arena.vertex(pivot_verts[2]);
        let d = arena.vertex(flap);
        match orient3d(&a.co_exact, &b.co_exact, &c.co_exact, &d.co_exact) {
            Orientation::Zero => g2.push((r, rev)),
            Orientation::Negative => {
                if rev0 {
                    g4.push(r)
                } else {
                    g3.push(r)
                }
            }
            Orientation::Positive => {
                if rev0 {
                    g3.push(r)
                } else {
                    g4.push(r)
                }
            }
        }
    }

    g1.sort_by_key(|&(r, rev)| signed_key(r, rev));
    g2.sort_by_key(|&(r, rev)| signed_key(r, rev));
    let g1: Vec<TriRef> = g1.into_iter().map(|(r, _)| r).collect();
    let g2: Vec<TriRef> = g2.into_iter().map(|(r, _)| r).collect();

    let g3 = radial_sort_subgroup(tris, arena, e, g3, extra);
    let g4 = radial_sort_subgroup(tris, arena, e, g4, extra);

    let pivot_is_first = span[0] == pivot;
    let mut out = Vec::with_capacity(span.len());
    if pivot_is_first {
        out.push(pivot);
        out.extend(g1);
        out.extend(g4);
        out.extend(g2);
        out.extend(g3);
    } else {
        out.extend(g3);
        out.push(pivot);
        out.extend(g1);
        out.extend(g4);
        out.extend(g2);
    }
    out
}

fn radial_sort_subgroup(
    tris: &[Facep],
    arena: &dyn MeshArena,
    e: Edge,
    group: Vec<TriRef>,
    extra: Option<&Face>,
) -> Vec<TriRef> {
    if group.len() <= 1 {
        return group;
    }
    let pivot = group[0];
    radial_sort(tris, arena, e, &group, pivot, extra)
}
