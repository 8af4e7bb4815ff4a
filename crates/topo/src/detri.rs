use meshbool_arena::{Facep, Mesh, MeshArena, Vertp, NO_INDEX};
use num_traits::Zero;
use std::collections::{HashMap, HashSet};

/// A face under construction by the dissolve pass: one per surviving
/// result triangle until edges between them are dissolved away.
#[derive(Debug, Clone)]
struct MergeFace {
    verts: Vec<Vertp>,
    edge_orig: Vec<i64>,
    /// Index of the face this one was absorbed into, or -1 if it's
    /// still its own face.
    merge_to: i64,
    orig: i64,
}

#[derive(Debug, Clone)]
struct MergeEdge {
    v0: Vertp,
    v1: Vertp,
    len_sq: f64,
    /// Face index visiting the edge `v1 -> v0`, or -1.
    left_face: i64,
    /// Face index visiting the edge `v0 -> v1`, or -1.
    right_face: i64,
    orig: i64,
    dissolvable: bool,
}

/// A finished polygonal face, not yet committed to the arena.
#[derive(Debug, Clone)]
struct DraftFace {
    verts: Vec<Vertp>,
    edge_orig: Vec<i64>,
    orig: i64,
}

/// Reassembles the triangulated result into polygons (§4.8): triangles
/// sharing a purely-synthetic edge with their common input face are
/// merged back, then interior synthetic vertices left collinear by that
/// merge are dropped.
pub fn detriangulate(tm_out: &Mesh, pm_in: &Mesh, arena: &mut dyn MeshArena) -> Mesh {
    let mut group_of: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut group_order: Vec<i64> = Vec::new();
    for (t, &facep) in tm_out.faces.iter().enumerate() {
        let orig = arena.face(facep).orig;
        group_of
            .entry(orig)
            .or_insert_with(|| {
                group_order.push(orig);
                Vec::new()
            })
            .push(t);
    }

    let mut drafts: Vec<DraftFace> = Vec::new();
    let mut general_tris: Vec<usize> = Vec::new();

    for orig in group_order {
        let tris = &group_of[&orig];
        if tris.len() == 1 {
            let face = arena.face(tm_out.faces[tris[0]]);
            drafts.push(DraftFace { verts: face.verts.clone(), edge_orig: face.edge_orig.clone(), orig: face.orig });
            continue;
        }
        if tris.len() == 2 {
            if let Some(quad) = try_fast_quad(tm_out, pm_in, tris, arena) {
                drafts.push(quad);
                continue;
            }
        }
        general_tris.extend_from_slice(tris);
    }

    if !general_tris.is_empty() {
        drafts.extend(dissolve(tm_out, &general_tris, arena));
    }

    vertex_dissolve(&mut drafts, arena);

    let mut out = Vec::with_capacity(drafts.len());
    for d in drafts {
        out.push(arena.add_face(d.verts, d.orig, d.edge_orig));
    }
    Mesh::new(out)
}

fn find_edge_index_in_face(verts: &[Vertp], from: Vertp, to: Vertp) -> usize {
    let n = verts.len();
    for i in 0..n {
        if verts[i] == from && verts[(i + 1) % n] == to {
            return i;
        }
    }
    unreachable!("edge must occur in the face it was recorded against")
}

fn rotate_to_start<T: Clone>(items: &[T], start: usize) -> Vec<T> {
    let n = items.len();
    (0..n).map(|i| items[(start + i) % n].clone()).collect()
}

fn shared_dissolvable_edge(fa_verts: &[Vertp], fa_eo: &[i64], fb_verts: &[Vertp], fb_eo: &[i64]) -> Option<(Vertp, Vertp)> {
    for i in 0..3 {
        if fa_eo[i] != NO_INDEX {
            continue;
        }
        let a0 = fa_verts[i];
        let a1 = fa_verts[(i + 1) % 3];
        for j in 0..3 {
            if fb_eo[j] != NO_INDEX {
                continue;
            }
            if fb_verts[j] == a1 && fb_verts[(j + 1) % 3] == a0 {
                return Some((a0, a1));
            }
        }
    }
    None
}

fn cyclic_match(a: &[Vertp], b: &[Vertp]) -> bool {
    if a.len() != b.len() || a.is_empty() {
        return a.len() == b.len();
    }
    let n = a.len();
    (0..n).any(|shift| (0..n).all(|i| a[i] == b[(i + shift) % n]))
}

/// Two triangles whose shared diagonal is purely synthetic, recombined
/// into a quad, are emitted directly only if that quad is the original
/// input face up to cyclic rotation — otherwise the general dissolve
/// pass decides whether to merge them.
fn try_fast_quad(tm_out: &Mesh, pm_in: &Mesh, tris: &[usize], arena: &dyn MeshArena) -> Option<DraftFace> {
    let fa = arena.face(tm_out.faces[tris[0]]);
    let fb = arena.face(tm_out.faces[tris[1]]);
    let orig = fa.orig;
    if orig == NO_INDEX || orig as usize >= pm_in.faces.len() {
        return None;
    }
    let (v0, v1) = shared_dissolvable_edge(&fa.verts, &fa.edge_orig, &fb.verts, &fb.edge_orig)?;

    let ia = find_edge_index_in_face(&fa.verts, v0, v1);
    let ib = find_edge_index_in_face(&fb.verts, v1, v0);
    let rot_a_verts = rotate_to_start(&fa.verts, (ia + 1) % 3);
    let rot_a_eo = rotate_to_start(&fa.edge_orig, (ia + 1) % 3);
    let rot_b_verts = rotate_to_start(&fb.verts, (ib + 1) % 3);
    let rot_b_eo = rotate_to_start(&fb.edge_orig, (ib + 1) % 3);

    let mut verts = rot_a_verts[..2].to_vec();
    verts.extend_from_slice(&rot_b_verts[..2]);
    let mut edge_orig = rot_a_eo[..2].to_vec();
    edge_orig.extend_from_slice(&rot_b_eo[..2]);

    let original_face = arena.face(pm_in.faces[orig as usize]);
    if cyclic_match(&verts, &original_face.verts) {
        Some(DraftFace { verts, edge_orig, orig })
    } else {
        None
    }
}

/// The general path (§4.8): builds `MergeFace`/`MergeEdge` tables over
/// `tris`, dissolves the longest dissolvable edges first, and returns
/// the faces that survive.
fn dissolve(tm_out: &Mesh, tris: &[usize], arena: &dyn MeshArena) -> Vec<DraftFace> {
    let n = tris.len();
    let mut faces: Vec<MergeFace> = Vec::with_capacity(n);
    let mut edges: Vec<MergeEdge> = Vec::new();
    let mut face_edges: Vec<Vec<usize>> = Vec::with_capacity(n);
    let mut edge_map: HashMap<(u32, u32), usize> = HashMap::new();

    for &t in tris {
        let face = arena.face(tm_out.faces[t]);
        faces.push(MergeFace { verts: face.verts.clone(), edge_orig: face.edge_orig.clone(), merge_to: -1, orig: face.orig });
        face_edges.push(vec![0; face.verts.len()]);
    }

    for fi in 0..n {
        let verts = faces[fi].verts.clone();
        let eo = faces[fi].edge_orig.clone();
        let m = verts.len();
        for i in 0..m {
            let a = verts[i];
            let b = verts[(i + 1) % m];
            let ida = arena.vertex(a).id;
            let idb = arena.vertex(b).id;
            let (lo, hi, a_is_lo) = if ida <= idb { (a, b, true) } else { (b, a, false) };
            let key = (arena.vertex(lo).id, arena.vertex(hi).id);

            let ei = *edge_map.entry(key).or_insert_with(|| {
                let len_sq = {
                    let pa = arena.vertex(lo).co;
                    let pb = arena.vertex(hi).co;
                    pb.sub(&pa).length_squared()
                };
                edges.push(MergeEdge { v0: lo, v1: hi, len_sq, left_face: -1, right_face: -1, orig: NO_INDEX, dissolvable: true });
                edges.len() - 1
            });

            let e = &mut edges[ei];
            if a_is_lo {
                e.right_face = fi as i64;
            } else {
                e.left_face = fi as i64;
            }
            if eo[i] != NO_INDEX {
                e.dissolvable = false;
                if e.orig == NO_INDEX {
                    e.orig = eo[i];
                }
            }
            face_edges[fi][i] = ei;
        }
    }

    let mut order: Vec<usize> = (0..edges.len()).filter(|&i| edges[i].dissolvable).collect();
    order.sort_by(|&a, &b| edges[b].len_sq.total_cmp(&edges[a].len_sq));

    for ei in order {
        let (l, r) = (edges[ei].left_face, edges[ei].right_face);
        if l < 0 || r < 0 {
            continue;
        }
        let (l, r) = (l as usize, r as usize);
        if faces[l].merge_to != -1 || faces[r].merge_to != -1 {
            continue;
        }
        if !bmesh_safe(l, r, ei, &faces, &edges, &face_edges) {
            continue;
        }
        splice(l, r, ei, &mut faces, &mut edges, &mut face_edges);
    }

    faces
        .into_iter()
        .filter(|f| f.merge_to == -1)
        .map(|f| DraftFace { verts: f.verts, edge_orig: f.edge_orig, orig: f.orig })
        .collect()
}

fn bmesh_safe(l: usize, r: usize, ei: usize, faces: &[MergeFace], edges: &[MergeEdge], face_edges: &[Vec<usize>]) -> bool {
    for &oe in &face_edges[l] {
        if oe == ei {
            continue;
        }
        let e = &edges[oe];
        if e.left_face == r as i64 || e.right_face == r as i64 {
            return false;
        }
    }
    let (v0, v1) = (edges[ei].v0, edges[ei].v1);
    for &v in &faces[l].verts {
        if v == v0 || v == v1 {
            continue;
        }
        if faces[r].verts.contains(&v) {
            return false;
        }
    }
    true
}

fn splice(l: usize, r: usize, ei: usize, faces: &mut [MergeFace], edges: &mut [MergeEdge], face_edges: &mut [Vec<usize>]) {
    let (v0, v1) = (edges[ei].v0, edges[ei].v1);
    let nl = faces[l].verts.len();
    let nr = faces[r].verts.len();
    let pos_l = find_edge_index_in_face(&faces[l].verts, v1, v0);
    let pos_r = find_edge_index_in_face(&faces[r].verts, v0, v1);

    let rot_l_verts = rotate_to_start(&faces[l].verts, (pos_l + 1) % nl);
    let rot_l_eo = rotate_to_start(&faces[l].edge_orig, (pos_l + 1) % nl);
    let rot_l_edges = rotate_to_start(&face_edges[l], (pos_l + 1) % nl);
    let rot_r_verts = rotate_to_start(&faces[r].verts, (pos_r + 1) % nr);
    let rot_r_eo = rotate_to_start(&faces[r].edge_orig, (pos_r + 1) % nr);
    let rot_r_edges = rotate_to_start(&face_edges[r], (pos_r + 1) % nr);

    let mut new_verts = rot_l_verts[..nl - 1].to_vec();
    new_verts.extend_from_slice(&rot_r_verts[..nr - 1]);
    let mut new_eo = rot_l_eo[..nl - 1].to_vec();
    new_eo.extend_from_slice(&rot_r_eo[..nr - 1]);
    let mut new_face_edges = rot_l_edges[..nl - 1].to_vec();
    new_face_edges.extend_from_slice(&rot_r_edges[..nr - 1]);

    for &oe in &new_face_edges {
        if edges[oe].left_face == r as i64 {
            edges[oe].left_face = l as i64;
        }
        if edges[oe].right_face == r as i64 {
            edges[oe].right_face = l as i64;
        }
    }

    faces[l].verts = new_verts;
    faces[l].edge_orig = new_eo;
    face_edges[l] = new_face_edges;
    faces[r].merge_to = l as i64;
    edges[ei].left_face = -1;
    edges[ei].right_face = -1;
}

/// Collapses synthetic, degree-2, collinear vertices out of the drafted
/// faces (§4.8's vertex-dissolve pass). Runs to a fixpoint since
/// collapsing one vertex can expose another.
fn vertex_dissolve(drafts: &mut Vec<DraftFace>, arena: &dyn MeshArena) {
    loop {
        let mut neighbors: HashMap<Vertp, HashSet<Vertp>> = HashMap::new();
        for face in drafts.iter() {
            let n = face.verts.len();
            for i in 0..n {
                let v = face.verts[i];
                let prev = face.verts[(i + n - 1) % n];
                let next = face.verts[(i + 1) % n];
                let set = neighbors.entry(v).or_default();
                set.insert(prev);
                set.insert(next);
            }
        }

        let mut candidates: Vec<Vertp> = neighbors.keys().copied().collect();
        candidates.sort_by_key(|&v| arena.vertex(v).id);

        let mut to_remove: HashSet<Vertp> = HashSet::new();
        for v in candidates {
            if arena.vertex(v).orig != NO_INDEX {
                continue;
            }
            let ns = &neighbors[&v];
            if ns.len() != 2 {
                continue;
            }
            let mut it = ns.iter();
            let u = *it.next().unwrap();
            let w = *it.next().unwrap();
            let a = &arena.vertex(v).co_exact - &arena.vertex(u).co_exact;
            let b = &arena.vertex(w).co_exact - &arena.vertex(v).co_exact;
            let cross = a.cross(&b);
            if cross.x.is_zero() && cross.y.is_zero() && cross.z.is_zero() {
                to_remove.insert(v);
            }
        }

        if to_remove.is_empty() {
            return;
        }
        for face in drafts.iter_mut() {
            remove_vertices_from_face(face, &to_remove);
        }
    }
}

fn remove_vertices_from_face(face: &mut DraftFace, remove: &HashSet<Vertp>) {
    if !face.verts.iter().any(|v| remove.contains(v)) {
        return;
    }
    let n = face.verts.len();
    let mut new_verts = Vec::with_capacity(n);
    let mut new_eo = Vec::with_capacity(n);
    for i in 0..n {
        if remove.contains(&face.verts[i]) {
            continue;
        }
        new_verts.push(face.verts[i]);
        let prev_eo = face.edge_orig[(i + n - 1) % n];
        let this_eo = face.edge_orig[i];
        let merged = if remove.contains(&face.verts[(i + n - 1) % n]) && prev_eo != NO_INDEX { prev_eo } else { this_eo };
        new_eo.push(merged);
    }
    face.verts = new_verts;
    face.edge_orig = new_eo;
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshbool_arena::Arena;
    use meshbool_geom::Vec3Exact;

    /// A quad input face, pre-split into two triangles along a synthetic
    /// diagonal, should detriangulate straight back into the quad.
    #[test]
    fn quad_split_by_a_synthetic_diagonal_reassembles() {
        let mut arena = Arena::new();
        let a = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 0), 0);
        let b = arena.add_or_find_vert(Vec3Exact::from_i64(1, 0, 0), 1);
        let c = arena.add_or_find_vert(Vec3Exact::from_i64(1, 1, 0), 2);
        let d = arena.add_or_find_vert(Vec3Exact::from_i64(0, 1, 0), 3);

        let pm_face = arena.add_face(vec![a, b, c, d], 0, vec![0, 1, 2, 3]);
        let pm_in = Mesh::new(vec![pm_face]);

        let t0 = arena.add_face(vec![a, b, c], 0, vec![0, 1, NO_INDEX]);
        let t1 = arena.add_face(vec![a, c, d], 0, vec![NO_INDEX, 2, 3]);
        let tm_out = Mesh::new(vec![t0, t1]);

        let result = detriangulate(&tm_out, &pm_in, &mut arena);
        assert_eq!(result.len(), 1);
        let face = arena.face(result.faces[0]);
        assert_eq!(face.verts.len(), 4);
        assert!(cyclic_match(&face.verts, &[a, b, c, d]));
    }

    /// A pentagon fan-triangulated from one corner has two synthetic
    /// diagonals and three real triangles, forcing the general dissolve
    /// path (a group of more than two triangles never qualifies for the
    /// fast quad path). Both diagonals should dissolve away, leaving the
    /// original pentagon.
    #[test]
    fn a_fan_triangulated_pentagon_dissolves_back_to_one_face() {
        let mut arena = Arena::new();
        let a = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 0), 0);
        let b = arena.add_or_find_vert(Vec3Exact::from_i64(2, 0, 0), 1);
        let c = arena.add_or_find_vert(Vec3Exact::from_i64(3, 2, 0), 2);
        let d = arena.add_or_find_vert(Vec3Exact::from_i64(1, 3, 0), 3);
        let e = arena.add_or_find_vert(Vec3Exact::from_i64(-1, 1, 0), 4);

        let pm_face = arena.add_face(vec![a, b, c, d, e], 0, vec![0, 1, 2, 3, 4]);
        let pm_in = Mesh::new(vec![pm_face]);

        let t0 = arena.add_face(vec![a, b, c], 0, vec![0, 1, NO_INDEX]);
        let t1 = arena.add_face(vec![a, c, d], 0, vec![NO_INDEX, 2, NO_INDEX]);
        let t2 = arena.add_face(vec![a, d, e], 0, vec![NO_INDEX, 3, 4]);
        let tm_out = Mesh::new(vec![t0, t1, t2]);

        let result = detriangulate(&tm_out, &pm_in, &mut arena);
        assert_eq!(result.len(), 1);
        let face = arena.face(result.faces[0]);
        assert_eq!(face.verts.len(), 5);
        assert!(cyclic_match(&face.verts, &[a, b, c, d, e]));
    }

    /// A single result triangle whose original face was already a
    /// triangle passes through untouched.
    #[test]
    fn a_lone_triangle_group_passes_through() {
        let mut arena = Arena::new();
        let a = arena.add_or_find_vert(Vec3Exact::from_i64(0, 0, 0), 0);
        let b = arena.add_or_find_vert(Vec3Exact::from_i64(1, 0, 0), 1);
        let c = arena.add_or_find_vert(Vec3Exact::from_i64(0, 1, 0), 2);
        let pm_face = arena.add_face(vec![a, b, c], 0, vec![0, 1, 2]);
        let pm_in = Mesh::new(vec![pm_face]);
        let t0 = arena.add_face(vec![a, b, c], 0, vec![0, 1, 2]);
        let tm_out = Mesh::new(vec![t0]);

        let result = detriangulate(&tm_out, &pm_in, &mut arena);
        assert_eq!(result.len(), 1);
        assert_eq!(arena.face(result.faces[0]).verts.len(), 3);
    }
}
