use crate::patch::PatchesInfo;
use crate::radial::{radial_sort, TriRef};
use crate::topology::TriMeshTopology;
use meshbool_arena::{Facep, MeshArena, NO_INDEX};
use std::collections::HashSet;

/// A maximal connected open region of 3-space bounded by patches.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub patches: Vec<usize>,
    /// Per-shape winding numbers; empty until the winding propagator runs.
    pub winding: Vec<i64>,
    /// True iff this cell is inside the boolean result.
    pub flag: bool,
    pub winding_assigned: bool,
}

impl Cell {
    fn new() -> Cell {
        Cell::default()
    }
}

#[derive(Debug, Default)]
pub struct CellsInfo {
    pub cells: Vec<Cell>,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    #[error("cell builder needs to merge two already-distinct cells (patches {0} and {1}), which is currently unsupported")]
    MergeRequired(usize, usize),
}

/// Which of a patch's two sides a triangle's winding exits through.
fn side_of(rev: bool) -> Side {
    if rev {
        Side::Below
    } else {
        Side::Above
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Above,
    Below,
}

fn get_side(patches: &PatchesInfo, patch: usize, side: Side) -> i64 {
    let p = &patches.patches[patch];
    match side {
        Side::Above => p.cell_above,
        Side::Below => p.cell_below,
    }
}

fn set_side(patches: &mut PatchesInfo, patch: usize, side: Side, cell: i64) {
    let p = &mut patches.patches[patch];
    match side {
        Side::Above => p.cell_above = cell,
        Side::Below => p.cell_below = cell,
    }
}

impl CellsInfo {
    /// Builds cells from the patch partition (§4.4): every pair of
    /// patches sharing a representative non-manifold edge is processed
    /// once, radially sorting the triangles on that edge to discover
    /// which patch sides bound the same cell.
    pub fn build(
        tris: &[Facep],
        topo: &TriMeshTopology,
        patches: &mut PatchesInfo,
        arena: &dyn MeshArena,
    ) -> Result<CellsInfo, CellError> {
        let mut cells = CellsInfo::default();
        let mut processed: HashSet<(usize, usize)> = HashSet::new();

        let mut pairs: Vec<(usize, usize)> = patches.pp_edge.keys().copied().collect();
        pairs.sort_unstable();

        for (p, q) in pairs {
            let key = if p < q { (p, q) } else { (q, p) };
            if processed.contains(&key) {
                continue;
            }
            processed.insert(key);

            let edge = patches.pp_edge[&(p, q)];
            let on_edge = &topo.edge_tri[&edge];
            let span: Vec<TriRef> = on_edge.iter().map(|&t| TriRef::Real(t)).collect();
            let pivot = span[0];
            let sorted = radial_sort(tris, arena, edge, &span, pivot, None);

            let edge_patches: Vec<(usize, bool)> = sorted
                .iter()
                .map(|&r| match r {
                    TriRef::Real(t) => {
                        let face = arena.face(tris[t]);
                        let rev = {
                            let ia = face.verts.iter().position(|&v| v == edge.v0).expect("triangle must contain v0");
                            let ib = face.verts.iter().position(|&v| v == edge.v1).expect("triangle must contain v1");
                            (ib + 1) % 3 == ia
                        };
                        (patches.tri_patch[t] as usize, rev)
                    }
                    TriRef::Extra => unreachable!("cell builder never supplies a synthetic triangle"),
                })
                .collect();

            let n = edge_patches.len();
            for i in 0..n {
                let (r_patch, r_rev) = edge_patches[i];
                let (next_patch, next_rev) = edge_patches[(i + 1) % n];

                let r_follow_side = side_of(r_rev);
                let next_prev_side = match side_of(next_rev) {
                    Side::Above => Side::Below,
                    Side::Below => Side::Above,
                };

                let follow = get_side(patches, r_patch, r_follow_side);
                let prev = get_side(patches, next_patch, next_prev_side);

                match (follow == NO_INDEX, prev == NO_INDEX) {
                    (true, true) => {
                        let cell_id = cells.cells.len() as i64;
                        cells.cells.push(Cell::new());
                        set_side(patches, r_patch, r_follow_side, cell_id);
                        set_side(patches, next_patch, next_prev_side, cell_id);
                        add_patch_once(&mut cells.cells[cell_id as usize], r_patch);
                        add_patch_once(&mut cells.cells[cell_id as usize], next_patch);
                    }
                    (false, true) => {
                        set_side(patches, next_patch, next_prev_side, follow);
                        add_patch_once(&mut cells.cells[follow as usize], next_patch);
                    }
                    (true, false) => {
                        set_side(patches, r_patch, r_follow_side, prev);
                        add_patch_once(&mut cells.cells[prev as usize], r_patch);
                    }
                    (false, false) => {
                        if follow != prev {
                            return Err(CellError::MergeRequired(r_patch, next_patch));
                        }
                    }
                }
            }
        }

        // A patch with no representative edge to any other patch (the
        // common case of a single closed, non-self-intersecting shape)
        // never gets visited by the loop above — there is no pp_edge
        // pair naming it. Each such patch still separates exactly two
        // cells, so any side still unbound seeds a fresh one here, in
        // ascending patch order for determinism.
        for p in 0..patches.patches.len() {
            for side in [Side::Above, Side::Below] {
                if get_side(patches, p, side) == NO_INDEX {
                    let cell_id = cells.cells.len() as i64;
                    cells.cells.push(Cell::new());
                    set_side(patches, p, side, cell_id);
                    add_patch_once(&mut cells.cells[cell_id as usize], p);
                }
            }
        }

        Ok(cells)
    }
}

fn add_patch_once(cell: &mut Cell, patch: usize) {
    if !cell.patches.contains(&patch) {
        cell.patches.push(patch);
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("patch {0} has no bound side")]
    UnboundPatchSide(usize),
    #[error("cell {0} has no patches")]
    EmptyCell(usize),
    #[error("the patch/cell graph is disconnected")]
    Disconnected,
}

/// `patch_cell_graph_ok` (§4.4.1): every cell has at least one patch,
/// every patch has both sides bound, and the bipartite patch/cell graph
/// is connected.
pub fn patch_cell_graph_ok(patches: &PatchesInfo, cells: &CellsInfo) -> Result<(), ValidationError> {
    for (i, patch) in patches.patches.iter().enumerate() {
        if patch.cell_above == NO_INDEX || patch.cell_below == NO_INDEX {
            return Err(ValidationError::UnboundPatchSide(i));
        }
    }
    for (i, cell) in cells.cells.iter().enumerate() {
        if cell.patches.is_empty() {
            return Err(ValidationError::EmptyCell(i));
        }
    }

    if patches.patches.is_empty() {
        return Ok(());
    }

    let mut seen_patches = vec![false; patches.patches.len()];
    let mut seen_cells = vec![false; cells.cells.len()];
    let mut stack = vec![0usize];
    seen_patches[0] = true;
    while let Some(p) = stack.pop() {
        let patch = &patches.patches[p];
        for &c in &[patch.cell_above, patch.cell_below] {
            let c = c as usize;
            if seen_cells[c] {
                continue;
            }
            seen_cells[c] = true;
            for &p2 in &cells.cells[c].patches {
                if !seen_patches[p2] {
                    seen_patches[p2] = true;
                    stack.push(p2);
                }
            }
        }
    }

    if seen_patches.iter().all(|&b| b) && seen_cells.iter().all(|&b| b) {
        Ok(())
    } else {
        Err(ValidationError::Disconnected)
    }
}
