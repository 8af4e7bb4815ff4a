use crate::cell::CellsInfo;
use crate::patch::PatchesInfo;
use meshbool_arena::NO_INDEX;
use std::collections::VecDeque;

/// The requested boolean combination. `None` means "don't run the
/// extractor at all" (§6: `boolean_trimesh` returns the intersected
/// mesh unchanged for this operator).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BooleanOp {
    None,
    Intersection,
    Union,
    Difference,
}

impl BooleanOp {
    /// `keep` (§4.6): whether a cell with winding vector `w` is inside
    /// the requested combination.
    pub fn keep(self, w: &[i64]) -> bool {
        match self {
            BooleanOp::None => false,
            BooleanOp::Intersection => w.iter().all(|&wi| wi != 0),
            BooleanOp::Union => w.iter().any(|&wi| wi != 0),
            BooleanOp::Difference => w[0] != 0 && (w.len() == 1 || w[1..].iter().any(|&wi| wi == 0)),
        }
    }
}

/// Propagates per-shape winding numbers outward from the ambient cell
/// (§4.6) by breadth-first search over the cell-adjacency graph, and
/// sets each cell's `flag` as it's assigned. `shape_of` classifies a
/// triangle index into `[0, nshapes)`; any triangle of a patch suffices
/// since patches don't cross shapes by construction.
pub fn propagate_winding(
    patches: &PatchesInfo,
    cells: &mut CellsInfo,
    ambient: i64,
    nshapes: usize,
    op: BooleanOp,
    shape_of: &dyn Fn(usize) -> usize,
) {
    debug_assert!(ambient != NO_INDEX, "winding propagation needs a valid ambient cell");
    let ambient = ambient as usize;

    cells.cells[ambient].winding = vec![0; nshapes];
    cells.cells[ambient].winding_assigned = true;
    cells.cells[ambient].flag = op.keep(&cells.cells[ambient].winding);

    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(ambient);

    while let Some(c) = queue.pop_front() {
        let current_winding = cells.cells[c].winding.clone();
        for &p in &cells.cells[c].patches.clone() {
            let patch = &patches.patches[p];
            let (neighbor, delta) = if patch.cell_below as usize == c {
                (patch.cell_above, 1)
            } else {
                debug_assert_eq!(patch.cell_above as usize, c);
                (patch.cell_below, -1)
            };
            let neighbor = neighbor as usize;
            if cells.cells[neighbor].winding_assigned {
                continue;
            }
            let shape = shape_of(patch.seed_tri());
            let mut w = current_winding.clone();
            w[shape] += delta;
            cells.cells[neighbor].winding_assigned = true;
            cells.cells[neighbor].flag = op.keep(&w);
            cells.cells[neighbor].winding = w;
            queue.push_back(neighbor);
        }
    }
}
