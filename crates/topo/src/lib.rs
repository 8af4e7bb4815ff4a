//! The topological core: partitions a triangle mesh into patches,
//! patches into cells, finds the cell touching infinity, propagates
//! per-shape winding numbers from it, and extracts the boolean result.
//!
//! Everything here operates purely on [`meshbool_arena::Vertp`] /
//! [`meshbool_arena::Facep`] handles through the [`meshbool_arena::MeshArena`]
//! trait; it owns no storage of its own.

mod ambient;
mod cell;
mod detri;
mod edge;
mod extract;
mod patch;
mod radial;
mod topology;
mod winding;

pub use ambient::find_ambient_cell;
pub use cell::{patch_cell_graph_ok, Cell, CellError, CellsInfo, ValidationError};
pub use detri::detriangulate;
pub use edge::Edge;
pub use extract::extract_surface;
pub use patch::{Patch, PatchesInfo};
pub use radial::{radial_sort, TriRef, EXTRA_TRI_INDEX};
pub use topology::TriMeshTopology;
pub use winding::{propagate_winding, BooleanOp};
