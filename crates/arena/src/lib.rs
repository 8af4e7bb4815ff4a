//! The vertex/face arena and the `Vertex` / `Face` / `Mesh` data model.
//!
//! This crate plays the role the spec calls an external collaborator:
//! the topological core (`meshbool-topo`) only ever sees `Vertp`/`Facep`
//! handles and the narrow [`MeshArena`] interface, never the storage
//! underneath. [`Arena`] is the concrete, `slotmap`-backed implementation
//! an application actually constructs.

mod arena;
mod mesh;

pub use arena::{Arena, MeshArena};
pub use mesh::{Face, Mesh, Vertex};

/// Sentinel for an `orig`/`edge_orig` field that doesn't reference an
/// input vertex, face or edge (i.e. one introduced by triangulation,
/// intersection or the boolean operation itself).
pub const NO_INDEX: i64 = -1;

slotmap::new_key_type! {
    /// A handle to a [`Vertex`] owned by an [`Arena`].
    pub struct Vertp;
    /// A handle to a [`Face`] owned by an [`Arena`].
    pub struct Facep;
}
