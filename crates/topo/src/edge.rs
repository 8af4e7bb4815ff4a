use meshbool_arena::{MeshArena, Vertp};

/// An unordered pair of vertices, canonicalized so the endpoint with the
/// smaller stable `id` is always `v0`. Two edges are equal iff they
/// connect the same two vertices, regardless of which one a particular
/// triangle happened to list first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub v0: Vertp,
    pub v1: Vertp,
}

impl Edge {
    pub fn canonical(arena: &dyn MeshArena, a: Vertp, b: Vertp) -> Edge {
        debug_assert_ne!(a, b, "an edge needs two distinct vertices");
        if arena.vertex(a).id <= arena.vertex(b).id {
            Edge { v0: a, v1: b }
        } else {
            Edge { v0: b, v1: a }
        }
    }
}
