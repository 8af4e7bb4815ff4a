use crate::{Face, Facep, Vertex, Vertp};
use meshbool_geom::{Plane, Vec3Exact};
use slotmap::SlotMap;
use std::collections::HashMap;
use std::ops;

/// The narrow interface the topological core needs from an arena.
///
/// Modeled directly on the spec's external-collaborator interface
/// (§6): `add_or_find_vert` and `add_face` are the only mutating
/// operations any pipeline stage performs.
pub trait MeshArena {
    fn add_or_find_vert(&mut self, co_exact: Vec3Exact, orig: i64) -> Vertp;
    fn add_face(&mut self, verts: Vec<Vertp>, orig: i64, edge_orig: Vec<i64>) -> Facep;
    fn vertex(&self, v: Vertp) -> &Vertex;
    fn face(&self, f: Facep) -> &Face;
}

/// The concrete, `slotmap`-backed arena.
#[derive(Default)]
pub struct Arena {
    verts: SlotMap<Vertp, Vertex>,
    faces: SlotMap<Facep, Face>,
    vert_by_coord: HashMap<Vec3Exact, Vertp>,
    next_vert_id: u32,
}

impl Arena {
    pub fn new() -> Arena {
        Arena {
            verts: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            vert_by_coord: HashMap::new(),
            next_vert_id: 0,
        }
    }

    pub fn with_capacities(verts: usize, faces: usize) -> Arena {
        let mut arena = Arena::new();
        arena.verts = SlotMap::with_capacity_and_key(verts);
        arena.faces = SlotMap::with_capacity_and_key(faces);
        arena.vert_by_coord = HashMap::with_capacity(verts);
        arena
    }

    pub fn vert_count(&self) -> usize {
        self.verts.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl MeshArena for Arena {
    fn add_or_find_vert(&mut self, co_exact: Vec3Exact, orig: i64) -> Vertp {
        if let Some(&existing) = self.vert_by_coord.get(&co_exact) {
            return existing;
        }
        let co = co_exact.to_f64();
        let id = self.next_vert_id;
        self.next_vert_id += 1;
        let key = self.verts.insert(Vertex { co_exact: co_exact.clone(), co, id, orig });
        self.vert_by_coord.insert(co_exact, key);
        key
    }

    fn add_face(&mut self, verts: Vec<Vertp>, orig: i64, edge_orig: Vec<i64>) -> Facep {
        debug_assert!(verts.len() >= 3, "a face needs at least 3 vertices");
        debug_assert_eq!(verts.len(), edge_orig.len());
        let plane = {
            let a = &self.verts[verts[0]].co_exact;
            let b = &self.verts[verts[1]].co_exact;
            let c = &self.verts[verts[2]].co_exact;
            Plane::from_triangle(a, b, c)
        };
        self.faces.insert(Face { verts, orig, edge_orig, plane })
    }

    fn vertex(&self, v: Vertp) -> &Vertex {
        &self.verts[v]
    }

    fn face(&self, f: Facep) -> &Face {
        &self.faces[f]
    }
}

impl ops::Index<Vertp> for Arena {
    type Output = Vertex;
    fn index(&self, id: Vertp) -> &Vertex {
        &self.verts[id]
    }
}

impl ops::Index<Facep> for Arena {
    type Output = Face;
    fn index(&self, id: Facep) -> &Face {
        &self.faces[id]
    }
}
