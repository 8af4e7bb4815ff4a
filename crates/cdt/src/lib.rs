//! Polygon triangulation (§4.9) and the self-intersection pass-through
//! the topological core is layered on top of.
//!
//! Both the 2D triangulator and the self/nary-intersector are named as
//! external collaborators: the topological core only ever consumes an
//! already-subdivided triangle mesh in which every pair of crossing
//! triangles has been split along their intersection curve. Producing
//! that subdivision for arbitrary input is a project of its own scope;
//! this crate gives the facade a real, working implementation of the
//! *triangulation* half (needed to turn a polygonal input mesh into a
//! triangle mesh at all) and a best-effort pass-through of the
//! *intersection* half, sufficient for the coplanar and non-self-crossing
//! inputs exercised by the test scenarios.

mod error;
mod intersect;
mod triangulate;

pub use error::TriangulateError;
pub use intersect::{trimesh_nary_intersect, trimesh_self_intersect};
pub use triangulate::{triangulate_mesh, triangulate_polygon_2d};
