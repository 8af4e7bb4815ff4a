/// An error raised while triangulating a polygonal face.
///
/// Per the surrounding Non-goal ("robust handling of grossly malformed
/// input beyond a best-effort pass-through"), none of these abort a
/// whole-mesh triangulation: [`crate::triangulate_mesh`] logs and falls
/// back to a fan triangulation instead of propagating them. The type
/// exists so callers that triangulate a single face directly can tell
/// the difference between "triangulated" and "degenerate fallback used".
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangulateError {
    #[error("a face needs at least 3 vertices to be triangulated, got {0}")]
    TooFewVertices(usize),
    #[error("no ear could be found in the remaining polygon, it is likely self-intersecting or has zero area")]
    NoEarFound,
}
