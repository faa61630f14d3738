//! Board topology generation
//!
//! Builds the dual graph of a subdivided cube projected onto the unit
//! sphere: base polyhedron, great-circle subdivision, dual extraction.

mod dual;
mod polyhedron;
mod subdivide;

pub use dual::{extract_dual, DualMesh};
pub use polyhedron::{base_polyhedron, PolyMesh, BASE_EDGES, BASE_QUADS};
pub use subdivide::{great_circle_points, subdivide};

use crate::error::Result;

/// Generate the dual mesh for a subdivision complexity (without range checks)
///
/// Any complexity is accepted here, including 0 (the bare cube, whose dual
/// is an octahedron). Range validation belongs to `BoardConfig`.
pub fn generate_dual(complexity: usize) -> Result<DualMesh> {
    // Step 1: Base cube on the unit sphere
    let base = base_polyhedron();

    // Step 2: Subdivide edges and faces along great circles
    let mesh = subdivide(&base, complexity)?;

    // Step 3: One slot per face, one tile per vertex
    extract_dual(&mesh)
}
