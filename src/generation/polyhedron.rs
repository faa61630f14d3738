//! Base polyhedron
//!
//! A cube projected onto the unit sphere: 8 vertices, 12 edges and 6 quad
//! faces, all faces wound the same way so every edge is traversed once in
//! each direction.

use glam::Vec3;

/// Edge list of the base cube, smaller index first
pub const BASE_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [0, 2],
    [0, 4],
    [1, 3],
    [1, 5],
    [2, 3],
    [2, 6],
    [3, 7],
    [4, 5],
    [4, 6],
    [5, 7],
    [6, 7],
];

/// Quad faces of the base cube
pub const BASE_QUADS: [[usize; 4]; 6] = [
    [0, 1, 3, 2],
    [0, 4, 5, 1],
    [0, 2, 6, 4],
    [1, 5, 7, 3],
    [2, 3, 7, 6],
    [4, 6, 7, 5],
];

/// Generation-phase polygon mesh on the unit sphere
///
/// Faces are split by primitive type. Triangles are numbered before quads
/// wherever a single face index is needed.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    /// Vertex positions (unit length)
    pub vertices: Vec<Vec3>,
    /// Undirected edges driving subdivision
    pub edges: Vec<[usize; 2]>,
    /// Triangle faces
    pub triangles: Vec<[usize; 3]>,
    /// Quad faces
    pub quads: Vec<[usize; 4]>,
}

impl PolyMesh {
    /// Total number of faces of either kind
    #[inline]
    pub fn face_count(&self) -> usize {
        self.triangles.len() + self.quads.len()
    }
}

/// Build the base polyhedron
///
/// Vertex `i` is the normalised corner `(2*(i/4)-1, 2*((i%4)/2)-1, 2*(i%2)-1)`.
pub fn base_polyhedron() -> PolyMesh {
    let vertices = (0..8)
        .map(|i: i32| {
            Vec3::new(
                (2 * (i / 4) - 1) as f32,
                (2 * ((i % 4) / 2) - 1) as f32,
                (2 * (i % 2) - 1) as f32,
            )
            .normalize()
        })
        .collect();

    PolyMesh {
        vertices,
        edges: BASE_EDGES.to_vec(),
        triangles: Vec::new(),
        quads: BASE_QUADS.to_vec(),
    }
}
