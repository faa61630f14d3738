//! Dual graph extraction
//!
//! Each face of the subdivided mesh becomes a slot. Each mesh vertex becomes
//! a tile: the cycle of faces around that vertex, which in turn yields the
//! slot-to-slot connections.

use glam::Vec3;
use std::collections::BTreeSet;

use crate::error::{Result, SphereGoError};

use super::polyhedron::PolyMesh;

/// Dual of a closed polygon mesh
#[derive(Debug, Clone, Default)]
pub struct DualMesh {
    /// One position per source face (normalised centroid)
    pub positions: Vec<Vec3>,
    /// One cycle of face indices per source vertex (3 or 4 entries)
    pub tiles: Vec<Vec<usize>>,
    /// Undirected face adjacencies as `(a, b)` with `a < b`
    pub connections: Vec<(usize, usize)>,
}

/// One occurrence of a vertex inside a face cycle
#[derive(Debug, Clone, Copy)]
struct Corner {
    face: usize,
    prev: usize,
    next: usize,
}

/// Compute the dual of a closed mesh
///
/// Triangles are numbered before quads, so slot `i` is triangle `i` when
/// `i < triangles.len()` and quad `i - triangles.len()` otherwise.
///
/// # Errors
///
/// Returns `Topology` if some vertex does not have exactly 3 or 4 incident
/// faces, or its faces cannot be ordered into a single cycle.
pub fn extract_dual(mesh: &PolyMesh) -> Result<DualMesh> {
    let corners = collect_corners(mesh);

    let mut tiles = Vec::with_capacity(mesh.vertices.len());
    for (vertex, around) in corners.iter().enumerate() {
        let tile = match around.len() {
            3 => order_triangle(vertex, around)?,
            4 => walk_cycle(vertex, around)?,
            n => {
                return Err(SphereGoError::Topology(format!(
                    "vertex {} has {} incident faces, expected 3 or 4",
                    vertex, n
                )))
            }
        };
        tiles.push(tile);
    }

    let positions = face_centroids(mesh);

    let mut connections = BTreeSet::new();
    for tile in &tiles {
        for k in 0..tile.len() {
            let (a, b) = (tile[k], tile[(k + 1) % tile.len()]);
            connections.insert((a.min(b), a.max(b)));
        }
    }

    tracing::debug!(
        slots = positions.len(),
        tiles = tiles.len(),
        connections = connections.len(),
        "extracted dual graph"
    );

    Ok(DualMesh {
        positions,
        tiles,
        connections: connections.into_iter().collect(),
    })
}

/// Gather, for every vertex, each face it appears in with its cycle neighbours
fn collect_corners(mesh: &PolyMesh) -> Vec<Vec<Corner>> {
    let mut corners: Vec<Vec<Corner>> = vec![Vec::new(); mesh.vertices.len()];

    let faces = mesh
        .triangles
        .iter()
        .map(|t| t.as_slice())
        .chain(mesh.quads.iter().map(|q| q.as_slice()));

    for (face, cycle) in faces.enumerate() {
        let n = cycle.len();
        for k in 0..n {
            corners[cycle[k]].push(Corner {
                face,
                prev: cycle[(k + n - 1) % n],
                next: cycle[(k + 1) % n],
            });
        }
    }

    corners
}

/// Wind three faces around a vertex so consecutive faces share an edge
fn order_triangle(vertex: usize, c: &[Corner]) -> Result<Vec<usize>> {
    if c[0].prev == c[1].next && c[1].prev == c[2].next && c[2].prev == c[0].next {
        Ok(vec![c[0].face, c[1].face, c[2].face])
    } else if c[0].prev == c[2].next && c[1].prev == c[0].next && c[2].prev == c[1].next {
        Ok(vec![c[0].face, c[2].face, c[1].face])
    } else {
        Err(SphereGoError::Topology(format!(
            "faces around vertex {} do not form a consistent triangle fan",
            vertex
        )))
    }
}

/// Walk the faces around a vertex in adjacency order
///
/// From the current face, the successor is the face whose next point is the
/// current face's previous point. The walk visits each face at most once.
fn walk_cycle(vertex: usize, c: &[Corner]) -> Result<Vec<usize>> {
    let mut order = Vec::with_capacity(c.len());
    let mut current = 0;

    for _ in 0..c.len() {
        let here = c[current];
        order.push(here.face);
        let from = current;
        current = (0..c.len())
            .find(|&j| j != from && c[j].next == here.prev)
            .ok_or_else(|| {
                SphereGoError::Topology(format!(
                    "face walk around vertex {} found no successor for face {}",
                    vertex, here.face
                ))
            })?;
        if current == 0 {
            break;
        }
    }

    if current != 0 || order.len() != c.len() {
        return Err(SphereGoError::Topology(format!(
            "face walk around vertex {} did not close after {} faces",
            vertex,
            c.len()
        )));
    }

    Ok(order)
}

/// Normalised centroid of each face, triangles first
fn face_centroids(mesh: &PolyMesh) -> Vec<Vec3> {
    let centroid = |cycle: &[usize]| -> Vec3 {
        let sum: Vec3 = cycle.iter().map(|&v| mesh.vertices[v]).sum();
        (sum / cycle.len() as f32).normalize()
    };

    mesh.triangles
        .iter()
        .map(|t| centroid(t.as_slice()))
        .chain(mesh.quads.iter().map(|q| centroid(q.as_slice())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::polyhedron::base_polyhedron;
    use crate::generation::subdivide::subdivide;

    fn tetrahedron() -> PolyMesh {
        PolyMesh {
            vertices: vec![
                Vec3::new(1.0, 1.0, 1.0).normalize(),
                Vec3::new(1.0, -1.0, -1.0).normalize(),
                Vec3::new(-1.0, 1.0, -1.0).normalize(),
                Vec3::new(-1.0, -1.0, 1.0).normalize(),
            ],
            edges: Vec::new(),
            triangles: vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
            quads: Vec::new(),
        }
    }

    fn degrees(dual: &DualMesh) -> Vec<usize> {
        let mut degree = vec![0; dual.positions.len()];
        for &(a, b) in &dual.connections {
            degree[a] += 1;
            degree[b] += 1;
        }
        degree
    }

    #[test]
    fn test_cube_dual_is_octahedron() {
        let dual = extract_dual(&base_polyhedron()).unwrap();

        assert_eq!(dual.positions.len(), 6);
        assert_eq!(dual.tiles.len(), 8);
        assert!(dual.tiles.iter().all(|t| t.len() == 3));
        assert_eq!(dual.connections.len(), 12);
        assert!(degrees(&dual).iter().all(|&d| d == 4));
    }

    #[test]
    fn test_tetrahedron_dual_has_degree_three() {
        let dual = extract_dual(&tetrahedron()).unwrap();

        assert_eq!(dual.positions.len(), 4);
        assert_eq!(dual.connections.len(), 6);
        assert!(degrees(&dual).iter().all(|&d| d == 3));
    }

    #[test]
    fn test_subdivided_tiles_mix_triangles_and_quads() {
        let mesh = subdivide(&base_polyhedron(), 3).unwrap();
        let dual = extract_dual(&mesh).unwrap();

        let triangles = dual.tiles.iter().filter(|t| t.len() == 3).count();
        let quads = dual.tiles.iter().filter(|t| t.len() == 4).count();

        // Only the 8 cube corners are shared by three faces
        assert_eq!(triangles, 8);
        assert_eq!(quads, mesh.vertices.len() - 8);
        assert_eq!(dual.positions.len(), mesh.face_count());
    }

    #[test]
    fn test_consecutive_tile_faces_share_an_edge() {
        let mesh = subdivide(&base_polyhedron(), 2).unwrap();
        let dual = extract_dual(&mesh).unwrap();

        let shares_edge = |a: usize, b: usize| {
            let (qa, qb) = (mesh.quads[a], mesh.quads[b]);
            qa.iter().filter(|v| qb.contains(v)).count() == 2
        };

        for tile in &dual.tiles {
            for k in 0..tile.len() {
                assert!(shares_edge(tile[k], tile[(k + 1) % tile.len()]));
            }
        }
    }

    #[test]
    fn test_connections_are_ordered_and_unique() {
        let dual = extract_dual(&subdivide(&base_polyhedron(), 4).unwrap()).unwrap();
        let unique: BTreeSet<_> = dual.connections.iter().copied().collect();

        assert_eq!(unique.len(), dual.connections.len());
        assert!(dual.connections.iter().all(|&(a, b)| a < b));
    }

    #[test]
    fn test_dual_positions_on_sphere() {
        let dual = extract_dual(&subdivide(&base_polyhedron(), 3).unwrap()).unwrap();
        for p in &dual.positions {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_open_mesh_is_topology_error() {
        let mut mesh = base_polyhedron();
        mesh.quads.pop();
        assert!(matches!(extract_dual(&mesh), Err(SphereGoError::Topology(_))));
    }

    #[test]
    fn test_inconsistent_winding_is_topology_error() {
        let mut mesh = subdivide(&base_polyhedron(), 1).unwrap();
        mesh.quads[0].reverse();
        assert!(matches!(extract_dual(&mesh), Err(SphereGoError::Topology(_))));
    }
}
