//! Spherical edge and face subdivision
//!
//! Every base edge receives `complexity` points spaced at equal angles along
//! its great circle, then every base quad is filled with a
//! `(complexity + 1) x (complexity + 1)` grid of quads whose interior points
//! are again spaced along great circles between opposite boundary points.

use glam::{Quat, Vec3};

use crate::error::{Result, SphereGoError};

use super::polyhedron::PolyMesh;

/// Points strictly between `from` and `to` at equal angular steps
///
/// Both inputs must be unit vectors that are not antipodal. The arc is
/// split into `count + 1` equal steps and the `count` inner points returned
/// in order from `from` towards `to`.
pub fn great_circle_points(from: Vec3, to: Vec3, count: usize) -> Vec<Vec3> {
    let arc = Quat::from_rotation_arc(from, to);
    let steps = (count + 1) as f32;

    (1..=count)
        .map(|step| (Quat::IDENTITY.slerp(arc, step as f32 / steps) * from).normalize())
        .collect()
}

/// Subdivide a quad-faced mesh on the unit sphere
///
/// Edge points land at `base_vertex_count + edge_index * complexity + step`,
/// followed by the interior points of each face in face order. The output
/// carries no edge list; edges only drive this step.
///
/// `complexity = 0` returns the base faces unchanged, triangles included.
///
/// # Errors
///
/// Returns `Topology` if a face side has no matching edge, or if the base
/// contains triangles and `complexity > 0`.
pub fn subdivide(base: &PolyMesh, complexity: usize) -> Result<PolyMesh> {
    if complexity > 0 && !base.triangles.is_empty() {
        return Err(SphereGoError::Topology(format!(
            "cannot subdivide {} triangle faces, only quads are supported",
            base.triangles.len()
        )));
    }

    let mut vertices = base.vertices.clone();
    vertices.reserve(base.edges.len() * complexity + base.quads.len() * complexity * complexity);

    for &[v1, v2] in &base.edges {
        let points = great_circle_points(base.vertices[v1], base.vertices[v2], complexity);
        vertices.extend(points);
    }

    let runs = EdgeRuns {
        edges: &base.edges,
        first_point: base.vertices.len(),
        complexity,
    };

    let mut quads = Vec::with_capacity(base.quads.len() * (complexity + 1) * (complexity + 1));
    for &[v1, v2, v3, v4] in &base.quads {
        let left = runs.between(v1, v4)?;
        let right = runs.between(v2, v3)?;

        let mut top = Vec::with_capacity(complexity + 2);
        top.push(v1);
        top.extend(runs.between(v1, v2)?);
        top.push(v2);

        for row in 0..=complexity {
            let next = if row < complexity {
                let (start, end) = (left[row], right[row]);
                let first_new = vertices.len();
                let points = great_circle_points(vertices[start], vertices[end], complexity);
                vertices.extend(points);

                let mut next = Vec::with_capacity(complexity + 2);
                next.push(start);
                next.extend(first_new..first_new + complexity);
                next.push(end);
                next
            } else {
                let mut bottom = Vec::with_capacity(complexity + 2);
                bottom.push(v4);
                bottom.extend(runs.between(v4, v3)?);
                bottom.push(v3);
                bottom
            };

            for k in 0..=complexity {
                quads.push([top[k], top[k + 1], next[k + 1], next[k]]);
            }
            top = next;
        }
    }

    tracing::debug!(
        complexity,
        vertices = vertices.len(),
        quads = quads.len(),
        "subdivided base mesh"
    );

    Ok(PolyMesh {
        vertices,
        edges: Vec::new(),
        triangles: base.triangles.clone(),
        quads,
    })
}

/// Lookup of the subdivision points inserted along each base edge
struct EdgeRuns<'a> {
    edges: &'a [[usize; 2]],
    first_point: usize,
    complexity: usize,
}

impl EdgeRuns<'_> {
    /// Inner points of edge `a-b`, ordered from `a` to `b`
    fn between(&self, a: usize, b: usize) -> Result<Vec<usize>> {
        let (edge_index, forward) = self
            .edges
            .iter()
            .enumerate()
            .find_map(|(i, &[e1, e2])| {
                if (e1, e2) == (a, b) {
                    Some((i, true))
                } else if (e1, e2) == (b, a) {
                    Some((i, false))
                } else {
                    None
                }
            })
            .ok_or_else(|| {
                SphereGoError::Topology(format!("face side {}-{} is not a listed edge", a, b))
            })?;

        let start = self.first_point + edge_index * self.complexity;
        let mut run: Vec<usize> = (start..start + self.complexity).collect();
        if !forward {
            run.reverse();
        }
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::polyhedron::base_polyhedron;

    #[test]
    fn test_great_circle_points_equal_angles() {
        let from = Vec3::X;
        let to = Vec3::Y;
        let points = great_circle_points(from, to, 2);

        assert_eq!(points.len(), 2);
        let step = std::f32::consts::FRAC_PI_2 / 3.0;
        assert!((from.angle_between(points[0]) - step).abs() < 1e-5);
        assert!((points[0].angle_between(points[1]) - step).abs() < 1e-5);
        assert!((points[1].angle_between(to) - step).abs() < 1e-5);
        for p in &points {
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert!(p.z.abs() < 1e-5, "point left the great circle: {:?}", p);
        }
    }

    #[test]
    fn test_great_circle_points_zero_count() {
        assert!(great_circle_points(Vec3::X, Vec3::Y, 0).is_empty());
    }

    #[test]
    fn test_subdivide_counts() {
        let base = base_polyhedron();
        for complexity in 0..=7 {
            let mesh = subdivide(&base, complexity).unwrap();
            let side = complexity + 1;
            assert_eq!(mesh.quads.len(), 6 * side * side);
            // V - E + F = 2 for a quad mesh: V = F + 2
            assert_eq!(mesh.vertices.len(), mesh.quads.len() + 2);
            assert!(mesh.triangles.is_empty());
        }
    }

    #[test]
    fn test_subdivide_zero_is_base() {
        let base = base_polyhedron();
        let mesh = subdivide(&base, 0).unwrap();
        assert_eq!(mesh.vertices, base.vertices);
        assert_eq!(mesh.quads, base.quads);
    }

    #[test]
    fn test_subdivide_zero_keeps_triangles() {
        let tetrahedron = PolyMesh {
            vertices: vec![
                Vec3::new(1.0, 1.0, 1.0).normalize(),
                Vec3::new(1.0, -1.0, -1.0).normalize(),
                Vec3::new(-1.0, 1.0, -1.0).normalize(),
                Vec3::new(-1.0, -1.0, 1.0).normalize(),
            ],
            edges: Vec::new(),
            triangles: vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
            quads: Vec::new(),
        };

        let mesh = subdivide(&tetrahedron, 0).unwrap();
        assert_eq!(mesh.triangles, tetrahedron.triangles);
        assert_eq!(mesh.vertices, tetrahedron.vertices);

        let dual = crate::generation::dual::extract_dual(&mesh).unwrap();
        assert_eq!(dual.positions.len(), 4);
        assert_eq!(dual.connections.len(), 6);

        assert!(matches!(subdivide(&tetrahedron, 1), Err(SphereGoError::Topology(_))));
    }

    #[test]
    fn test_edge_point_addressing() {
        let base = base_polyhedron();
        let complexity = 3;
        let mesh = subdivide(&base, complexity).unwrap();

        // Edge 7 is 3-7; its second point sits at 8 + 7*3 + 1
        let expected = great_circle_points(base.vertices[3], base.vertices[7], complexity)[1];
        assert!((mesh.vertices[8 + 7 * complexity + 1] - expected).length() < 1e-6);
    }

    #[test]
    fn test_subdivided_vertices_on_sphere() {
        let mesh = subdivide(&base_polyhedron(), 5).unwrap();
        for v in &mesh.vertices {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_subdivided_quads_share_each_edge_in_both_directions() {
        use std::collections::HashSet;

        let mesh = subdivide(&base_polyhedron(), 4).unwrap();
        let mut directed = HashSet::new();
        for quad in &mesh.quads {
            for k in 0..4 {
                assert!(directed.insert((quad[k], quad[(k + 1) % 4])), "duplicate directed edge");
            }
        }
        for &(a, b) in &directed {
            assert!(directed.contains(&(b, a)), "edge {}-{} has no twin", a, b);
        }
    }

    #[test]
    fn test_missing_edge_is_topology_error() {
        let mut base = base_polyhedron();
        base.edges.pop();
        assert!(matches!(subdivide(&base, 2), Err(SphereGoError::Topology(_))));
    }
}
