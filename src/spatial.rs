//! Spatial indexing for position-to-slot lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::Vec3;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// KD-tree over slot positions
///
/// Lets an input collaborator turn a point on the sphere (a pointer hit,
/// say) into the nearest slot in O(log n).
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 3, 32>,
}

impl SpatialIndex {
    /// Build the index from slot positions
    ///
    /// Creates an immutable KD-tree over the positions. Board construction
    /// calls this once; the tree is never updated afterwards.
    ///
    /// # Arguments
    ///
    /// * `positions` - Slot positions, indexed by slot ID
    ///
    /// # Example
    ///
    /// ```
    /// use sphere_go::SpatialIndex;
    /// use glam::Vec3;
    ///
    /// let index = SpatialIndex::new(&[Vec3::X, Vec3::Y, Vec3::Z]);
    /// assert_eq!(index.find_nearest(Vec3::new(1.0, 0.1, 0.0)), 0);
    /// ```
    pub fn new(positions: &[Vec3]) -> Self {
        let points: Vec<[f32; 3]> = positions.iter().map(|p| [p.x, p.y, p.z]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the position nearest to `position`
    ///
    /// # Arguments
    ///
    /// * `position` - Point to resolve, usually on or near the unit sphere
    ///
    /// # Returns
    ///
    /// Slot ID of the nearest indexed position
    ///
    /// # Performance
    ///
    /// O(log n) lookup.
    pub fn find_nearest(&self, position: Vec3) -> usize {
        let query = [position.x, position.y, position.z];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex").finish_non_exhaustive()
    }
}
