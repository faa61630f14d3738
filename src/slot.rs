//! Board slot structure
//!
//! A slot is one node of the board graph: a point where a stone may be placed.

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single slot on the board surface
///
/// Slots are never serialized as part of a save; they are regenerated from
/// the board's complexity.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Index of this slot (0 to slot_count-1)
    pub id: usize,

    /// Position on the unit sphere
    ///
    /// Only the renderer cares about this; the rules work on `neighbors`.
    pub position: Vec3,

    /// IDs of adjacent slots, ascending
    pub neighbors: Vec<usize>,
}

impl Slot {
    /// Create a new slot
    pub fn new(id: usize, position: Vec3, neighbors: Vec<usize>) -> Self {
        Self {
            id,
            position,
            neighbors,
        }
    }

    /// Number of adjacent slots (3 or 4 on a generated board)
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this slot is adjacent to another slot
    #[inline]
    pub fn is_neighbor_of(&self, other_slot_id: usize) -> bool {
        self.neighbors.binary_search(&other_slot_id).is_ok()
    }

    /// Great circle distance between two slot centers on a sphere of `radius`
    ///
    /// # Arguments
    ///
    /// * `other` - Slot to measure to
    /// * `radius` - Sphere radius (1.0 for board coordinates)
    pub fn distance_to(&self, other: &Slot, radius: f32) -> f32 {
        let dot = self.position.dot(other.position);
        let cos_angle = dot / (self.position.length() * other.position.length());

        // Clamp to avoid numerical issues with acos
        radius * cos_angle.clamp(-1.0, 1.0).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_creation() {
        let slot = Slot::new(0, Vec3::X, vec![1, 2, 3]);

        assert_eq!(slot.id, 0);
        assert_eq!(slot.neighbor_count(), 3);
        assert!(slot.is_neighbor_of(2));
        assert!(!slot.is_neighbor_of(99));
    }

    #[test]
    fn test_distance_to() {
        let a = Slot::new(0, Vec3::X, vec![]);
        let b = Slot::new(1, Vec3::Y, vec![]);

        let distance = a.distance_to(&b, 10.0);
        let expected = 10.0 * std::f32::consts::FRAC_PI_2;
        assert!((distance - expected).abs() < 0.01);
    }
}
