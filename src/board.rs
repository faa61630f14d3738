//! BoardGraph main structure

use glam::Vec3;
use std::collections::{BTreeSet, HashSet};

use crate::config::{validate_complexity, BoardConfig};
use crate::error::{Result, SphereGoError};
use crate::generation::generate_dual;
use crate::slot::Slot;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Generate a board for a subdivision complexity in `[3, 7]`
///
/// # Errors
///
/// Returns `InvalidConfiguration` outside the supported range.
pub fn generate(complexity: usize) -> Result<BoardGraph> {
    validate_complexity(complexity)?;
    BoardGraph::with_complexity(complexity)
}

/// The immutable board: slots on the sphere and the connections between them
///
/// Shared read-only by the rules engine and any renderer. Slots are
/// addressed by index and never added or removed.
///
/// # Examples
///
/// ```
/// use sphere_go::*;
///
/// let config = BoardConfigBuilder::new()
///     .board_size(BoardSize::Small)
///     .build()
///     .unwrap();
///
/// let board = BoardGraph::generate(config).unwrap();
/// assert_eq!(board.slot_count(), 96);
/// assert!(board.is_connected());
/// ```
#[derive(Debug, Clone)]
pub struct BoardGraph {
    /// Subdivision complexity, `None` for hand-built graphs
    complexity: Option<usize>,

    /// All slots (indexed by slot ID)
    slots: Vec<Slot>,

    /// Undirected connections as `(a, b)` with `a < b`, ascending
    connections: Vec<(usize, usize)>,

    /// Tile polygons for rendering: slot cycles around each mesh vertex
    tiles: Vec<Vec<usize>>,

    /// Spatial index for position-to-slot lookups (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl BoardGraph {
    /// Generate the board described by a configuration
    ///
    /// Builds the base cube, subdivides it at the configured complexity,
    /// takes the dual and indexes the slot positions. The result depends
    /// only on the complexity.
    ///
    /// # Arguments
    ///
    /// * `config` - Board configuration (size preset or custom complexity)
    ///
    /// # Returns
    ///
    /// `Result<BoardGraph>` - Board with `6 * (complexity + 1)^2` slots, or error
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the configuration fails validation.
    ///
    /// # Example
    ///
    /// ```
    /// use sphere_go::*;
    ///
    /// let config = BoardConfigBuilder::new()
    ///     .complexity(4)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let board = BoardGraph::generate(config).unwrap();
    /// assert_eq!(board.slot_count(), 150);
    /// ```
    pub fn generate(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Self::with_complexity(config.complexity())
    }

    /// Generate a board for any complexity, skipping range validation
    ///
    /// Complexity 0 gives the six-slot octahedral board.
    ///
    /// # Errors
    ///
    /// Returns `Topology` if the generated graph has a slot whose degree is
    /// not 3 or 4.
    pub fn with_complexity(complexity: usize) -> Result<Self> {
        let dual = generate_dual(complexity)?;

        let mut board = Self::assemble(dual.positions, dual.connections, dual.tiles);
        board.complexity = Some(complexity);

        if let Some(slot) = board.slots.iter().find(|s| !(3..=4).contains(&s.neighbor_count())) {
            return Err(SphereGoError::Topology(format!(
                "slot {} has degree {}, expected 3 or 4",
                slot.id,
                slot.neighbor_count()
            )));
        }

        tracing::debug!(
            complexity,
            slots = board.slot_count(),
            connections = board.connections.len(),
            "generated board"
        );
        Ok(board)
    }

    /// Build a board from an arbitrary graph
    ///
    /// Connections may be given in either orientation and may repeat; they
    /// are normalised to `(min, max)` and deduplicated. The result has no
    /// tiles.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an out-of-range endpoint or a
    /// connection from a slot to itself.
    ///
    /// # Example
    ///
    /// ```
    /// use sphere_go::*;
    /// use glam::Vec3;
    ///
    /// // A ring of four slots: 0-1-2-3-0
    /// let board = BoardGraph::from_connections(
    ///     vec![Vec3::X, Vec3::Y, Vec3::NEG_X, Vec3::NEG_Y],
    ///     &[(0, 1), (1, 2), (2, 3), (3, 0)],
    /// ).unwrap();
    /// assert_eq!(board.neighbors(0), &[1, 3]);
    /// ```
    pub fn from_connections(positions: Vec<Vec3>, connections: &[(usize, usize)]) -> Result<Self> {
        let n = positions.len();
        let mut normalized = BTreeSet::new();

        for &(a, b) in connections {
            if a >= n || b >= n {
                return Err(SphereGoError::InvalidConfiguration(format!(
                    "connection {}-{} references a slot outside 0..{}",
                    a, b, n
                )));
            }
            if a == b {
                return Err(SphereGoError::InvalidConfiguration(format!(
                    "slot {} is connected to itself",
                    a
                )));
            }
            normalized.insert((a.min(b), a.max(b)));
        }

        Ok(Self::assemble(positions, normalized.into_iter().collect(), Vec::new()))
    }

    fn assemble(positions: Vec<Vec3>, connections: Vec<(usize, usize)>, tiles: Vec<Vec<usize>>) -> Self {
        let mut neighbors = vec![Vec::new(); positions.len()];
        for &(a, b) in &connections {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }

        // Build spatial index (requires spatial-index feature)
        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&positions);

        let slots = positions
            .into_iter()
            .zip(neighbors)
            .enumerate()
            .map(|(id, (position, mut adjacent))| {
                adjacent.sort_unstable();
                Slot::new(id, position, adjacent)
            })
            .collect();

        Self {
            complexity: None,
            slots,
            connections,
            tiles,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// Subdivision complexity this board was generated from
    #[inline]
    pub fn complexity(&self) -> Option<usize> {
        self.complexity
    }

    /// Get the number of slots on this board
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Get a slot by ID
    ///
    /// Returns `None` if the slot ID is out of bounds.
    #[inline]
    pub fn get_slot(&self, id: usize) -> Option<&Slot> {
        self.slots.get(id)
    }

    /// Get all slots as a slice
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// All connections, each unordered pair once as `(a, b)` with `a < b`
    #[inline]
    pub fn connections(&self) -> &[(usize, usize)] {
        &self.connections
    }

    /// Tile polygons for rendering, each a cycle of 3 or 4 slot IDs
    #[inline]
    pub fn tiles(&self) -> &[Vec<usize>] {
        &self.tiles
    }

    /// Get neighbor IDs for a slot
    ///
    /// # Arguments
    ///
    /// * `slot_id` - Slot ID to query
    ///
    /// # Returns
    ///
    /// Neighbor IDs in ascending order, or an empty slice if the ID is invalid
    pub fn neighbors(&self, slot_id: usize) -> &[usize] {
        self.slots
            .get(slot_id)
            .map(|s| s.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Find the slot nearest to a position (requires spatial-index feature)
    ///
    /// # Example
    ///
    /// ```
    /// # use sphere_go::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let board = generate(3).unwrap();
    /// let slot = board.get_slot(10).unwrap();
    /// assert_eq!(board.find_slot_at(slot.position * 1.05), 10);
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_slot_at(&self, position: Vec3) -> usize {
        self.spatial_index.find_nearest(position)
    }

    /// Find slots within a given hop count from a center slot (BFS)
    ///
    /// Includes the center slot. Returns empty vec if center_id is invalid.
    pub fn slots_within_hops(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.slots.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![center_id];
        visited.insert(center_id);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &slot_id in &current {
                for &neighbor in self.neighbors(slot_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            current = next;
        }

        let mut found: Vec<usize> = visited.into_iter().collect();
        found.sort_unstable();
        found
    }

    /// Whether every slot can be reached from every other slot
    pub fn is_connected(&self) -> bool {
        self.slots.is_empty() || self.slots_within_hops(0, self.slots.len()).len() == self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardConfigBuilder, BoardSize, MAX_COMPLEXITY, MIN_COMPLEXITY};

    fn ring(n: usize) -> BoardGraph {
        let positions = (0..n)
            .map(|i| {
                let a = i as f32 * std::f32::consts::TAU / n as f32;
                Vec3::new(a.cos(), a.sin(), 0.0)
            })
            .collect();
        let connections: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        BoardGraph::from_connections(positions, &connections).unwrap()
    }

    #[test]
    fn test_generated_board_invariants() {
        for complexity in MIN_COMPLEXITY..=MAX_COMPLEXITY {
            let board = generate(complexity).unwrap();
            let side = complexity + 1;

            assert_eq!(board.slot_count(), 6 * side * side);
            assert_eq!(board.complexity(), Some(complexity));
            assert!(board.is_connected(), "complexity {} not connected", complexity);
            for slot in board.slots() {
                assert!((3..=4).contains(&slot.neighbor_count()));
            }
        }
    }

    #[test]
    fn test_generate_rejects_unsupported_complexity() {
        assert!(matches!(generate(2), Err(SphereGoError::InvalidConfiguration(_))));
        assert!(matches!(generate(8), Err(SphereGoError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_generate_from_config() {
        let config = BoardConfigBuilder::new().board_size(BoardSize::Small).build().unwrap();
        let board = BoardGraph::generate(config).unwrap();
        assert_eq!(board.slot_count(), config.slot_count());
    }

    #[test]
    fn test_complexity_zero_is_octahedron() {
        let board = BoardGraph::with_complexity(0).unwrap();

        assert_eq!(board.slot_count(), 6);
        assert_eq!(board.connections().len(), 12);
        assert!(board.is_connected());
        assert!(board.slots().iter().all(|s| s.neighbor_count() == 4));
    }

    #[test]
    fn test_neighbor_symmetry() {
        let board = generate(4).unwrap();
        for slot in board.slots() {
            for &n in &slot.neighbors {
                assert!(board.get_slot(n).unwrap().is_neighbor_of(slot.id));
            }
        }
    }

    #[test]
    fn test_tiles_reference_valid_slots() {
        let board = generate(3).unwrap();
        assert!(!board.tiles().is_empty());
        for tile in board.tiles() {
            assert!(tile.len() == 3 || tile.len() == 4);
            for k in 0..tile.len() {
                let (a, b) = (tile[k], tile[(k + 1) % tile.len()]);
                assert!(board.get_slot(a).unwrap().is_neighbor_of(b));
            }
        }
    }

    #[test]
    fn test_from_connections_normalizes() {
        let board = BoardGraph::from_connections(
            vec![Vec3::X, Vec3::Y, Vec3::Z],
            &[(1, 0), (0, 1), (2, 1)],
        )
        .unwrap();

        assert_eq!(board.connections(), &[(0, 1), (1, 2)]);
        assert_eq!(board.neighbors(1), &[0, 2]);
        assert_eq!(board.complexity(), None);
    }

    #[test]
    fn test_from_connections_rejects_bad_edges() {
        let positions = vec![Vec3::X, Vec3::Y];
        assert!(BoardGraph::from_connections(positions.clone(), &[(0, 2)]).is_err());
        assert!(BoardGraph::from_connections(positions, &[(1, 1)]).is_err());
    }

    #[test]
    fn test_slots_within_hops() {
        let board = ring(8);

        assert_eq!(board.slots_within_hops(0, 0), vec![0]);
        assert_eq!(board.slots_within_hops(0, 1), vec![0, 1, 7]);
        assert_eq!(board.slots_within_hops(0, 2), vec![0, 1, 2, 6, 7]);
        assert!(board.slots_within_hops(99, 3).is_empty());
    }

    #[test]
    fn test_disconnected_graph() {
        let board = BoardGraph::from_connections(
            vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X],
            &[(0, 1), (2, 3)],
        )
        .unwrap();
        assert!(!board.is_connected());
    }

    #[test]
    fn test_invalid_slot_id() {
        let board = ring(4);
        assert!(board.get_slot(4).is_none());
        assert!(board.neighbors(4).is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_slot_at() {
        let board = generate(5).unwrap();
        for slot in board.slots() {
            assert_eq!(board.find_slot_at(slot.position), slot.id);
        }
    }
}
