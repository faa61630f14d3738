//! Go on a sphere
//!
//! Generates an irregular spherical board by subdividing a cube on the unit
//! sphere and taking the dual of the result, then plays a Go-like capture
//! game on the board graph. Rendering and input are left to the embedding
//! engine, which consumes slot positions, connections and per-move diffs.
//!
//! # Quick Start
//!
//! ```rust
//! use sphere_go::*;
//!
//! let config = BoardConfigBuilder::new()
//!     .board_size(BoardSize::Small)
//!     .build()
//!     .unwrap();
//!
//! let mut game = GameController::new(config).unwrap();
//! println!("Board has {} slots", game.board().slot_count());
//!
//! let outcome = game.play(0).unwrap();
//! assert!(outcome.captured.is_empty());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-slot lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and saved games

// Modules
pub mod error;
pub mod config;
pub mod slot;
pub mod generation;
pub mod board;
pub mod rules;
pub mod game;
pub mod playout;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{MoveRejection, Result, SphereGoError};
pub use config::{BoardConfig, BoardConfigBuilder, BoardSize, MAX_COMPLEXITY, MIN_COMPLEXITY};
pub use slot::Slot;
pub use board::{generate, BoardGraph};
pub use rules::{GameState, MoveOutcome, PerPlayer, Player};
pub use game::{GameController, GameSnapshot};
pub use playout::{random_playout, MoveSelector, RandomSelector};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
