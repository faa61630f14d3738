//! Error types for board generation and play

use std::fmt;

/// Why a move was refused by the rules engine
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// Slot index is not on the board
    OutOfRange,
    /// A stone already sits on the slot
    Occupied,
    /// The stone would have no liberty and captures nothing
    Suicide,
    /// The move would immediately restore the previous position
    Ko,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::OutOfRange => write!(f, "slot out of range"),
            MoveRejection::Occupied => write!(f, "slot is occupied"),
            MoveRejection::Suicide => write!(f, "suicide"),
            MoveRejection::Ko => write!(f, "retakes ko"),
        }
    }
}

/// Errors that can occur during board generation or play
#[derive(Debug, Clone, PartialEq)]
pub enum SphereGoError {
    /// Configuration validation failed (e.g. unsupported complexity)
    InvalidConfiguration(String),
    /// The subdivided mesh violated a topological invariant
    Topology(String),
    /// The requested move is not in the valid-move set
    InvalidMove {
        /// Slot the caller tried to play
        slot: usize,
        /// Why it was refused
        reason: MoveRejection,
    },
}

impl fmt::Display for SphereGoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SphereGoError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {}", msg),
            SphereGoError::Topology(msg) => write!(f, "topology error: {}", msg),
            SphereGoError::InvalidMove { slot, reason } => {
                write!(f, "invalid move at slot {}: {}", slot, reason)
            }
        }
    }
}

impl std::error::Error for SphereGoError {}

/// Result type alias for board and game operations
pub type Result<T> = std::result::Result<T, SphereGoError>;
