//! Board Configuration and Builder
//!
//! This module provides configuration types for deterministic board generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SphereGoError};

/// Smallest subdivision level the generator is validated for
pub const MIN_COMPLEXITY: usize = 3;

/// Largest subdivision level the generator is validated for
pub const MAX_COMPLEXITY: usize = 7;

/// Board size presets
///
/// Each size maps to a subdivision complexity. A board of complexity `c`
/// has `6 * (c + 1)^2` slots.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardSize {
    /// Complexity 3: 96 slots
    Small,
    /// Complexity 5: 216 slots (default)
    #[default]
    Medium,
    /// Complexity 7: 384 slots
    Large,
    /// Explicit subdivision complexity
    Custom {
        /// Points inserted along each base edge
        complexity: usize,
    },
}

impl BoardSize {
    /// Get the subdivision complexity for this size
    pub fn complexity(self) -> usize {
        match self {
            BoardSize::Small => 3,
            BoardSize::Medium => 5,
            BoardSize::Large => 7,
            BoardSize::Custom { complexity } => complexity,
        }
    }

    /// Get a human-readable name for this board size
    pub fn name(self) -> &'static str {
        match self {
            BoardSize::Small => "Small",
            BoardSize::Medium => "Medium",
            BoardSize::Large => "Large",
            BoardSize::Custom { .. } => "Custom",
        }
    }
}

/// Check that a complexity lies in the supported range
pub fn validate_complexity(complexity: usize) -> Result<()> {
    if !(MIN_COMPLEXITY..=MAX_COMPLEXITY).contains(&complexity) {
        return Err(SphereGoError::InvalidConfiguration(format!(
            "complexity must be in [{}, {}] (got {})",
            MIN_COMPLEXITY, MAX_COMPLEXITY, complexity
        )));
    }
    Ok(())
}

/// Configuration for board generation
///
/// The board is a pure function of its configuration, so saving the
/// configuration is enough to rebuild an identical board.
///
/// # Example
///
/// ```rust
/// use sphere_go::*;
///
/// let config = BoardConfigBuilder::new()
///     .board_size(BoardSize::Small)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.complexity(), 3);
/// assert_eq!(config.slot_count(), 96);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardConfig {
    /// Board size preset (determines subdivision complexity)
    pub board_size: BoardSize,
}

impl BoardConfig {
    /// Get the subdivision complexity for this configuration
    #[inline]
    pub fn complexity(&self) -> usize {
        self.board_size.complexity()
    }

    /// Number of slots a board built from this configuration will have
    #[inline]
    pub fn slot_count(&self) -> usize {
        let side = self.complexity() + 1;
        6 * side * side
    }

    /// Re-check the configuration
    ///
    /// Fields are public, so a config may have been built without the builder.
    pub fn validate(&self) -> Result<()> {
        validate_complexity(self.complexity())
    }
}

/// Builder for creating BoardConfig with validation
#[derive(Debug, Clone, Default)]
pub struct BoardConfigBuilder {
    board_size: BoardSize,
}

impl BoardConfigBuilder {
    /// Create a new builder (defaults to `BoardSize::Medium`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board size preset
    pub fn board_size(mut self, size: BoardSize) -> Self {
        self.board_size = size;
        self
    }

    /// Set an explicit subdivision complexity
    ///
    /// # Arguments
    ///
    /// * `complexity` - Points inserted along each base edge, in `[3, 7]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if complexity is outside `[3, 7]`
    pub fn complexity(mut self, complexity: usize) -> Result<Self> {
        validate_complexity(complexity)?;
        self.board_size = BoardSize::Custom { complexity };
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<BoardConfig> {
        let config = BoardConfig {
            board_size: self.board_size,
        };
        config.validate()?;
        Ok(config)
    }
}
