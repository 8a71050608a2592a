//! Error types for cloth construction and configuration.

use core::fmt;

/// Errors reported when building a cloth, configuring a simulation or
/// reading its output.
///
/// Numerical degeneracies inside a step (coincident particles, degenerate
/// faces) are skipped locally and never surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// Grid must have at least one segment in each direction.
    InvalidGridDimensions { width: usize, height: usize },
    /// Physical cloth length must be positive and finite.
    InvalidLength,
    /// Drag must be in (0, 1].
    InvalidDrag,
    /// Friction must be in [0, 1].
    InvalidFriction,
    /// Timestep must be positive and finite.
    InvalidTimestep,
    /// At least one solver iteration is required.
    InvalidIterations,
    /// Box minimum corner must not exceed the maximum corner on any axis.
    InvalidBounds,
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// Pinned grid column is past the last column.
    ColumnOutOfBounds { column: usize, width: usize },
    /// Pinned grid row is past the last row.
    RowOutOfBounds { row: usize, height: usize },
    /// Output buffer cannot hold every particle position.
    BufferTooSmall { needed: usize, len: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidMass => write!(f, "mass must be positive and finite"),
            ClothError::InvalidGridDimensions { width, height } => {
                write!(f, "grid must have at least 1x1 segments (got {}x{})", width, height)
            }
            ClothError::InvalidLength => write!(f, "cloth length must be positive and finite"),
            ClothError::InvalidDrag => write!(f, "drag must be in (0, 1]"),
            ClothError::InvalidFriction => write!(f, "friction must be in [0, 1]"),
            ClothError::InvalidTimestep => write!(f, "timestep must be positive and finite"),
            ClothError::InvalidIterations => write!(f, "solver needs at least one iteration"),
            ClothError::InvalidBounds => write!(f, "box min corner exceeds max corner"),
            ClothError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            ClothError::ColumnOutOfBounds { column, width } => {
                write!(f, "column {} out of bounds (last column: {})", column, width)
            }
            ClothError::RowOutOfBounds { row, height } => {
                write!(f, "row {} out of bounds (last row: {})", row, height)
            }
            ClothError::BufferTooSmall { needed, len } => {
                write!(f, "position buffer too small: need {} floats, got {}", needed, len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClothError {}
