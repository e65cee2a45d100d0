//! Error type shared by every stage of the maze pipeline.

#![expect(
    clippy::module_name_repetitions,
    reason = "The error type is imported unqualified across the crate."
)]

use thiserror::Error;

/// Failures raised by the maze pipeline.
///
/// Configuration problems are detected before any generation begins, and cell validation happens
/// before a search is started. A search that finds no route is not an error; it is reported
/// through an empty path in the exploration trace instead.
#[derive(Debug, Error)]
pub enum MazeError {
    /// Rectangular dimensions that cannot hold a carved maze.
    ///
    /// Both dimensions must be odd so that rooms sit on odd coordinates and walls on the even
    /// midpoints between them, and both must be at least 3 to hold a single room.
    #[error("invalid rectangular dimensions {width}x{height}: both must be odd and at least 3")]
    InvalidDimensions {
        /// Requested width in grid units.
        width: usize,
        /// Requested height in grid units.
        height: usize,
    },
    /// A radial layout with no rings.
    #[error("a radial maze needs at least one ring")]
    NoRings,
    /// A radial layout whose sector counts are zero or shrink outwards.
    #[error("invalid sector count {sectors} for ring {ring}: {reason}")]
    InvalidSectors {
        /// Ring index at which the layout became invalid.
        ring: usize,
        /// Offending sector count.
        sectors: usize,
        /// Human readable explanation.
        reason: &'static str,
    },
    /// A start or end cell that does not belong to the topology.
    #[error("cell {cell} is outside the maze")]
    CellOutOfBounds {
        /// Debug representation of the rejected cell.
        cell: String,
    },
    /// A frame index that does not fit the arithmetic used by the schedule.
    #[error("frame count {frames} is too large to schedule")]
    FrameOverflow {
        /// Frame count that overflowed.
        frames: usize,
    },
    /// The render bundle could not be serialized.
    #[error("failed to serialize the render bundle")]
    Serialization(#[from] serde_json::Error),
}
