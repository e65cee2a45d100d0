//! Rectangular grid topology.
//!
//! The grid follows the classic carve model: a `width` by `height` board where the cells with two
//! odd coordinates are rooms and every other cell is wall material. Only rooms are maze cells, and
//! two rooms two steps apart are separated by the single wall cell at their midpoint.

#![expect(
    clippy::module_name_repetitions,
    reason = "Both grid shapes are imported side by side, so names carry the shape."
)]

use serde::Serialize;

use super::Topology;
use crate::error::MazeError;

/// Offsets to the neighboring rooms, in north, east, south, west order.
const DIRECTIONS: [(isize, isize); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// A room of a rectangular grid, addressed by its board coordinates.
///
/// Rooms order lexicographically on `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GridCell {
    /// Column on the board, always odd.
    pub x: usize,
    /// Row on the board, always odd.
    pub y: usize,
}

impl GridCell {
    /// Creates a room at the given board coordinates.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// The wall cell at the midpoint between two neighboring rooms.
///
/// Exactly one of its coordinates is even.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GridWall {
    /// Column on the board.
    pub x: usize,
    /// Row on the board.
    pub y: usize,
}

/// A rectangular board of odd dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RectangularGrid {
    /// Board width, odd and at least 3.
    width: usize,
    /// Board height, odd and at least 3.
    height: usize,
}

impl RectangularGrid {
    /// Builds a board of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] when either dimension is even or smaller than 3.
    pub const fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width < 3 || height < 3 || width % 2 == 0 || height % 2 == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        Ok(Self { width, height })
    }

    /// Returns the board width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the board height.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the room in the bottom-right corner of the board, the conventional exit.
    #[must_use]
    pub const fn far_corner(&self) -> GridCell {
        GridCell::new(self.width - 2, self.height - 2)
    }
}

impl Topology for RectangularGrid {
    type Cell = GridCell;
    type Wall = GridWall;

    fn cell_count(&self) -> usize {
        (self.width / 2) * (self.height / 2)
    }

    fn cells(&self) -> Vec<GridCell> {
        (1..self.width)
            .step_by(2)
            .flat_map(|x| (1..self.height).step_by(2).map(move |y| GridCell::new(x, y)))
            .collect()
    }

    fn contains(&self, cell: GridCell) -> bool {
        cell.x % 2 == 1 && cell.y % 2 == 1 && cell.x < self.width && cell.y < self.height
    }

    fn origin(&self) -> GridCell {
        GridCell::new(1, 1)
    }

    fn neighbors(&self, cell: GridCell) -> Vec<(GridCell, GridWall)> {
        if !self.contains(cell) {
            return Vec::new();
        }

        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| {
                let x = cell.x.checked_add_signed(dx)?;
                let y = cell.y.checked_add_signed(dy)?;

                (x < self.width && y < self.height).then(|| {
                    let wall = GridWall {
                        x: (cell.x + x) / 2,
                        y: (cell.y + y) / 2,
                    };
                    (GridCell::new(x, y), wall)
                })
            })
            .collect()
    }

    fn walls(&self) -> Vec<GridWall> {
        let mut walls = Vec::new();
        for cell in self.cells() {
            if cell.x + 2 < self.width {
                walls.push(GridWall {
                    x: cell.x + 1,
                    y: cell.y,
                });
            }
            if cell.y + 2 < self.height {
                walls.push(GridWall {
                    x: cell.x,
                    y: cell.y + 1,
                });
            }
        }
        walls.sort_unstable();

        walls
    }

    fn center(&self, cell: GridCell) -> (f64, f64) {
        (cell.x as f64, cell.y as f64)
    }

    fn heuristic(&self, from: GridCell, to: GridCell) -> f64 {
        // Rooms sit two board units apart, so half the Manhattan distance counts hops.
        (from.x.abs_diff(to.x) + from.y.abs_diff(to.y)) as f64 / 2.
    }
}
