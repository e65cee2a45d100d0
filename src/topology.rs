//! Cell graph abstraction shared by the generator and the pathfinder.
//!
//! A topology owns the universe of cells of one maze shape and knows which cells are adjacent and
//! through which wall. It carries no wall state; that lives in [`crate::maze::Maze`]. Two shapes
//! are provided: [`rectangular::RectangularGrid`] and [`radial::RadialGrid`].

use std::{fmt::Debug, hash::Hash};

use serde::Serialize;

pub mod radial;
pub mod rectangular;

/// Shape-specific cell universe and adjacency.
///
/// Every method is a pure function of the topology. In particular [`Topology::neighbors`] returns
/// its entries in the same order on every call, which is what makes seeded generation
/// reproducible.
pub trait Topology {
    /// Identifier of a single cell. The [`Ord`] implementation doubles as the deterministic
    /// tie-break of the pathfinder frontier.
    type Cell: Copy + Ord + Hash + Debug + Serialize;
    /// Identifier of a wall shared by two adjacent cells.
    type Wall: Copy + Ord + Hash + Debug + Serialize;

    /// Returns the total number of cells.
    fn cell_count(&self) -> usize;

    /// Returns every cell in ascending order.
    fn cells(&self) -> Vec<Self::Cell>;

    /// Returns whether the cell belongs to this topology.
    fn contains(&self, cell: Self::Cell) -> bool;

    /// Returns the cell from which generation starts.
    fn origin(&self) -> Self::Cell;

    /// Returns the adjacent cells together with the wall separating each of them from `cell`.
    ///
    /// The same neighbor may show up more than once when two distinct walls separate it from
    /// `cell`, as happens in a two-sector ring.
    fn neighbors(&self, cell: Self::Cell) -> Vec<(Self::Cell, Self::Wall)>;

    /// Returns every wall of the topology exactly once, in ascending order.
    fn walls(&self) -> Vec<Self::Wall>;

    /// Returns the geometric centre of a cell in the shape's drawing space.
    fn center(&self, cell: Self::Cell) -> (f64, f64);

    /// Returns a lower bound on the number of hops between two cells.
    ///
    /// The estimate must never exceed the true hop count over any wall configuration, and it must
    /// change by at most one across a single hop.
    fn heuristic(&self, from: Self::Cell, to: Self::Cell) -> f64;
}
