//! A* search with a recorded exploration trace.
//!
//! The search runs over the open-wall graph of a generated [`Maze`] with a uniform cost of one per
//! hop and the topology's admissible heuristic. Besides the shortest path it records every cell it
//! finalizes, in order, so the search itself can be replayed frame by frame.
//!
//! Frontier entries are ordered by estimated total cost `f = g + h`, and entries with equal
//! estimates are popped in ascending cell order (the topology's [`Ord`] on cells, lexicographic
//! on the coordinate pair for both shipped shapes). That tie-break never changes the length of
//! the path, but it fixes the recorded exploration order and with it the animation.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
    hash::Hash,
};

use log::debug;
use serde::Serialize;

use crate::{error::MazeError, maze::Maze, topology::Topology};

/// Result of one search.
///
/// The trace is the input of the frame schedule. It keeps the exploration order separate from the
/// path so a renderer can first replay how the search spread and then draw the route it found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExplorationTrace<C> {
    /// Cells in the order they were finalized, excluding the start and end cells.
    pub exploration_order: Vec<C>,
    /// Shortest path from start to end, both included. Empty when the end cannot be reached.
    pub path: Vec<C>,
}

impl<C> ExplorationTrace<C> {
    /// Returns whether the search reached the end cell.
    ///
    /// An unsolved trace is a valid outcome on a disconnected maze, not an error.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// Returns the number of hops along the path, if there is one.
    ///
    /// A path from a cell to itself has zero hops. An unsolved trace has no hop count at all.
    #[must_use]
    pub const fn hops(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// A frontier entry. The heap is a max-heap, so the ordering is reversed to pop the lowest
/// estimate, then the lowest cell, first.
struct FrontierEntry<C> {
    /// Estimated total cost through this cell.
    estimate: f64,
    /// Cell to expand.
    cell: C,
}

impl<C: Ord> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl<C: Ord> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Ord> Eq for FrontierEntry<C> {}

/// Bookkeeping of a single search, discarded when the search returns.
struct SearchState<C> {
    /// Cells waiting to be expanded. Stale entries are skipped when popped.
    frontier: BinaryHeap<FrontierEntry<C>>,
    /// Best known hop count from the start to each reached cell.
    g_score: HashMap<C, usize>,
    /// Predecessor of each reached cell on its best known path.
    came_from: HashMap<C, C>,
    /// Cells already finalized.
    visited: HashSet<C>,
}

impl<C: Copy + Ord + Hash> SearchState<C> {
    /// Seeds the state with the start cell.
    fn new(start: C, estimate: f64) -> Self {
        Self {
            frontier: BinaryHeap::from([FrontierEntry {
                estimate,
                cell: start,
            }]),
            g_score: HashMap::from([(start, 0)]),
            came_from: HashMap::new(),
            visited: HashSet::new(),
        }
    }

    /// Records `cost` as the new best cost of `cell` through `previous` if it improves on the
    /// known one, and reports whether it did.
    fn relax(&mut self, cell: C, previous: C, cost: usize) -> bool {
        if matches!(self.g_score.get(&cell), Some(&known) if known <= cost) {
            return false;
        }

        let _ = self.g_score.insert(cell, cost);
        let _ = self.came_from.insert(cell, previous);
        true
    }
}

/// Finds a shortest path between two cells of a maze and records the exploration order.
///
/// The loop ends as soon as `end` is popped from the frontier, at which point its cost is final.
/// A maze where `end` cannot be reached yields an empty path and every cell the search exhausted.
///
/// # Errors
///
/// Returns [`MazeError::CellOutOfBounds`] when `start` or `end` is not a cell of the maze.
pub fn search<T: Topology>(
    maze: &Maze<T>,
    start: T::Cell,
    end: T::Cell,
) -> Result<ExplorationTrace<T::Cell>, MazeError> {
    let topology = maze.topology();
    for cell in [start, end] {
        if !topology.contains(cell) {
            return Err(MazeError::CellOutOfBounds {
                cell: format!("{cell:?}"),
            });
        }
    }

    let mut state = SearchState::new(start, topology.heuristic(start, end));
    let mut exploration_order = Vec::new();

    while let Some(FrontierEntry { cell: current, .. }) = state.frontier.pop() {
        if !state.visited.insert(current) {
            continue;
        }

        if current == end {
            let path = reconstruct_path(&state.came_from, start, end);
            debug!(
                "Search from {start:?} to {end:?} explored {} cells, path of {} cells",
                exploration_order.len(),
                path.len()
            );

            return Ok(ExplorationTrace {
                exploration_order,
                path,
            });
        }
        if current != start {
            exploration_order.push(current);
        }

        let cost = state.g_score.get(&current).copied().unwrap_or_default() + 1;
        for neighbor in maze.open_neighbors(current) {
            if state.relax(neighbor, current, cost) {
                state.frontier.push(FrontierEntry {
                    estimate: cost as f64 + topology.heuristic(neighbor, end),
                    cell: neighbor,
                });
            }
        }
    }

    debug!(
        "Search from {start:?} to {end:?} exhausted {} cells without reaching the end",
        exploration_order.len()
    );

    Ok(ExplorationTrace {
        exploration_order,
        path: Vec::new(),
    })
}

/// Rebuilds the path from `start` to `end` by walking predecessor links backwards.
///
/// Returns an empty path when the links do not lead back to `start`, or when they loop. The same
/// predecessor map always yields the same path, so the path can be rebuilt at any time.
pub fn reconstruct_path<C: Copy + Eq + Hash>(
    came_from: &HashMap<C, C>,
    start: C,
    end: C,
) -> Vec<C> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        let Some(&previous) = came_from.get(&current) else {
            return Vec::new();
        };
        // A well-formed predecessor map is a tree, so a longer walk means a cycle.
        if path.len() > came_from.len() {
            return Vec::new();
        }

        path.push(previous);
        current = previous;
    }
    path.reverse();

    path
}
