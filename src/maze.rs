//! Wall state of a maze over some [`Topology`].
//!
//! A [`Maze`] starts with every wall closed. Only the generator may carve walls open; once it
//! hands the maze over, the maze is read-only and the pathfinder queries it through
//! [`Maze::open_neighbors`].

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::Serialize;

use crate::topology::Topology;

/// The state of a single wall, as exported to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WallState<W> {
    /// The wall being described.
    pub wall: W,
    /// Whether the wall has been carved open.
    pub open: bool,
}

/// A topology together with the open/closed state of each of its walls.
///
/// The generator owns the maze while it carves and hands it over once the spanning tree is done.
/// From then on every query is read-only, which lets the pathfinder borrow it freely.
#[derive(Clone, Debug)]
pub struct Maze<T: Topology> {
    /// Shape of the maze.
    topology: T,
    /// State of every wall of the topology, `true` meaning open.
    walls: BTreeMap<T::Wall, bool>,
}

impl<T: Topology> Maze<T> {
    /// Creates a maze with every wall of `topology` closed.
    ///
    /// The wall list is taken from [`Topology::walls`] once, so later queries never consult the
    /// topology for walls it does not know about. A fresh maze has no open walls and every cell is
    /// isolated until the generator carves it.
    pub fn new(topology: T) -> Self {
        let walls = topology.walls().into_iter().map(|wall| (wall, false)).collect();

        Self { topology, walls }
    }

    /// Returns the topology of the maze.
    ///
    /// The pathfinder uses it for cell validation and the heuristic, and the exporter for the shape
    /// descriptor.
    pub const fn topology(&self) -> &T {
        &self.topology
    }

    /// Opens a wall, making the two cells it separates mutually reachable.
    ///
    /// Walls outside the topology are ignored rather than recorded, so the wall map always holds
    /// exactly the walls of the shape.
    pub(crate) fn carve(&mut self, wall: T::Wall) {
        if let Some(open) = self.walls.get_mut(&wall) {
            *open = true;
        }
    }

    /// Returns whether the wall is open. Unknown walls are reported closed.
    pub fn is_open(&self, wall: T::Wall) -> bool {
        self.walls.get(&wall).copied().unwrap_or_default()
    }

    /// Returns the neighbors of `cell` that can be reached through an open wall.
    ///
    /// The neighbors come in the order of [`Topology::neighbors`], which keeps every search over the
    /// maze deterministic. A neighbor shows up twice when two distinct open walls lead to it.
    pub fn open_neighbors(&self, cell: T::Cell) -> Vec<T::Cell> {
        self.topology
            .neighbors(cell)
            .into_iter()
            .filter(|&(_, wall)| self.is_open(wall))
            .map(|(neighbor, _)| neighbor)
            .collect()
    }

    /// Returns the number of open walls.
    pub fn open_wall_count(&self) -> usize {
        self.walls.values().filter(|&&open| open).count()
    }

    /// Returns the open walls in ascending order.
    ///
    /// The ordering comes from the wall map itself, so two mazes carved the same way always list
    /// the same walls in the same order.
    pub fn open_walls(&self) -> Vec<T::Wall> {
        self.walls
            .iter()
            .filter_map(|(&wall, &open)| open.then_some(wall))
            .collect()
    }

    /// Returns the state of every wall in ascending wall order.
    ///
    /// This is the static picture handed to renderers: closed walls are drawn, open ones are not.
    /// A list is used instead of a map so that the states serialize to JSON without string keys.
    pub fn wall_states(&self) -> Vec<WallState<T::Wall>> {
        self.walls
            .iter()
            .map(|(&wall, &open)| WallState { wall, open })
            .collect()
    }

    /// Checks that the open walls form a spanning tree over the whole topology.
    ///
    /// A breadth-first walk from the origin follows open walls, never crossing back through the
    /// wall it arrived by. The maze is perfect when the walk reaches every cell, never meets an
    /// already reached cell through a different wall, and exactly `cell_count - 1` walls are open.
    pub fn is_perfect(&self) -> bool {
        let cell_count = self.topology.cell_count();
        if self.open_wall_count() + 1 != cell_count {
            return false;
        }

        let origin = self.topology.origin();
        let mut reached = HashSet::from([origin]);
        let mut queue = VecDeque::from([(origin, None)]);

        while let Some((cell, arrived_by)) = queue.pop_front() {
            for (neighbor, wall) in self.topology.neighbors(cell) {
                if !self.is_open(wall) || Some(wall) == arrived_by {
                    continue;
                }
                if !reached.insert(neighbor) {
                    return false;
                }
                queue.push_back((neighbor, Some(wall)));
            }
        }

        reached.len() == cell_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{
        radial::{RadialCell, RadialGrid, RadialWall},
        rectangular::{GridCell, GridWall, RectangularGrid},
    };

    /// Builds the 5x5 board with its four rooms joined in a U shape.
    fn carved_u_maze() -> Maze<RectangularGrid> {
        let mut maze = Maze::new(RectangularGrid::new(5, 5).expect("valid dimensions"));
        maze.carve(GridWall { x: 1, y: 2 });
        maze.carve(GridWall { x: 2, y: 3 });
        maze.carve(GridWall { x: 3, y: 2 });
        maze
    }

    #[test]
    fn test_new_maze_is_closed() {
        let maze = Maze::new(RectangularGrid::new(7, 7).expect("valid dimensions"));

        assert_eq!(maze.open_wall_count(), 0, "no wall starts open");
        assert_eq!(maze.wall_states().len(), 12, "3x3 rooms have 12 walls");
        assert!(
            maze.open_neighbors(GridCell::new(3, 3)).is_empty(),
            "closed rooms have no open neighbors"
        );
    }

    #[test]
    fn test_carve_opens_both_directions() {
        let maze = carved_u_maze();

        assert!(maze.is_open(GridWall { x: 1, y: 2 }), "carved wall is open");
        assert!(!maze.is_open(GridWall { x: 2, y: 1 }), "other wall is closed");
        assert_eq!(
            maze.open_neighbors(GridCell::new(1, 1)),
            vec![GridCell::new(1, 3)],
            "the top-left room opens south"
        );
        assert!(
            maze.open_neighbors(GridCell::new(1, 3))
                .contains(&GridCell::new(1, 1)),
            "the opening works both ways"
        );
    }

    #[test]
    fn test_carve_ignores_unknown_walls() {
        let mut maze = Maze::new(RectangularGrid::new(5, 5).expect("valid dimensions"));
        maze.carve(GridWall { x: 9, y: 9 });

        assert_eq!(maze.open_wall_count(), 0, "unknown walls are not recorded");
        assert!(!maze.is_open(GridWall { x: 9, y: 9 }), "unknown walls read closed");
    }

    #[test]
    fn test_open_walls_are_sorted() {
        let maze = carved_u_maze();

        assert_eq!(
            maze.open_walls(),
            vec![
                GridWall { x: 1, y: 2 },
                GridWall { x: 2, y: 3 },
                GridWall { x: 3, y: 2 },
            ],
            "open walls come out in ascending order"
        );
    }

    #[test]
    fn test_is_perfect_accepts_spanning_tree() {
        assert!(carved_u_maze().is_perfect(), "a U over four rooms is a tree");
    }

    #[test]
    fn test_is_perfect_rejects_cycle() {
        let mut maze = carved_u_maze();
        maze.carve(GridWall { x: 2, y: 1 });

        assert!(!maze.is_perfect(), "four open walls over four rooms form a loop");
    }

    #[test]
    fn test_is_perfect_rejects_disconnected() {
        let mut maze = Maze::new(RectangularGrid::new(7, 5).expect("valid dimensions"));
        // Close a loop on the left while leaving the right column cut off.
        for wall in [
            GridWall { x: 2, y: 1 },
            GridWall { x: 1, y: 2 },
            GridWall { x: 3, y: 2 },
            GridWall { x: 2, y: 3 },
            GridWall { x: 5, y: 2 },
        ] {
            maze.carve(wall);
        }

        assert_eq!(maze.open_wall_count(), 5, "six rooms, five open walls");
        assert!(!maze.is_perfect(), "a loop plus an island is not a tree");
    }

    #[test]
    fn test_is_perfect_handles_two_sector_ring() {
        let mut maze = Maze::new(RadialGrid::from_sectors(vec![2]).expect("valid layout"));
        maze.carve(RadialWall::Radial { ring: 0, sector: 0 });

        assert!(maze.is_perfect(), "one of the two walls joins both sectors");
        assert_eq!(
            maze.open_neighbors(RadialCell::new(0, 0)),
            vec![RadialCell::new(0, 1)],
            "only the carved wall is crossed"
        );

        maze.carve(RadialWall::Radial { ring: 0, sector: 1 });
        assert!(!maze.is_perfect(), "both walls open make a loop");
    }
}
