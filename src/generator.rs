//! Randomized spanning-tree construction.
//!
//! Both carvers start from the topology origin, only ever open a wall towards a cell that has not
//! been reached yet, and stop once no unreached cell is adjacent to the carved region. Each opened
//! wall therefore adds exactly one new cell, which makes the result a spanning tree: a perfect
//! maze.

use std::collections::HashSet;

use clap::ValueEnum;
use log::{debug, info};
use rand::{seq::SliceRandom as _, Rng};
use serde::Serialize;

use crate::{maze::Maze, topology::Topology};

/// Maze carving strategies.
///
/// Both produce perfect mazes. They differ only in the texture of the corridors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Randomized depth-first carving with backtracking. Produces long corridors with little
    /// branching.
    DepthFirst,
    /// Randomized Prim's algorithm over a wall frontier. Produces evenly branching mazes.
    Prim,
}

/// Carves a perfect maze over `topology` with the given algorithm and random source.
///
/// The same topology, algorithm and random source state always produce the same maze.
pub fn generate<T, R>(topology: T, algorithm: Algorithm, rng: &mut R) -> Maze<T>
where
    T: Topology,
    R: Rng + ?Sized,
{
    let mut maze = Maze::new(topology);

    match algorithm {
        Algorithm::DepthFirst => carve_depth_first(&mut maze, rng),
        Algorithm::Prim => carve_prim(&mut maze, rng),
    }

    info!(
        "Carved {} of {} walls over {} cells with {algorithm:?}",
        maze.open_wall_count(),
        maze.wall_states().len(),
        maze.topology().cell_count()
    );

    maze
}

/// Returns the neighbors of `cell` in a random order.
fn shuffled_neighbors<T, R>(
    topology: &T,
    cell: T::Cell,
    rng: &mut R,
) -> std::vec::IntoIter<(T::Cell, T::Wall)>
where
    T: Topology,
    R: Rng + ?Sized,
{
    let mut neighbors = topology.neighbors(cell);
    neighbors.shuffle(rng);
    neighbors.into_iter()
}

/// Carves with an explicit stack of shuffled neighbor lists.
///
/// Each stack entry plays the part of one recursive call: its neighbor list is shuffled once on
/// entry and consumed in that order, and the entry is dropped once the list runs out.
fn carve_depth_first<T, R>(maze: &mut Maze<T>, rng: &mut R)
where
    T: Topology,
    R: Rng + ?Sized,
{
    let origin = maze.topology().origin();
    let mut visited = HashSet::from([origin]);
    let mut stack = vec![shuffled_neighbors(maze.topology(), origin, rng)];
    let mut deepest = 1;

    while let Some(frame) = stack.last_mut() {
        let Some((neighbor, wall)) = frame.next() else {
            let _ = stack.pop();
            continue;
        };

        if visited.insert(neighbor) {
            maze.carve(wall);
            stack.push(shuffled_neighbors(maze.topology(), neighbor, rng));
            deepest = deepest.max(stack.len());
        }
    }

    debug!("Depth-first carve reached a stack depth of {deepest}");
}

/// Carves by repeatedly opening a uniformly chosen wall from the frontier.
///
/// Frontier entries pair a cell outside the carved region with the wall leading into it from the
/// region. Entries whose cell got reached in the meantime are discarded when drawn.
fn carve_prim<T, R>(maze: &mut Maze<T>, rng: &mut R)
where
    T: Topology,
    R: Rng + ?Sized,
{
    let origin = maze.topology().origin();
    let mut visited = HashSet::from([origin]);
    let mut frontier = maze.topology().neighbors(origin);
    frontier.shuffle(rng);
    let mut draws = 0_usize;

    while !frontier.is_empty() {
        draws += 1;
        let (cell, wall) = frontier.swap_remove(rng.random_range(0..frontier.len()));
        if !visited.insert(cell) {
            continue;
        }

        maze.carve(wall);
        frontier.extend(
            maze.topology()
                .neighbors(cell)
                .into_iter()
                .filter(|(neighbor, _)| !visited.contains(neighbor)),
        );
    }

    debug!("Prim carve drew {draws} frontier walls");
}
