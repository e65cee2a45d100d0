//! This crate generates perfect mazes, solves them with A* and turns the search into a frame
//! schedule that an external renderer can animate.
//!
//! The pipeline runs in four stages, each handing an immutable artifact to the next:
//!
//! 1. A [`topology::Topology`] defines the cells and their adjacency, either a rectangular board
//!    or concentric rings of sectors.
//! 2. The [`generator`] carves a spanning tree over it from a seeded random source, producing a
//!    [`maze::Maze`].
//! 3. The [`pathfinding`] module searches the maze and records every cell it finalizes.
//! 4. The [`schedule`] module lays that trace out over discrete frames.
//!
//! [`run`] wires the stages together from the command-line [`config::Args`] and returns the
//! resulting [`export::RenderBundle`] as JSON.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

use color_eyre::eyre::Result;
use log::{info, warn};

use crate::{
    config::{Args, ShapeKind},
    error::MazeError,
    export::{DescribeShape, RenderBundle},
    generator::{generate, Algorithm},
    pathfinding::search,
    schedule::FrameSchedule,
    seed::seeded_rng,
    topology::{
        radial::{RadialCell, RadialGrid},
        rectangular::{GridCell, RectangularGrid},
        Topology,
    },
};

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod maze;
pub mod pathfinding;
pub mod playback;
pub mod schedule;
pub mod seed;
pub mod topology;

/// Runs the whole pipeline described by `args` and returns the render bundle as JSON.
///
/// Topology parameters and the start and end cells are validated before anything is carved.
/// A maze in which the end cannot be reached still produces a bundle, with an empty path.
///
/// # Errors
///
/// - [`MazeError`] for invalid topology parameters, cells outside the maze or a schedule that
///   does not fit the frame arithmetic.
pub fn run(args: &Args) -> Result<String> {
    let seed = args.seed_source().resolve();
    let algorithm = args.algorithm();
    info!("Building a {:?} maze with seed {seed}", args.shape);

    match args.shape {
        ShapeKind::Rectangular => {
            let grid = RectangularGrid::new(args.width, args.height)?;
            let start = args
                .start
                .map_or(GridCell::new(1, 1), |(x, y)| GridCell::new(x, y));
            let end = args
                .end
                .map_or_else(|| grid.far_corner(), |(x, y)| GridCell::new(x, y));

            render(grid, start, end, seed, algorithm, args)
        }
        ShapeKind::Radial => {
            let grid = RadialGrid::new(args.rings, args.sectors)?;
            let start = args
                .start
                .map_or(RadialCell::new(0, 0), |(ring, sector)| {
                    RadialCell::new(ring, sector)
                });
            let end = args.end.map_or_else(
                || grid.outermost_exit(),
                |(ring, sector)| RadialCell::new(ring, sector),
            );

            render(grid, start, end, seed, algorithm, args)
        }
    }
}

/// Carves, solves and schedules a maze over `topology`, then serializes the result.
fn render<T>(
    topology: T,
    start: T::Cell,
    end: T::Cell,
    seed: u64,
    algorithm: Algorithm,
    args: &Args,
) -> Result<String>
where
    T: Topology + DescribeShape,
{
    for cell in [start, end] {
        if !topology.contains(cell) {
            return Err(MazeError::CellOutOfBounds {
                cell: format!("{cell:?}"),
            }
            .into());
        }
    }

    let shape = topology.describe();
    let maze = generate(topology, algorithm, &mut seeded_rng(seed));
    let trace = search(&maze, start, end)?;
    if !trace.is_solved() {
        warn!("No path connects {start:?} and {end:?}");
    }
    let schedule = FrameSchedule::assemble(&trace, start, end, args.schedule_options())?;

    let bundle = RenderBundle {
        shape,
        seed,
        algorithm,
        walls: maze.wall_states(),
        start,
        end,
        exploration_order: trace.exploration_order,
        path: trace.path,
        schedule,
    };

    Ok(bundle.to_json(args.pretty)?)
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use serde_json::Value;

    use super::*;

    /// Runs the pipeline for a command line and parses its output.
    fn run_json(argv: &[&str]) -> Value {
        let args = Args::try_parse_from(argv).expect("valid arguments");
        let json = run(&args).expect("pipeline succeeds");

        serde_json::from_str(&json).expect("output is JSON")
    }

    #[test]
    fn test_run_rectangular_defaults() {
        let json = run_json(&["labyrintrace", "--date", "2024-01-01"]);

        assert_eq!(json["seed"], 4_167_562_417_u64, "seed derived from the date");
        assert_eq!(json["algorithm"], "depth-first", "boards default to depth-first");
        assert_eq!(json["start"]["x"], 1, "starts in the first room");
        assert_eq!(json["end"]["x"], 19, "ends in the far corner");
        assert!(
            json["path"].as_array().is_some_and(|path| !path.is_empty()),
            "a perfect maze is always solvable"
        );
    }

    #[test]
    fn test_run_radial() {
        let json = run_json(&[
            "labyrintrace",
            "--shape",
            "radial",
            "--rings",
            "3",
            "--sectors",
            "4",
            "--seed",
            "9",
        ]);

        assert_eq!(json["algorithm"], "prim", "rings default to prim");
        assert_eq!(json["end"]["ring"], 2, "exit on the outermost ring");
        assert_eq!(json["end"]["sector"], 4, "exit halfway round");
        assert!(
            json["path"].as_array().is_some_and(|path| path.len() >= 3),
            "the path crosses every ring"
        );
    }

    #[test]
    fn test_run_is_reproducible() {
        let argv = ["labyrintrace", "--seed", "123", "--width", "11", "--height", "9"];
        let args = Args::try_parse_from(argv).expect("valid arguments");

        assert_eq!(
            run(&args).expect("pipeline succeeds"),
            run(&args).expect("pipeline succeeds"),
            "same arguments, same bundle"
        );
    }

    #[test]
    fn test_run_rejects_even_dimensions() {
        let args = Args::try_parse_from(["labyrintrace", "--width", "10", "--seed", "1"])
            .expect("valid arguments");
        let err = run(&args).expect_err("even widths are rejected");

        assert!(
            matches!(
                err.downcast_ref::<MazeError>(),
                Some(MazeError::InvalidDimensions { .. })
            ),
            "configuration error before generation"
        );
    }

    #[test]
    fn test_run_rejects_zero_rings() {
        let args = Args::try_parse_from(["labyrintrace", "-s", "radial", "--rings", "0"])
            .expect("valid arguments");

        assert!(
            matches!(
                run(&args).expect_err("rings are required").downcast_ref::<MazeError>(),
                Some(MazeError::NoRings)
            ),
            "zero rings are a configuration error"
        );
    }

    #[test]
    fn test_run_rejects_cells_outside_maze() {
        let args = Args::try_parse_from(["labyrintrace", "--seed", "1", "--end", "2,2"])
            .expect("valid arguments");

        assert!(
            matches!(
                run(&args).expect_err("walls are not cells").downcast_ref::<MazeError>(),
                Some(MazeError::CellOutOfBounds { .. })
            ),
            "end cell is validated"
        );
    }
}
