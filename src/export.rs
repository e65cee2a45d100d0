//! Lossless hand-off to external renderers.
//!
//! A [`RenderBundle`] carries everything a renderer needs to draw and animate one maze: the shape,
//! the static wall state, the two anchors, the raw search trace and the frame schedule built from
//! it. It is serialized as JSON.

use log::debug;
use serde::Serialize;

use crate::{
    error::MazeError,
    generator::Algorithm,
    maze::WallState,
    schedule::FrameSchedule,
    topology::{
        radial::{RadialGeometry, RadialGrid},
        rectangular::RectangularGrid,
    },
};

/// Shape parameters a renderer needs to lay out the cells.
///
/// The descriptor is tagged by `kind` in JSON so that a renderer can pick its drawing code before
/// reading any cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDescriptor {
    /// A rectangular board in grid units, rooms on odd coordinates.
    Rectangular {
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
    },
    /// Concentric rings of sectors.
    Radial {
        /// Sector count of each ring, innermost first.
        sectors_per_ring: Vec<usize>,
        /// Drawing geometry of the rings.
        geometry: RadialGeometry,
    },
}

/// Topologies that can describe themselves to a renderer.
///
/// This is kept apart from the topology trait because the generator and pathfinder never need it.
pub trait DescribeShape {
    /// Returns the shape parameters of the topology.
    fn describe(&self) -> ShapeDescriptor;
}

impl DescribeShape for RectangularGrid {
    fn describe(&self) -> ShapeDescriptor {
        ShapeDescriptor::Rectangular {
            width: self.width(),
            height: self.height(),
        }
    }
}

impl DescribeShape for RadialGrid {
    fn describe(&self) -> ShapeDescriptor {
        ShapeDescriptor::Radial {
            sectors_per_ring: self.sectors_per_ring().to_vec(),
            geometry: self.geometry(),
        }
    }
}

/// Everything produced by one run of the pipeline.
///
/// The bundle is lossless with respect to what a renderer needs: the walls to draw, the anchors
/// to mark, the raw trace and the frame schedule derived from it. The seed and algorithm are
/// carried along so the same maze can be regenerated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderBundle<C, W> {
    /// Shape of the maze.
    pub shape: ShapeDescriptor,
    /// Seed the maze was carved with.
    pub seed: u64,
    /// Carving algorithm.
    pub algorithm: Algorithm,
    /// State of every wall, in ascending wall order.
    pub walls: Vec<WallState<W>>,
    /// Start anchor.
    pub start: C,
    /// End anchor.
    pub end: C,
    /// Cells finalized by the search, anchors excluded.
    pub exploration_order: Vec<C>,
    /// Shortest path, anchors included. Empty when unsolved.
    pub path: Vec<C>,
    /// Frame schedule built from the search.
    pub schedule: FrameSchedule<C>,
}

impl<C: Serialize, W: Serialize> RenderBundle<C, W> {
    /// Serializes the bundle as JSON, indented when `pretty` is set.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::Serialization`] when a field cannot be represented as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, MazeError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        debug!("Serialized render bundle into {} bytes", json.len());

        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::{
        generator::generate,
        maze::Maze,
        pathfinding::search,
        schedule::ScheduleOptions,
        seed::seeded_rng,
        topology::{radial::RadialCell, rectangular::GridCell, Topology},
    };

    /// Runs the whole pipeline over any describable topology.
    fn bundle<T: Topology + DescribeShape>(
        topology: T,
        start: T::Cell,
        end: T::Cell,
    ) -> RenderBundle<T::Cell, T::Wall> {
        let shape = topology.describe();
        let maze: Maze<T> = generate(topology, Algorithm::Prim, &mut seeded_rng(5));
        let trace = search(&maze, start, end).expect("valid cells");
        let schedule = FrameSchedule::assemble(&trace, start, end, ScheduleOptions::default())
            .expect("small schedule");

        RenderBundle {
            shape,
            seed: 5,
            algorithm: Algorithm::Prim,
            walls: maze.wall_states(),
            start,
            end,
            exploration_order: trace.exploration_order,
            path: trace.path,
            schedule,
        }
    }

    #[test]
    fn test_rectangular_bundle_json() {
        let grid = RectangularGrid::new(7, 5).expect("valid dimensions");
        let bundle = bundle(grid, GridCell::new(1, 1), GridCell::new(5, 3));
        let json: Value =
            serde_json::from_str(&bundle.to_json(false).expect("serializable")).expect("valid");

        assert_eq!(json["shape"]["kind"], "rectangular", "shape is tagged");
        assert_eq!(json["shape"]["width"], 7, "width is kept");
        assert_eq!(json["algorithm"], "prim", "algorithm is kebab-case");
        assert_eq!(json["start"]["x"], 1, "cells serialize as objects");
        assert_eq!(
            json["walls"].as_array().map(Vec::len),
            Some(7),
            "3x2 rooms have seven walls"
        );
        assert_eq!(
            json["schedule"]["total_frames"],
            bundle.schedule.total_frames(),
            "totals are exported"
        );
    }

    #[test]
    fn test_radial_bundle_json() {
        let grid = RadialGrid::new(3, 4).expect("valid layout");
        let bundle = bundle(grid, RadialCell::new(0, 0), RadialCell::new(2, 4));
        let json: Value =
            serde_json::from_str(&bundle.to_json(true).expect("serializable")).expect("valid");

        assert_eq!(json["shape"]["kind"], "radial", "shape is tagged");
        assert_eq!(
            json["shape"]["sectors_per_ring"],
            serde_json::json!([4, 4, 8]),
            "sector layout is exported"
        );
        assert_eq!(json["shape"]["geometry"]["inner_radius"], 25.0, "geometry is exported");
        assert!(
            json["walls"]
                .as_array()
                .is_some_and(|walls| walls.iter().any(|state| state["wall"]["kind"] == "ring")),
            "ring walls are tagged"
        );
        assert!(
            json["schedule"]["entries"]
                .as_array()
                .is_some_and(|entries| entries.iter().any(|entry| entry["role"] == "anchor")),
            "roles are snake_case"
        );
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let grid = RectangularGrid::new(3, 3).expect("valid dimensions");
        let bundle = bundle(grid, GridCell::new(1, 1), GridCell::new(1, 1));

        assert!(
            bundle.to_json(true).expect("serializable").contains('\n'),
            "pretty output spans lines"
        );
        assert!(
            !bundle.to_json(false).expect("serializable").contains('\n'),
            "compact output is one line"
        );
    }
}
