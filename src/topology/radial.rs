//! Radial (circular) grid topology.
//!
//! Cells are arranged in concentric rings around a centre. Ring `r` is split into
//! `sectors_per_ring[r]` equal sectors, and the sector counts never shrink outwards. Adjacent
//! sectors of one ring are separated by radial walls, and the ring itself closes into a cycle.
//! Between two rings, every outer sector maps back onto exactly one inner sector by proportional
//! index mapping, so an inner cell may face several outer cells. Each such inner/outer pairing has
//! its own ring wall segment.

#![expect(
    clippy::module_name_repetitions,
    reason = "Both grid shapes are imported side by side, so names carry the shape."
)]

use std::{
    f64::consts::{PI, TAU},
    ops::Range,
};

use serde::Serialize;

use super::Topology;
use crate::error::MazeError;

/// A cell of a radial grid.
///
/// Cells order lexicographically on `(ring, sector)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RadialCell {
    /// Ring index, 0 being the innermost ring.
    pub ring: usize,
    /// Sector index within the ring.
    pub sector: usize,
}

impl RadialCell {
    /// Creates a cell at the given ring and sector.
    #[must_use]
    pub const fn new(ring: usize, sector: usize) -> Self {
        Self { ring, sector }
    }
}

/// A wall of a radial grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadialWall {
    /// The wall between `sector` and the next sector (modulo the sector count) of `ring`.
    Radial {
        /// Ring holding both sectors.
        ring: usize,
        /// Sector on the counter-clockwise side of the wall.
        sector: usize,
    },
    /// The wall between the inner cell `(ring, sector)` and the outer cell `(ring + 1, outer)`.
    Ring {
        /// Inner ring index.
        ring: usize,
        /// Inner sector index.
        sector: usize,
        /// Outer sector index, one of the sectors that map back onto `sector`.
        outer: usize,
    },
}

/// Drawing-space placement of a radial grid.
///
/// The defaults match a 400 by 400 drawing with the maze centred in it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RadialGeometry {
    /// Horizontal coordinate of the centre.
    pub center_x: f64,
    /// Vertical coordinate of the centre.
    pub center_y: f64,
    /// Radius of the empty disc inside ring 0.
    pub inner_radius: f64,
    /// Radial thickness of every ring.
    pub ring_width: f64,
}

impl Default for RadialGeometry {
    fn default() -> Self {
        Self {
            center_x: 200.,
            center_y: 200.,
            inner_radius: 25.,
            ring_width: 22.,
        }
    }
}

/// Returns the sector counts of `rings` rings starting at `base` sectors and doubling every two
/// rings.
///
/// # Errors
///
/// Returns [`MazeError::NoRings`] for zero rings, and [`MazeError::InvalidSectors`] when `base` is
/// zero or a ring's sector count overflows.
pub fn doubling_sectors(rings: usize, base: usize) -> Result<Vec<usize>, MazeError> {
    if rings == 0 {
        return Err(MazeError::NoRings);
    }
    if base == 0 {
        return Err(MazeError::InvalidSectors {
            ring: 0,
            sectors: base,
            reason: "rings need at least one sector",
        });
    }

    (0..rings)
        .map(|ring| {
            u32::try_from(ring / 2)
                .ok()
                .and_then(|exponent| 2_usize.checked_pow(exponent))
                .and_then(|multiplier| base.checked_mul(multiplier))
                .ok_or(MazeError::InvalidSectors {
                    ring,
                    sectors: base,
                    reason: "sector count overflows",
                })
        })
        .collect()
}

/// Maps a sector onto the ring immediately inside it.
///
/// `sectors` is the sector count of the ring holding `sector`, and `inner_sectors` the count of
/// the inner ring.
#[must_use]
pub const fn inner_sector(sector: usize, sectors: usize, inner_sectors: usize) -> usize {
    sector * inner_sectors / sectors
}

/// Returns the sectors of the next ring out that map back onto `sector`.
///
/// This is the exact preimage of [`inner_sector`]: an outer sector `o` lies in the returned range
/// if and only if `inner_sector(o, outer_sectors, sectors) == sector`. The range is never empty
/// while `outer_sectors >= sectors`.
#[must_use]
pub const fn outer_sectors(sector: usize, sectors: usize, outer_sectors: usize) -> Range<usize> {
    (sector * outer_sectors).div_ceil(sectors)..((sector + 1) * outer_sectors).div_ceil(sectors)
}

/// A set of concentric rings with a non-decreasing number of sectors.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGrid {
    /// Sector count of every ring, innermost first.
    sectors: Vec<usize>,
    /// Drawing-space placement used for cell centres.
    geometry: RadialGeometry,
    /// Longest centre-to-centre distance between two adjacent cells.
    max_step: f64,
}

impl RadialGrid {
    /// Builds a grid of `rings` rings whose sector count starts at `base_sectors` and doubles every
    /// two rings.
    ///
    /// # Errors
    ///
    /// See [`doubling_sectors`].
    pub fn new(rings: usize, base_sectors: usize) -> Result<Self, MazeError> {
        Self::from_sectors(doubling_sectors(rings, base_sectors)?)
    }

    /// Builds a grid from an explicit list of sector counts.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::NoRings`] for an empty list and [`MazeError::InvalidSectors`] when a
    /// count is zero or smaller than the count of the ring inside it.
    pub fn from_sectors(sectors: Vec<usize>) -> Result<Self, MazeError> {
        if sectors.is_empty() {
            return Err(MazeError::NoRings);
        }

        let mut previous = 0;
        for (ring, &count) in sectors.iter().enumerate() {
            if count == 0 {
                return Err(MazeError::InvalidSectors {
                    ring,
                    sectors: count,
                    reason: "rings need at least one sector",
                });
            }
            if count < previous {
                return Err(MazeError::InvalidSectors {
                    ring,
                    sectors: count,
                    reason: "sector counts cannot shrink outwards",
                });
            }
            previous = count;
        }

        let mut grid = Self {
            sectors,
            geometry: RadialGeometry::default(),
            max_step: 1.,
        };
        grid.max_step = grid.longest_step();

        Ok(grid)
    }

    /// Replaces the drawing-space placement of the grid.
    #[must_use]
    pub fn with_geometry(mut self, geometry: RadialGeometry) -> Self {
        self.geometry = geometry;
        self.max_step = self.longest_step();
        self
    }

    /// Returns the number of rings.
    #[must_use]
    pub const fn rings(&self) -> usize {
        self.sectors.len()
    }

    /// Returns the sector count of every ring, innermost first.
    #[must_use]
    pub fn sectors_per_ring(&self) -> &[usize] {
        &self.sectors
    }

    /// Returns the sector count of `ring`, or zero past the outermost ring.
    #[must_use]
    pub fn sectors_in(&self, ring: usize) -> usize {
        self.sectors.get(ring).copied().unwrap_or_default()
    }

    /// Returns the drawing-space placement of the grid.
    #[must_use]
    pub const fn geometry(&self) -> RadialGeometry {
        self.geometry
    }

    /// Returns the cell halfway round the outermost ring, the conventional exit.
    #[must_use]
    pub fn outermost_exit(&self) -> RadialCell {
        let ring = self.rings().saturating_sub(1);
        RadialCell::new(ring, self.sectors_in(ring) / 2)
    }

    /// Computes the longest centre-to-centre distance over all adjacent cell pairs.
    fn longest_step(&self) -> f64 {
        let longest = self
            .cells()
            .into_iter()
            .flat_map(|cell| {
                self.neighbors(cell)
                    .into_iter()
                    .map(move |(neighbor, _)| (cell, neighbor))
            })
            .map(|(cell, neighbor)| self.distance(cell, neighbor))
            .fold(0., f64::max);

        if longest > 0. {
            longest
        } else {
            1.
        }
    }

    /// Euclidean distance between two cell centres.
    fn distance(&self, from: RadialCell, to: RadialCell) -> f64 {
        let (from_x, from_y) = self.center(from);
        let (to_x, to_y) = self.center(to);
        (from_x - to_x).hypot(from_y - to_y)
    }
}

impl Topology for RadialGrid {
    type Cell = RadialCell;
    type Wall = RadialWall;

    fn cell_count(&self) -> usize {
        self.sectors.iter().sum()
    }

    fn cells(&self) -> Vec<RadialCell> {
        self.sectors
            .iter()
            .enumerate()
            .flat_map(|(ring, &count)| (0..count).map(move |sector| RadialCell::new(ring, sector)))
            .collect()
    }

    fn contains(&self, cell: RadialCell) -> bool {
        cell.sector < self.sectors_in(cell.ring)
    }

    fn origin(&self) -> RadialCell {
        RadialCell::new(0, 0)
    }

    fn neighbors(&self, cell: RadialCell) -> Vec<(RadialCell, RadialWall)> {
        if !self.contains(cell) {
            return Vec::new();
        }

        let RadialCell { ring, sector } = cell;
        let count = self.sectors_in(ring);
        let mut neighbors = Vec::new();

        if count > 1 {
            let previous = (sector + count - 1) % count;
            let next = (sector + 1) % count;
            neighbors.push((
                RadialCell::new(ring, previous),
                RadialWall::Radial {
                    ring,
                    sector: previous,
                },
            ));
            neighbors.push((
                RadialCell::new(ring, next),
                RadialWall::Radial { ring, sector },
            ));
        }

        if let Some(inner_ring) = ring.checked_sub(1) {
            let inner = inner_sector(sector, count, self.sectors_in(inner_ring));
            neighbors.push((
                RadialCell::new(inner_ring, inner),
                RadialWall::Ring {
                    ring: inner_ring,
                    sector: inner,
                    outer: sector,
                },
            ));
        }

        let outer_count = self.sectors_in(ring + 1);
        if outer_count > 0 {
            for outer in outer_sectors(sector, count, outer_count) {
                neighbors.push((
                    RadialCell::new(ring + 1, outer),
                    RadialWall::Ring {
                        ring,
                        sector,
                        outer,
                    },
                ));
            }
        }

        neighbors
    }

    fn walls(&self) -> Vec<RadialWall> {
        let mut walls = Vec::new();
        for (ring, &count) in self.sectors.iter().enumerate() {
            if count > 1 {
                walls.extend((0..count).map(|sector| RadialWall::Radial { ring, sector }));
            }

            let outer_count = self.sectors_in(ring + 1);
            walls.extend((0..outer_count).map(|outer| RadialWall::Ring {
                ring,
                sector: inner_sector(outer, outer_count, count),
                outer,
            }));
        }
        walls.sort_unstable();

        walls
    }

    fn center(&self, cell: RadialCell) -> (f64, f64) {
        let count = self.sectors_in(cell.ring).max(1) as f64;
        let angle = TAU * cell.sector as f64 / count + PI / count;
        let radius = self
            .geometry
            .ring_width
            .mul_add(cell.ring as f64 + 0.5, self.geometry.inner_radius);

        (
            radius.mul_add(angle.cos(), self.geometry.center_x),
            radius.mul_add(angle.sin(), self.geometry.center_y),
        )
    }

    fn heuristic(&self, from: RadialCell, to: RadialCell) -> f64 {
        // No single hop covers more than `max_step`, so this never overestimates the hop count.
        self.distance(from, to) / self.max_step
    }
}
