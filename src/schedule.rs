//! Frame schedule assembly.
//!
//! Turns an [`ExplorationTrace`] into discrete, frame-indexed visibility intervals. The schedule is
//! the whole contract with a renderer: which cell is active during which frames, how many frames
//! the loop has, and how long a frame lasts when played back in real time.
//!
//! The loop is laid out in three phases. First the explored cells light up one per frame, then the
//! path grows one cell per frame, then the final picture holds for a pause before the loop starts
//! over. Explored cells linger for a short fade tail past the path phase, path cells clear a few
//! frames before the loop ends, and the two anchors stay lit throughout.

#![expect(
    clippy::module_name_repetitions,
    reason = "Schedule names read better unqualified at call sites."
)]

use std::fmt::Debug;

use log::info;
use serde::Serialize;

use crate::{error::MazeError, pathfinding::ExplorationTrace};

/// Frames held at the end of the loop when no other count is configured.
pub const DEFAULT_PAUSE_FRAMES: usize = 15;

/// Real-time duration of a frame when no other duration is configured.
pub const DEFAULT_FRAME_DURATION_MS: u64 = 60;

/// Share of the total frame count, in percent, that explored cells linger past the path phase.
pub const FADE_TAIL_PERCENT: i32 = 5;

/// Frames before the end of the loop at which path cells are cleared.
pub const PATH_CLEAR_LEAD: usize = 3;

/// Part a cell plays in the animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Start or end cell, visible for the whole loop.
    Anchor,
    /// Cell finalized by the search.
    Explored,
    /// Cell on the shortest path, endpoints excluded.
    Path,
}

/// Half-open frame range `[start, end)` during which a cell is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ActiveInterval {
    /// First active frame.
    pub start: usize,
    /// First frame past the interval.
    pub end: usize,
}

impl ActiveInterval {
    /// Returns whether `frame` falls inside the interval.
    #[must_use]
    pub const fn contains(&self, frame: usize) -> bool {
        self.start <= frame && frame < self.end
    }

    /// Returns the number of frames covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns whether the interval covers no frame at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One scheduled appearance of a cell.
///
/// A cell on the path is also an explored cell, so it owns one entry per role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduledCell<C> {
    /// Cell being drawn.
    pub cell: C,
    /// Part the cell plays during this interval.
    pub role: Role,
    /// Frames during which the cell is active.
    pub interval: ActiveInterval,
}

/// Knobs of the schedule that belong to the renderer rather than to the search.
///
/// Neither value changes which cells are scheduled. The pause only lengthens the loop, and the
/// frame duration only sets the playback speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Frames held after the path phase.
    pub pause_frames: usize,
    /// Real-time duration of one frame, in milliseconds.
    pub frame_duration_ms: u64,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            pause_frames: DEFAULT_PAUSE_FRAMES,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
        }
    }
}

/// Frame-indexed visibility of every cell involved in a search.
///
/// The schedule is built once from an exploration trace and never changes afterwards. It records
/// the size of each phase of the loop together with one [`ScheduledCell`] per appearance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrameSchedule<C> {
    /// Frames spent revealing explored cells.
    exploration_frames: usize,
    /// Frames spent revealing the path, endpoints included.
    path_frames: usize,
    /// Frames held at the end of the loop.
    pause_frames: usize,
    /// Length of the loop.
    total_frames: usize,
    /// Real-time duration of one frame, in milliseconds.
    frame_duration_ms: u64,
    /// Anchors first, then explored cells in exploration order, then path cells in path order.
    entries: Vec<ScheduledCell<C>>,
}

impl<C: Copy + Eq + Debug> FrameSchedule<C> {
    /// Lays out the frames of a search.
    ///
    /// Explored cell `i` appears on frame `i` and stays until a short fade tail past the path phase.
    /// Path cell `j` appears on frame `exploration + j` and clears [`PATH_CLEAR_LEAD`] frames before
    /// the loop ends, though never before its own appearance frame is shown. The start and end
    /// cells are active on every frame.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::FrameOverflow`] when the frame count does not fit the schedule
    /// arithmetic.
    pub fn assemble(
        trace: &ExplorationTrace<C>,
        start: C,
        end: C,
        options: ScheduleOptions,
    ) -> Result<Self, MazeError> {
        let exploration_frames = trace.exploration_order.len();
        let path_frames = trace.path.len();
        let total_frames = exploration_frames
            .checked_add(path_frames)
            .and_then(|frames| frames.checked_add(options.pause_frames))
            .ok_or(MazeError::FrameOverflow { frames: usize::MAX })?;

        let fade_end =
            (exploration_frames + path_frames + fade_tail(total_frames)?).min(total_frames);
        let path_clear = total_frames.saturating_sub(PATH_CLEAR_LEAD);

        let mut entries = Vec::with_capacity(exploration_frames + path_frames);
        entries.push(anchor(start, total_frames));
        if end != start {
            entries.push(anchor(end, total_frames));
        }

        entries.extend(
            trace
                .exploration_order
                .iter()
                .enumerate()
                .map(|(index, &cell)| ScheduledCell {
                    cell,
                    role: Role::Explored,
                    interval: ActiveInterval {
                        start: index,
                        end: fade_end,
                    },
                }),
        );

        entries.extend(
            trace
                .path
                .iter()
                .enumerate()
                .filter(|&(_, &cell)| cell != start && cell != end)
                .map(|(index, &cell)| {
                    let appear = exploration_frames + index;
                    ScheduledCell {
                        cell,
                        role: Role::Path,
                        interval: ActiveInterval {
                            start: appear,
                            end: path_clear.max(appear + 1).min(total_frames),
                        },
                    }
                }),
        );

        info!(
            "Scheduled {} cells over {total_frames} frames ({exploration_frames} explored, \
             {path_frames} path, {} pause)",
            entries.len(),
            options.pause_frames
        );

        Ok(Self {
            exploration_frames,
            path_frames,
            pause_frames: options.pause_frames,
            total_frames,
            frame_duration_ms: options.frame_duration_ms,
            entries,
        })
    }

    /// Returns every interval during which `cell` is active, in entry order.
    ///
    /// Anchors have a single interval spanning the loop. An interior path cell has two, one as an
    /// explored cell and one as a path cell, and a cell the search never touched has none.
    pub fn intervals_for(&self, cell: C) -> Vec<ActiveInterval> {
        self.entries
            .iter()
            .filter(|entry| entry.cell == cell)
            .map(|entry| entry.interval)
            .collect()
    }

    /// Returns whether `cell` is active at `frame` in any of its roles.
    ///
    /// Frames past the end of the loop are never active. Renderers that loop should reduce the
    /// frame modulo [`FrameSchedule::total_frames`] first.
    pub fn is_active(&self, cell: C, frame: usize) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.cell == cell && entry.interval.contains(frame))
    }

    /// Returns the entries active at `frame`.
    ///
    /// The entries keep the schedule order, anchors first, so drawing them in order paints path
    /// cells over explored ones.
    pub fn active_at(&self, frame: usize) -> Vec<&ScheduledCell<C>> {
        self.entries
            .iter()
            .filter(|entry| entry.interval.contains(frame))
            .collect()
    }
}

impl<C> FrameSchedule<C> {
    /// Returns every scheduled entry.
    ///
    /// Anchors come first, then explored cells in exploration order, then path cells in path order.
    pub fn entries(&self) -> &[ScheduledCell<C>] {
        &self.entries
    }

    /// Returns the number of frames spent revealing explored cells.
    pub const fn exploration_frames(&self) -> usize {
        self.exploration_frames
    }

    /// Returns the number of frames spent revealing the path.
    pub const fn path_frames(&self) -> usize {
        self.path_frames
    }

    /// Returns the number of frames held at the end of the loop.
    pub const fn pause_frames(&self) -> usize {
        self.pause_frames
    }

    /// Returns the length of the loop in frames.
    ///
    /// This is the sum of the exploration, path and pause frames. Every interval of the schedule
    /// ends at or before it.
    pub const fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Returns the real-time duration of one frame in milliseconds.
    ///
    /// The schedule itself only counts frames. The duration is carried along for playback speed.
    pub const fn frame_duration_ms(&self) -> u64 {
        self.frame_duration_ms
    }
}

/// Builds the entry of a start or end cell.
const fn anchor<C>(cell: C, total_frames: usize) -> ScheduledCell<C> {
    ScheduledCell {
        cell,
        role: Role::Anchor,
        interval: ActiveInterval {
            start: 0,
            end: total_frames,
        },
    }
}

/// Returns how many frames explored cells linger past the path phase.
fn fade_tail(total_frames: usize) -> Result<usize, MazeError> {
    i32::try_from(total_frames)
        .ok()
        .and_then(|frames| frames.checked_mul(FADE_TAIL_PERCENT))
        .and_then(|scaled| usize::try_from(rounded_div::i32(scaled, 100)).ok())
        .ok_or(MazeError::FrameOverflow {
            frames: total_frames,
        })
}
